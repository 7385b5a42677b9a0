//! Request extraction helpers shared by the handlers.

mod validate;

pub use validate::{ValidatedJson, ValidatedQuery};
