//! Public types for the catalog API.

mod category;

pub use category::{Category, NewCategory};
