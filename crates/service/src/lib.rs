//! Service layer providing the community CRUD and listing operations on top of models.
//! - Separates query building from HTTP handling.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod db;
pub mod community;
#[cfg(test)]
pub mod test_support;
