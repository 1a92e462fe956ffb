//! SeaORM-backed data access functions, called by the repository implementations.

pub mod community_service;
