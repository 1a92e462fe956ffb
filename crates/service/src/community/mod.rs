//! Community module: three-layer architecture (domain, repository, service).
//!
//! The service owns the not-found and id-consistency rules; the repository only talks to the store.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CommunityService;
