pub mod routes;
pub mod startup;
pub mod state;
pub mod communities;
pub mod errors;
pub mod openapi;

pub use startup::run;
