pub mod errors;
pub mod db;
pub mod community;
pub mod post;
pub mod community_subscriber;

#[cfg(test)]
mod tests;
