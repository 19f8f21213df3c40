pub mod core;
pub mod models;
pub mod stores;
pub mod security;
pub mod metrics;
pub mod validation;
pub mod utils;
pub mod handlers;
pub mod client;

#[cfg(test)]
pub(crate) mod testing;
