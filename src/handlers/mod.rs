pub mod fallback;
pub mod form;
pub mod health;
pub mod metrics;
pub mod submit;
