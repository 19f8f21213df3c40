pub mod error_bag;
pub mod rules;
