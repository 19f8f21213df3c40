pub mod csrf;
pub mod password;
