pub mod password;
pub mod service;
