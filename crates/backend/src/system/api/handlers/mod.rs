pub mod access;
pub mod users;
