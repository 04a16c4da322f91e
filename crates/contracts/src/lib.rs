//! Types shared by the console frontend and the admin service.

pub mod shared;
pub mod system;
