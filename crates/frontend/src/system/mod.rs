pub mod access_entitlements;
pub mod users;
