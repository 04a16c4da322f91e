pub mod create_access_point;
pub mod edit_entitlement;

pub use create_access_point::CreateAccessPointForm;
pub use edit_entitlement::EditEntitlementForm;
