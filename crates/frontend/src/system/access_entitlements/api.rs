use contracts::shared::paging::{Page, PageRequest};
use contracts::system::access::{
    AccessEntitlement, AccessPoint, AccessPointsQuery, CreateAccessPointDto,
    UpdateEntitlementAccessPointsDto,
};

use crate::shared::api_utils::{get_json, post_json, put_json, with_query};

const ENTITLEMENTS_PATH: &str = "/api/access/entitlements";
const POINTS_PATH: &str = "/api/access/points";

pub async fn fetch_entitlements(request: PageRequest) -> Result<Page<AccessEntitlement>, String> {
    let path = with_query(ENTITLEMENTS_PATH, &request)?;
    get_json(&path, "load entitlements").await
}

/// Access points, optionally narrowed to one entitlement
pub async fn fetch_access_points(query: AccessPointsQuery) -> Result<Page<AccessPoint>, String> {
    let path = with_query(POINTS_PATH, &query)?;
    get_json(&path, "load access points").await
}

/// Create an access point, returning the new id
pub async fn create_access_point(dto: CreateAccessPointDto) -> Result<String, String> {
    let result: serde_json::Value = post_json(POINTS_PATH, &dto, "create access point").await?;
    Ok(result["id"].as_str().unwrap_or_default().to_string())
}

pub async fn update_entitlement_access_points(
    entitlement_id: &str,
    dto: UpdateEntitlementAccessPointsDto,
) -> Result<(), String> {
    let path = format!("{}/{}/access-points", ENTITLEMENTS_PATH, entitlement_id);
    put_json(&path, &dto, "update access points").await
}
