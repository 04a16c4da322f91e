use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use contracts::shared::paging::Page;
use contracts::system::access::{
    AccessEntitlement, AccessPoint, CreateAccessPointDto, UpdateEntitlementAccessPointsDto,
};
use serde::Deserialize;

use super::users::ListQuery;
use crate::shared::error::ServiceResult;
use crate::shared::store::AppState;
use crate::system::access::service;

#[derive(Debug, Deserialize)]
pub struct AccessPointsListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub entitlement_id: Option<String>,
}

pub async fn list_entitlements(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Page<AccessEntitlement>> {
    let request = state.page_request(query.page, query.limit);
    Json(service::list_entitlements(&state.store, request).await)
}

pub async fn get_entitlement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<AccessEntitlement>> {
    Ok(Json(service::get_entitlement(&state.store, &id).await?))
}

/// Link and unlink access points of an entitlement
pub async fn update_access_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdateEntitlementAccessPointsDto>,
) -> ServiceResult<StatusCode> {
    service::update_entitlement_access_points(&state.store, &id, dto).await?;
    Ok(StatusCode::OK)
}

pub async fn list_access_points(
    State(state): State<AppState>,
    Query(query): Query<AccessPointsListQuery>,
) -> ServiceResult<Json<Page<AccessPoint>>> {
    let request = state.page_request(query.page, query.limit);
    let entitlement_id = query.entitlement_id.as_deref().filter(|id| !id.is_empty());
    Ok(Json(
        service::list_access_points(&state.store, request, entitlement_id).await?,
    ))
}

pub async fn create_access_point(
    State(state): State<AppState>,
    Json(dto): Json<CreateAccessPointDto>,
) -> ServiceResult<Json<serde_json::Value>> {
    let id = service::create_access_point(&state.store, dto).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}
