use axum::extract::{Json, Query, State};
use contracts::shared::paging::Page;
use contracts::system::users::{CreateUserDto, User};
use serde::Deserialize;

use crate::shared::error::ServiceResult;
use crate::shared::store::AppState;
use crate::system::users::service;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// List users, one page at a time
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Page<User>> {
    let request = state.page_request(query.page, query.limit);
    Json(service::list(&state.store, request).await)
}

/// Create user
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CreateUserDto>,
) -> ServiceResult<Json<serde_json::Value>> {
    let user_id = service::create(&state.store, dto).await?;
    Ok(Json(serde_json::json!({ "id": user_id })))
}
