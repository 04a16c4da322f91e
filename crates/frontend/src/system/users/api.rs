use contracts::shared::paging::{Page, PageRequest};
use contracts::system::users::{CreateUserDto, User};

use crate::shared::api_utils::{get_json, post_json, with_query};

const USERS_PATH: &str = "/api/system/users";

/// Fetch one page of users
pub async fn fetch_users(request: PageRequest) -> Result<Page<User>, String> {
    let path = with_query(USERS_PATH, &request)?;
    get_json(&path, "load users").await
}

/// Create a user, returning the new id
pub async fn create_user(dto: CreateUserDto) -> Result<String, String> {
    let result: serde_json::Value = post_json(USERS_PATH, &dto, "create user").await?;
    Ok(result["id"].as_str().unwrap_or_default().to_string())
}
