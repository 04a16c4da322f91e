use serde::{Deserialize, Serialize};

use crate::shared::paging::{PageRequest, DEFAULT_PAGE_LIMIT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessEntitlement {
    pub id: String,
    pub entitlement_name: String,
    pub description: Option<String>,
    pub comments: Option<String>,
    pub status: String,
    pub effective_date: Option<String>,
    pub revision: u32,
    pub created_by: Option<String>,
    pub created_on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub id: String,
    /// Entitlement the access point is granted through, if any.
    pub entitlement_id: Option<String>,
    pub access_point_name: String,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub access_point_type: Option<String>,
    pub access_control: bool,
    pub change_control: bool,
    pub audit: bool,
    pub created_on: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccessPointDto {
    pub entitlement_id: Option<String>,
    pub access_point_name: String,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub access_point_type: Option<String>,
    pub access_control: bool,
    pub change_control: bool,
    pub audit: bool,
}

/// Access points to link to, and unlink from, an entitlement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntitlementAccessPointsDto {
    #[serde(default)]
    pub link_ids: Vec<String>,
    #[serde(default)]
    pub unlink_ids: Vec<String>,
}

impl UpdateEntitlementAccessPointsDto {
    pub fn is_empty(&self) -> bool {
        self.link_ids.is_empty() && self.unlink_ids.is_empty()
    }
}

/// Query for `/api/access/points`.
///
/// Kept flat (no `#[serde(flatten)]`) so it round-trips through query strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPointsQuery {
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitlement_id: Option<String>,
}

fn first_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl AccessPointsQuery {
    pub fn new(page: usize, limit: usize, entitlement_id: Option<String>) -> Self {
        let request = PageRequest::new(page, limit);
        Self {
            page: request.page,
            limit: request.limit,
            entitlement_id,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query: AccessPointsQuery = serde_json::from_str(r#"{"entitlement_id":"e1"}"#).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(query.entitlement_id.as_deref(), Some("e1"));
    }

    #[test]
    fn test_update_dto_defaults_to_empty() {
        let dto: UpdateEntitlementAccessPointsDto =
            serde_json::from_str(r#"{"link_ids":["a1"]}"#).unwrap();
        assert_eq!(dto.link_ids, vec!["a1".to_string()]);
        assert!(dto.unlink_ids.is_empty());
        assert!(!dto.is_empty());
    }

    #[test]
    fn test_query_normalizes_page_request() {
        let query = AccessPointsQuery::new(0, 0, None);
        assert_eq!(query.page_request(), PageRequest::new(1, 1));
    }
}
