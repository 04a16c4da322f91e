use std::collections::HashSet;

use chrono::Utc;
use contracts::shared::paging::{paginate, Page, PageRequest};
use contracts::system::access::{
    AccessEntitlement, AccessPoint, CreateAccessPointDto, UpdateEntitlementAccessPointsDto,
};

use crate::shared::error::{ServiceError, ServiceResult};
use crate::shared::store::{SharedStore, Store};

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn ensure_entitlement(store: &Store, id: &str) -> ServiceResult<()> {
    if store.entitlements.iter().any(|e| e.id == id) {
        Ok(())
    } else {
        Err(ServiceError::not_found("Access entitlement", id))
    }
}

/// One page of entitlements ordered by name
pub async fn list_entitlements(store: &SharedStore, request: PageRequest) -> Page<AccessEntitlement> {
    let store = store.read().await;
    let mut entitlements = store.entitlements.clone();
    entitlements.sort_by_key(|e| e.entitlement_name.to_lowercase());
    paginate(&entitlements, &request)
}

pub async fn get_entitlement(store: &SharedStore, id: &str) -> ServiceResult<AccessEntitlement> {
    let store = store.read().await;
    store
        .entitlements
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| ServiceError::not_found("Access entitlement", id))
}

/// One page of access points ordered by name, optionally only those of one entitlement
pub async fn list_access_points(
    store: &SharedStore,
    request: PageRequest,
    entitlement_id: Option<&str>,
) -> ServiceResult<Page<AccessPoint>> {
    let store = store.read().await;
    if let Some(id) = entitlement_id {
        ensure_entitlement(&store, id)?;
    }

    let mut points: Vec<AccessPoint> = store
        .access_points
        .iter()
        .filter(|p| entitlement_id.is_none() || p.entitlement_id.as_deref() == entitlement_id)
        .cloned()
        .collect();
    points.sort_by(|a, b| {
        a.access_point_name
            .to_lowercase()
            .cmp(&b.access_point_name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(paginate(&points, &request))
}

/// Create an access point, returning its id
pub async fn create_access_point(store: &SharedStore, dto: CreateAccessPointDto) -> ServiceResult<String> {
    let name = dto.access_point_name.trim().to_string();
    if name.is_empty() {
        return Err(ServiceError::validation("Access point name cannot be empty"));
    }
    let entitlement_id = non_empty(dto.entitlement_id);

    let mut store = store.write().await;
    if let Some(id) = &entitlement_id {
        ensure_entitlement(&store, id)?;
    }
    let duplicate = store.access_points.iter().any(|p| {
        p.entitlement_id == entitlement_id && p.access_point_name.eq_ignore_ascii_case(&name)
    });
    if duplicate {
        return Err(ServiceError::Conflict(format!(
            "Access point already exists: {}",
            name
        )));
    }

    let point = AccessPoint {
        id: uuid::Uuid::new_v4().to_string(),
        entitlement_id,
        access_point_name: name,
        description: non_empty(dto.description),
        platform: non_empty(dto.platform),
        access_point_type: non_empty(dto.access_point_type),
        access_control: dto.access_control,
        change_control: dto.change_control,
        audit: dto.audit,
        created_on: Utc::now().to_rfc3339(),
    };
    let id = point.id.clone();
    tracing::info!("Created access point {} ({})", point.access_point_name, id);
    store.access_points.push(point);
    Ok(id)
}

/// Links and unlinks access points of an entitlement and bumps its revision.
///
/// Unlinking only touches points currently linked to this entitlement.
/// The whole request is rejected if any id is unknown.
pub async fn update_entitlement_access_points(
    store: &SharedStore,
    entitlement_id: &str,
    dto: UpdateEntitlementAccessPointsDto,
) -> ServiceResult<()> {
    let link: HashSet<&str> = dto.link_ids.iter().map(String::as_str).collect();
    let unlink: HashSet<&str> = dto.unlink_ids.iter().map(String::as_str).collect();
    if let Some(id) = link.intersection(&unlink).next() {
        return Err(ServiceError::validation(format!(
            "Access point cannot be linked and unlinked at once: {}",
            id
        )));
    }

    let mut store = store.write().await;
    ensure_entitlement(&store, entitlement_id)?;

    let known: HashSet<&str> = store.access_points.iter().map(|p| p.id.as_str()).collect();
    if let Some(missing) = link.union(&unlink).find(|id| !known.contains(*id)) {
        return Err(ServiceError::not_found("Access point", *missing));
    }

    let mut changed = 0usize;
    for point in store.access_points.iter_mut() {
        if link.contains(point.id.as_str()) {
            if point.entitlement_id.as_deref() != Some(entitlement_id) {
                point.entitlement_id = Some(entitlement_id.to_string());
                changed += 1;
            }
        } else if unlink.contains(point.id.as_str())
            && point.entitlement_id.as_deref() == Some(entitlement_id)
        {
            point.entitlement_id = None;
            changed += 1;
        }
    }

    if changed > 0 {
        if let Some(entitlement) = store.entitlements.iter_mut().find(|e| e.id == entitlement_id) {
            entitlement.revision += 1;
        }
    }
    tracing::info!(
        "Entitlement {}: {} access point link(s) changed",
        entitlement_id,
        changed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::seed::{demo_store, DEMO_ACCESS_POINTS};
    use crate::shared::store::shared;

    fn point_dto(entitlement_id: Option<&str>, name: &str) -> CreateAccessPointDto {
        CreateAccessPointDto {
            entitlement_id: entitlement_id.map(str::to_string),
            access_point_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_entitlements_sorted_and_paged() {
        let store = shared(demo_store());
        let page = list_entitlements(&store, PageRequest::new(1, 5)).await;
        assert_eq!(page.total_count, 12);
        assert_eq!(page.total_pages, 3);
        let names: Vec<&str> = page.items.iter().map(|e| e.entitlement_name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_by_key(|n| n.to_lowercase());
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_get_entitlement_not_found() {
        let store = shared(demo_store());
        assert!(get_entitlement(&store, "ent-0001").await.is_ok());
        let err = get_entitlement(&store, "nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_access_points_filtered_by_entitlement() {
        let store = shared(demo_store());

        let all = list_access_points(&store, PageRequest::new(1, 5), None).await.unwrap();
        assert_eq!(all.total_count, DEMO_ACCESS_POINTS);

        let linked = list_access_points(&store, PageRequest::new(1, 50), Some("ent-0001"))
            .await
            .unwrap();
        assert!(linked.total_count > 0);
        assert!(linked
            .items
            .iter()
            .all(|p| p.entitlement_id.as_deref() == Some("ent-0001")));

        let missing = list_access_points(&store, PageRequest::new(1, 5), Some("nope")).await;
        assert!(matches!(missing, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_access_point() {
        let store = shared(demo_store());
        let id = create_access_point(&store, point_dto(Some("ent-0002"), "New point"))
            .await
            .unwrap();

        let page = list_access_points(&store, PageRequest::new(1, 50), Some("ent-0002"))
            .await
            .unwrap();
        assert!(page.items.iter().any(|p| p.id == id));

        let duplicate = create_access_point(&store, point_dto(Some("ent-0002"), "new POINT")).await;
        assert!(matches!(duplicate, Err(ServiceError::Conflict(_))));

        let unknown = create_access_point(&store, point_dto(Some("nope"), "Other")).await;
        assert!(matches!(unknown, Err(ServiceError::NotFound { .. })));

        let blank = create_access_point(&store, point_dto(None, "  ")).await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_links_and_unlinks() {
        let store = shared(demo_store());
        let before = list_access_points(&store, PageRequest::new(1, 50), Some("ent-0001"))
            .await
            .unwrap();
        let unlink_id = before.items[0].id.clone();

        let dto = UpdateEntitlementAccessPointsDto {
            link_ids: vec!["ap-0036".to_string()],
            unlink_ids: vec![unlink_id.clone(), "ap-0002".to_string()],
        };
        update_entitlement_access_points(&store, "ent-0001", dto).await.unwrap();

        let after = list_access_points(&store, PageRequest::new(1, 50), Some("ent-0001"))
            .await
            .unwrap();
        let ids: Vec<&str> = after.items.iter().map(|p| p.id.as_str()).collect();
        assert!(ids.contains(&"ap-0036"));
        assert!(!ids.contains(&unlink_id.as_str()));
        assert_eq!(after.total_count, before.total_count);

        // ap-0002 belongs to another entitlement and must stay there.
        let other = list_access_points(&store, PageRequest::new(1, 50), Some("ent-0002"))
            .await
            .unwrap();
        assert!(other.items.iter().any(|p| p.id == "ap-0002"));

        let entitlement = get_entitlement(&store, "ent-0001").await.unwrap();
        assert_eq!(entitlement.revision, 2);
    }

    #[tokio::test]
    async fn test_update_rejects_bad_requests_without_changes() {
        let store = shared(demo_store());

        let unknown_point = UpdateEntitlementAccessPointsDto {
            link_ids: vec!["ap-0036".to_string(), "ap-9999".to_string()],
            unlink_ids: vec![],
        };
        let err = update_entitlement_access_points(&store, "ent-0001", unknown_point)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));

        let both = UpdateEntitlementAccessPointsDto {
            link_ids: vec!["ap-0036".to_string()],
            unlink_ids: vec!["ap-0036".to_string()],
        };
        let err = update_entitlement_access_points(&store, "ent-0001", both)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = update_entitlement_access_points(&store, "nope", UpdateEntitlementAccessPointsDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));

        let guard = store.read().await;
        let point = guard.access_points.iter().find(|p| p.id == "ap-0036").unwrap();
        assert_eq!(point.entitlement_id, None);
    }
}
