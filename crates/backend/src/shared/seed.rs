//! Deterministic demo data, loaded when `seed.demo_data` is on.

use chrono::{DateTime, Duration, TimeZone, Utc};
use contracts::system::access::{AccessEntitlement, AccessPoint};
use contracts::system::users::User;

use super::store::{Store, UserRecord};

const FIRST_NAMES: [&str; 8] = ["Anna", "Boris", "Carla", "Dmitri", "Elena", "Felix", "Greta", "Hugo"];
const LAST_NAMES: [&str; 6] = ["Ivanova", "Keller", "Lopez", "Morozov", "Nakamura", "Olsen"];
const JOB_TITLES: [&str; 4] = ["Analyst", "Engineer", "Auditor", "Manager"];

const ENTITLEMENTS: [(&str, &str); 12] = [
    ("Finance Read", "Read access to the general ledger"),
    ("Finance Post", "Post journal entries"),
    ("Payroll Admin", "Maintain payroll runs"),
    ("HR Records", "View employee records"),
    ("Procurement Approver", "Approve purchase orders"),
    ("Vendor Master", "Maintain supplier master data"),
    ("Warehouse Ops", "Goods receipt and issue"),
    ("Sales Desk", "Create and edit sales orders"),
    ("Treasury", "Bank transfers and statements"),
    ("IT Helpdesk", "Reset passwords and unlock accounts"),
    ("Audit Viewer", "Read-only access to audit trails"),
    ("Reporting", "Run management reports"),
];

const PLATFORMS: [&str; 4] = ["Oracle EBS", "SAP", "Workday", "ServiceNow"];
const POINT_TYPES: [&str; 3] = ["Responsibility", "Role", "Menu"];

pub const DEMO_USERS: usize = 24;
pub const DEMO_ACCESS_POINTS: usize = 36;
/// Access points past this index are not linked to any entitlement.
pub const DEMO_LINKED_POINTS: usize = 30;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn timestamp(offset_hours: i64) -> String {
    (base_time() + Duration::hours(offset_hours)).to_rfc3339()
}

pub fn demo_users() -> Vec<UserRecord> {
    (0..DEMO_USERS)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[i % LAST_NAMES.len()];
            let user = User {
                id: format!("usr-{:04}", i + 1),
                user_name: format!("{}.{}{}", first, last, i + 1).to_lowercase(),
                first_name: Some(first.to_string()),
                middle_name: None,
                last_name: Some(last.to_string()),
                email: Some(format!("{}.{}@example.com", first, last).to_lowercase()),
                job_title: Some(JOB_TITLES[i % JOB_TITLES.len()].to_string()),
                is_active: i % 7 != 6,
                created_at: timestamp(i as i64 * 26),
            };
            UserRecord {
                user,
                password_hash: None,
            }
        })
        .collect()
}

pub fn demo_entitlements() -> Vec<AccessEntitlement> {
    ENTITLEMENTS
        .iter()
        .enumerate()
        .map(|(i, (name, description))| AccessEntitlement {
            id: format!("ent-{:04}", i + 1),
            entitlement_name: name.to_string(),
            description: Some(description.to_string()),
            comments: None,
            status: if i % 5 == 4 { "Inactive" } else { "Active" }.to_string(),
            effective_date: Some(timestamp(i as i64 * 24)),
            revision: 1,
            created_by: Some("admin".to_string()),
            created_on: timestamp(i as i64 * 24),
        })
        .collect()
}

pub fn demo_access_points(entitlements: &[AccessEntitlement]) -> Vec<AccessPoint> {
    (0..DEMO_ACCESS_POINTS)
        .map(|i| {
            let platform = PLATFORMS[i % PLATFORMS.len()];
            let point_type = POINT_TYPES[i % POINT_TYPES.len()];
            let entitlement_id = if i < DEMO_LINKED_POINTS && !entitlements.is_empty() {
                Some(entitlements[i % entitlements.len()].id.clone())
            } else {
                None
            };
            AccessPoint {
                id: format!("ap-{:04}", i + 1),
                entitlement_id,
                access_point_name: format!("{} {} {:02}", platform, point_type, i + 1),
                description: None,
                platform: Some(platform.to_string()),
                access_point_type: Some(point_type.to_string()),
                access_control: i % 2 == 0,
                change_control: i % 3 == 0,
                audit: i % 4 == 0,
                created_on: timestamp(i as i64 * 12),
            }
        })
        .collect()
}

pub fn demo_store() -> Store {
    let entitlements = demo_entitlements();
    let access_points = demo_access_points(&entitlements);
    Store {
        users: demo_users(),
        entitlements,
        access_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_store_is_deterministic() {
        let a = demo_store();
        let b = demo_store();
        assert_eq!(a.entitlements, b.entitlements);
        assert_eq!(a.access_points, b.access_points);
        assert_eq!(a.users[3].user, b.users[3].user);
    }

    #[test]
    fn test_demo_ids_and_names_are_unique() {
        let store = demo_store();
        let user_names: HashSet<_> = store.users.iter().map(|u| u.user.user_name.clone()).collect();
        assert_eq!(user_names.len(), DEMO_USERS);
        let point_ids: HashSet<_> = store.access_points.iter().map(|p| p.id.clone()).collect();
        assert_eq!(point_ids.len(), DEMO_ACCESS_POINTS);
    }

    #[test]
    fn test_demo_links() {
        let store = demo_store();
        let linked = store.access_points.iter().filter(|p| p.entitlement_id.is_some()).count();
        assert_eq!(linked, DEMO_LINKED_POINTS);
        let known: HashSet<_> = store.entitlements.iter().map(|e| e.id.as_str()).collect();
        assert!(store
            .access_points
            .iter()
            .filter_map(|p| p.entitlement_id.as_deref())
            .all(|id| known.contains(id)));
    }
}
