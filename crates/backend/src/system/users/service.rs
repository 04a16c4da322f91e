use chrono::Utc;
use contracts::shared::paging::{paginate, Page, PageRequest};
use contracts::system::users::{CreateUserDto, User};

use super::password;
use crate::shared::error::{ServiceError, ServiceResult};
use crate::shared::store::{SharedStore, UserRecord};

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One page of users, newest first
pub async fn list(store: &SharedStore, request: PageRequest) -> Page<User> {
    let store = store.read().await;
    let mut users: Vec<User> = store.users.iter().map(|r| r.user.clone()).collect();
    users.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.user_name.cmp(&b.user_name))
    });
    paginate(&users, &request)
}

/// Create a new user, returning its id
pub async fn create(store: &SharedStore, dto: CreateUserDto) -> ServiceResult<String> {
    let user_name = dto.user_name.trim().to_string();
    if user_name.is_empty() {
        return Err(ServiceError::validation("User name cannot be empty"));
    }
    if user_name.chars().any(char::is_whitespace) {
        return Err(ServiceError::validation("User name cannot contain spaces"));
    }

    let email = non_empty(dto.email);
    if let Some(email) = &email {
        if !email.contains('@') {
            return Err(ServiceError::validation("Invalid email format"));
        }
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let mut store = store.write().await;
    let taken = store
        .users
        .iter()
        .any(|r| r.user.user_name.eq_ignore_ascii_case(&user_name));
    if taken {
        return Err(ServiceError::Conflict(format!(
            "User name already exists: {}",
            user_name
        )));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        user_name,
        first_name: non_empty(dto.first_name),
        middle_name: non_empty(dto.middle_name),
        last_name: non_empty(dto.last_name),
        email,
        job_title: non_empty(dto.job_title),
        is_active: true,
        created_at: Utc::now().to_rfc3339(),
    };
    let id = user.id.clone();
    tracing::info!("Created user {} ({})", user.user_name, id);

    store.users.push(UserRecord {
        user,
        password_hash: Some(password_hash),
    });
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::seed::{demo_store, DEMO_USERS};
    use crate::shared::store::{shared, Store};

    fn dto(user_name: &str) -> CreateUserDto {
        CreateUserDto {
            user_name: user_name.to_string(),
            password: "letters4ever".to_string(),
            email: Some("  ".to_string()),
            first_name: Some("Jane".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_pages() {
        let store = shared(demo_store());

        let first = list(&store, PageRequest::new(1, 10)).await;
        assert_eq!(first.total_count, DEMO_USERS);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 10);

        let last = list(&store, PageRequest::new(3, 10)).await;
        assert_eq!(last.current_page, 3);
        assert_eq!(last.items.len(), 4);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let store = shared(Store::default());
        let page = list(&store, PageRequest::new(5, 10)).await;
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_create_lists_new_user_first() {
        let store = shared(demo_store());
        let id = create(&store, dto("jane.roe")).await.unwrap();

        let page = list(&store, PageRequest::new(1, 10)).await;
        assert_eq!(page.total_count, DEMO_USERS + 1);
        assert_eq!(page.items[0].id, id);
        assert_eq!(page.items[0].email, None);

        let guard = store.read().await;
        let record = guard.users.iter().find(|r| r.user.id == id).unwrap();
        let hash = record.password_hash.as_deref().unwrap();
        assert!(password::verify_password("letters4ever", hash));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let store = shared(Store::default());
        create(&store, dto("jane.roe")).await.unwrap();

        let err = create(&store, dto("Jane.Roe")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let store = shared(Store::default());

        let err = create(&store, dto("  ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut bad_email = dto("jane.roe");
        bad_email.email = Some("jane".to_string());
        assert!(create(&store, bad_email).await.is_err());

        let mut weak = dto("jane.roe");
        weak.password = "abc".to_string();
        assert!(create(&store, weak).await.is_err());

        assert!(store.read().await.users.is_empty());
    }
}
