use std::sync::Arc;

use contracts::shared::paging::PageRequest;
use contracts::system::access::{AccessEntitlement, AccessPoint};
use contracts::system::users::User;
use tokio::sync::RwLock;

use super::config::PagingConfig;

/// A user together with its credentials, which never leave the service.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    /// `None` for accounts that have no password set (demo data).
    pub password_hash: Option<String>,
}

/// In-memory data of the service.
#[derive(Debug, Default)]
pub struct Store {
    pub users: Vec<UserRecord>,
    pub entitlements: Vec<AccessEntitlement>,
    pub access_points: Vec<AccessPoint>,
}

pub type SharedStore = Arc<RwLock<Store>>;

pub fn shared(store: Store) -> SharedStore {
    Arc::new(RwLock::new(store))
}

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub paging: PagingConfig,
}

impl AppState {
    pub fn new(store: Store, paging: PagingConfig) -> Self {
        Self {
            store: shared(store),
            paging,
        }
    }

    pub fn page_request(&self, page: Option<usize>, limit: Option<usize>) -> PageRequest {
        self.paging.resolve(page, limit)
    }
}
