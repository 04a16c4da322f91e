use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Screens reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Users,
    AccessEntitlements,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Users, Screen::AccessEntitlements];

    /// Value of the `?active=` query parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Screen::Users => "sys_users",
            Screen::AccessEntitlements => "access_entitlements",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Users => "Users",
            Screen::AccessEntitlements => "Access Entitlements",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Screen::Users => "users",
            Screen::AccessEntitlements => "key",
        }
    }

    pub fn from_key(key: &str) -> Option<Screen> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Reads the screen named by a `?active=...` search string.
pub fn screen_from_search(search: &str) -> Option<Screen> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| Screen::from_key(key))
}

/// Application-level navigation state. Passed to the layout explicitly.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Screen>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Screen::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Restores the active screen from the URL and keeps `?active=` in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(screen) = screen_from_search(&search) {
            self.active.set(screen);
        }

        let active = self.active;
        Effect::new(move |_| {
            let screen = active.get();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active", screen.key())])).unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                if let Err(e) =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url))
                {
                    log::warn!("failed to update url: {:?}", e);
                }
            }
        });
    }

    pub fn activate(&self, screen: Screen) {
        log::debug!("activate screen: {}", screen.key());
        self.active.set(screen);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_keys_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_key(screen.key()), Some(screen));
        }
        assert_eq!(Screen::from_key("dashboards"), None);
    }

    #[test]
    fn test_screen_from_search() {
        assert_eq!(
            screen_from_search("?active=access_entitlements"),
            Some(Screen::AccessEntitlements)
        );
        assert_eq!(screen_from_search(""), None);
        assert_eq!(screen_from_search("?active=unknown"), None);
    }
}
