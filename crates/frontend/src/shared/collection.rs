//! Fetched collection state shared by a screen's table and dialogs.
//!
//! Every fetch is stamped with a generation number. Only the completion of the
//! latest fetch is applied, so a slow response for an old page (or for a screen
//! that has since unmounted) can never overwrite newer data.

use std::future::Future;

use contracts::shared::paging::Page;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// What the table body should show.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyState {
    /// First load, nothing to show yet.
    Loading,
    /// Fetch failed and there is no earlier data to fall back to.
    Error(String),
    Empty,
    Rows,
}

/// Issued by [`CollectionState::begin_fetch`]; hand it back with the result.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket<Q> {
    pub generation: u64,
    pub query: Q,
}

#[derive(Debug, Clone)]
pub struct CollectionState<T, Q> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub error: Option<String>,
    /// Set once the first fetch has completed, successfully or not.
    pub is_loaded: bool,
    generation: u64,
    in_flight: Option<Q>,
}

impl<T, Q> Default for CollectionState<T, Q> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            current_page: 1,
            total_pages: 1,
            total_count: 0,
            error: None,
            is_loaded: false,
            generation: 0,
            in_flight: None,
        }
    }
}

impl<T, Q: Clone + PartialEq> CollectionState<T, Q> {
    /// Starts a fetch for `query`.
    ///
    /// Returns `None` when a fetch for the same query is already running.
    /// A fetch for a different query supersedes the running one.
    pub fn begin_fetch(&mut self, query: Q) -> Option<FetchTicket<Q>> {
        if self.in_flight.as_ref() == Some(&query) {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(query.clone());
        self.is_loading = true;
        self.error = None;
        Some(FetchTicket {
            generation: self.generation,
            query,
        })
    }

    /// Applies a fetch result. Returns `false` if the ticket was superseded.
    ///
    /// On failure the previous items stay in place.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket<Q>, result: Result<Page<T>, String>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.in_flight = None;
        self.is_loading = false;
        self.is_loaded = true;
        match result {
            Ok(page) => {
                self.items = page.items;
                self.current_page = page.current_page;
                self.total_pages = page.total_pages.max(1);
                self.total_count = page.total_count;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e);
            }
        }
        true
    }

    /// Orphans whatever fetch is running; its completion will be ignored.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.is_loading = false;
    }

    pub fn body_state(&self) -> BodyState {
        if !self.items.is_empty() {
            return BodyState::Rows;
        }
        if let Some(e) = &self.error {
            return BodyState::Error(e.clone());
        }
        if self.is_loading || !self.is_loaded {
            BodyState::Loading
        } else {
            BodyState::Empty
        }
    }
}

/// Reactive handle around [`CollectionState`].
pub struct Collection<T, Q>
where
    T: Send + Sync + 'static,
    Q: Send + Sync + 'static,
{
    state: RwSignal<CollectionState<T, Q>>,
}

impl<T, Q> Clone for Collection<T, Q>
where
    T: Send + Sync + 'static,
    Q: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, Q> Copy for Collection<T, Q>
where
    T: Send + Sync + 'static,
    Q: Send + Sync + 'static,
{
}

impl<T, Q> Collection<T, Q>
where
    T: Clone + Send + Sync + 'static,
    Q: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    /// Creates the collection and ties its lifetime to the current owner:
    /// when the screen unmounts, any running fetch is orphaned.
    pub fn new() -> Self {
        let state = RwSignal::new(CollectionState::default());
        on_cleanup(move || {
            state.try_update(|s| s.invalidate());
        });
        Self { state }
    }

    pub fn state(&self) -> RwSignal<CollectionState<T, Q>> {
        self.state
    }

    pub fn items(&self) -> Vec<T> {
        self.state.with(|s| s.items.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn body_state(&self) -> BodyState {
        self.state.with(|s| s.body_state())
    }

    /// Runs `fetcher` for `query` unless the same query is already loading.
    ///
    /// `on_loaded` runs after a successful, non-stale completion.
    pub fn fetch<F, Fut, L>(&self, query: Q, fetcher: F, on_loaded: L)
    where
        F: FnOnce(Q) -> Fut + 'static,
        Fut: Future<Output = Result<Page<T>, String>> + 'static,
        L: FnOnce(&[T]) + 'static,
    {
        let Some(ticket) = self.state.try_update(|s| s.begin_fetch(query)).flatten() else {
            log::debug!("fetch skipped: same query already loading");
            return;
        };

        log::debug!("fetch #{} started: {:?}", ticket.generation, ticket.query);
        let state = self.state;
        spawn_local(async move {
            let result = fetcher(ticket.query.clone()).await;
            if let Err(e) = &result {
                log::warn!("fetch #{} failed: {}", ticket.generation, e);
            }
            let succeeded = result.is_ok();

            let applied = state
                .try_update(|s| s.finish_fetch(&ticket, result))
                .unwrap_or(false);
            if !applied {
                log::debug!("fetch #{} discarded: superseded", ticket.generation);
                return;
            }
            if succeeded {
                state.with_untracked(|s| on_loaded(&s.items));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = CollectionState<u32, usize>;

    fn page(items: Vec<u32>, current_page: usize, total_pages: usize) -> Page<u32> {
        let total_count = items.len();
        Page {
            items,
            current_page,
            total_pages,
            total_count,
        }
    }

    #[test]
    fn test_first_load_shows_loading() {
        let mut s = State::default();
        assert_eq!(s.body_state(), BodyState::Loading);

        let ticket = s.begin_fetch(1).unwrap();
        assert!(s.is_loading);
        assert_eq!(s.body_state(), BodyState::Loading);

        assert!(s.finish_fetch(&ticket, Ok(page(vec![1, 2], 1, 1))));
        assert!(!s.is_loading);
        assert_eq!(s.body_state(), BodyState::Rows);
    }

    #[test]
    fn test_empty_result_is_empty_not_loading() {
        let mut s = State::default();
        let ticket = s.begin_fetch(1).unwrap();
        s.finish_fetch(&ticket, Ok(page(vec![], 1, 1)));

        assert!(!s.is_loading);
        assert_eq!(s.body_state(), BodyState::Empty);
    }

    #[test]
    fn test_items_kept_while_reloading() {
        let mut s = State::default();
        let ticket = s.begin_fetch(1).unwrap();
        s.finish_fetch(&ticket, Ok(page(vec![1, 2, 3], 1, 2)));

        s.begin_fetch(2).unwrap();
        assert!(s.is_loading);
        assert_eq!(s.items, vec![1, 2, 3]);
        assert_eq!(s.body_state(), BodyState::Rows);
    }

    #[test]
    fn test_same_query_while_loading_is_not_refetched() {
        let mut s = State::default();
        s.begin_fetch(1).unwrap();
        assert!(s.begin_fetch(1).is_none());
    }

    #[test]
    fn test_page_change_while_loading_fetches_once() {
        let mut s = State::default();
        let first = s.begin_fetch(1).unwrap();

        let second = s.begin_fetch(2).unwrap();
        assert!(s.begin_fetch(2).is_none());

        // Late answer for page 1 must not land.
        assert!(!s.finish_fetch(&first, Ok(page(vec![1], 1, 2))));
        assert!(s.is_loading);
        assert!(s.items.is_empty());

        assert!(s.finish_fetch(&second, Ok(page(vec![11, 12], 2, 2))));
        assert_eq!(s.items, vec![11, 12]);
        assert_eq!(s.current_page, 2);
        assert_eq!(s.total_pages, 2);
    }

    #[test]
    fn test_reload_after_completion_is_allowed() {
        let mut s = State::default();
        let ticket = s.begin_fetch(1).unwrap();
        s.finish_fetch(&ticket, Ok(page(vec![1], 1, 1)));

        assert!(s.begin_fetch(1).is_some());
    }

    #[test]
    fn test_refetch_of_same_page_replaces_stale_rows() {
        let mut s = State::default();
        let ticket = s.begin_fetch(1).unwrap();
        s.finish_fetch(&ticket, Ok(page(vec![1, 2], 1, 1)));

        // e.g. a row changed on the server after a save
        let ticket = s.begin_fetch(1).unwrap();
        assert!(s.finish_fetch(&ticket, Ok(page(vec![1, 3], 1, 1))));
        assert_eq!(s.items, vec![1, 3]);
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut s = State::default();
        let ticket = s.begin_fetch(1).unwrap();
        s.finish_fetch(&ticket, Ok(page(vec![1, 2], 1, 1)));

        let ticket = s.begin_fetch(2).unwrap();
        assert!(s.finish_fetch(&ticket, Err("boom".into())));
        assert!(!s.is_loading);
        assert_eq!(s.items, vec![1, 2]);
        assert_eq!(s.error.as_deref(), Some("boom"));
        assert_eq!(s.body_state(), BodyState::Rows);
    }

    #[test]
    fn test_failure_on_first_load_shows_error() {
        let mut s = State::default();
        let ticket = s.begin_fetch(1).unwrap();
        s.finish_fetch(&ticket, Err("offline".into()));
        assert_eq!(s.body_state(), BodyState::Error("offline".into()));

        // Retrying clears the error while loading.
        s.begin_fetch(1).unwrap();
        assert!(s.error.is_none());
        assert_eq!(s.body_state(), BodyState::Loading);
    }

    #[test]
    fn test_invalidate_orphans_running_fetch() {
        let mut s = State::default();
        let ticket = s.begin_fetch(1).unwrap();
        s.invalidate();

        assert!(!s.is_loading);
        assert!(!s.finish_fetch(&ticket, Ok(page(vec![1], 1, 1))));
        assert!(s.items.is_empty());
    }
}
