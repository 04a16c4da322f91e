//! Per-screen session state: which dialog is open, which record is selected,
//! and the server paging cursor.
//!
//! A screen creates one [`SessionContext`] on mount and hands the (Copy) handle
//! to every child component that needs it as an explicit prop.

use contracts::shared::paging::PageRequest;
use leptos::prelude::*;

use crate::shared::table_state::TableRow;

/// The closed set of dialogs a screen can show.
///
/// `Default` must be the "no dialog" variant.
pub trait ModalKind: Clone + PartialEq + Default + Send + Sync + 'static {
    fn is_open(&self) -> bool {
        *self != Self::default()
    }

    /// Header shown by the modal frame.
    fn title(&self) -> &'static str;

    /// Dialogs that render the selected record cannot stay open without one.
    fn needs_record(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState<M, T> {
    modal: M,
    selected: Option<T>,
    /// Selection that was active before a dialog took over `selected`.
    /// `Some` only while a dialog opened with `open_modal_for` is showing.
    before_modal: Option<Option<T>>,
    page: usize,
    limit: usize,
}

impl<M: ModalKind, T: Clone> SessionState<M, T> {
    pub fn new(default_limit: usize) -> Self {
        Self {
            modal: M::default(),
            selected: None,
            before_modal: None,
            page: 1,
            limit: default_limit.max(1),
        }
    }

    pub fn modal(&self) -> &M {
        &self.modal
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    /// Opens a dialog that does not need a record. Replaces whatever was open.
    pub fn open_modal(&mut self, modal: M) {
        self.release_modal_selection();
        self.modal = modal;
    }

    /// Opens a dialog working on `record`; the record stays selected until the dialog closes.
    pub fn open_modal_for(&mut self, modal: M, record: T) {
        self.release_modal_selection();
        self.before_modal = Some(self.selected.replace(record));
        self.modal = modal;
    }

    pub fn close_modal(&mut self) {
        self.release_modal_selection();
        self.modal = M::default();
    }

    pub fn set_selected(&mut self, record: Option<T>) {
        self.before_modal = None;
        self.selected = record;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changing the page size always starts over from the first page.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    pub fn reset_paging(&mut self, limit: usize) {
        self.set_limit(limit);
    }

    /// An open dialog that needs a record while nothing is selected.
    pub fn is_modal_orphaned(&self) -> bool {
        self.modal.needs_record() && self.selected.is_none()
    }

    /// Closes an orphaned dialog. Returns `true` when it did.
    pub fn close_orphaned_modal(&mut self) -> bool {
        if self.is_modal_orphaned() {
            self.close_modal();
            true
        } else {
            false
        }
    }

    fn release_modal_selection(&mut self) {
        if let Some(previous) = self.before_modal.take() {
            self.selected = previous;
        }
    }
}

impl<M: ModalKind, T: Clone + TableRow> SessionState<M, T> {
    /// Drops the selection if its record is no longer part of `items`.
    ///
    /// A dialog that was opened for the vanished record is closed as well.
    /// Returns `true` when something was cleared.
    pub fn reconcile_selection(&mut self, items: &[T]) -> bool {
        let present = |record: &T| items.iter().any(|item| item.row_id() == record.row_id());

        let mut cleared = false;
        let previous_stale =
            matches!(&self.before_modal, Some(Some(previous)) if !present(previous));
        if previous_stale {
            self.before_modal = Some(None);
            cleared = true;
        }

        let stale = self.selected.as_ref().is_some_and(|record| !present(record));
        if stale {
            if self.before_modal.is_some() {
                self.close_modal();
            } else {
                self.selected = None;
            }
            self.close_orphaned_modal();
            cleared = true;
        }
        cleared
    }
}

/// Reactive handle around [`SessionState`].
pub struct SessionContext<M, T>
where
    M: ModalKind,
    T: Clone + Send + Sync + 'static,
{
    state: RwSignal<SessionState<M, T>>,
}

impl<M, T> Clone for SessionContext<M, T>
where
    M: ModalKind,
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, T> Copy for SessionContext<M, T>
where
    M: ModalKind,
    T: Clone + Send + Sync + 'static,
{
}

impl<M, T> SessionContext<M, T>
where
    M: ModalKind,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(default_limit: usize) -> Self {
        Self {
            state: RwSignal::new(SessionState::new(default_limit)),
        }
    }

    pub fn modal(&self) -> M {
        self.state.with(|s| s.modal().clone())
    }

    pub fn is_showing(&self, modal: &M) -> bool {
        self.state.with(|s| s.modal() == modal)
    }

    pub fn open_modal(&self, modal: M) {
        log::debug!("open modal: {}", modal.title());
        self.state.update(|s| s.open_modal(modal));
    }

    pub fn open_modal_for(&self, modal: M, record: T) {
        log::debug!("open modal for record: {}", modal.title());
        self.state.update(|s| s.open_modal_for(modal, record));
    }

    pub fn close_modal(&self) {
        self.state.update(|s| s.close_modal());
    }

    /// Closes the dialog if it needs a record and none is selected.
    pub fn close_orphaned_modal(&self) {
        if self.state.with_untracked(|s| s.is_modal_orphaned()) {
            log::debug!("closing dialog: no record selected");
            self.state.update(|s| {
                s.close_orphaned_modal();
            });
        }
    }

    pub fn selected(&self) -> Option<T> {
        self.state.with(|s| s.selected().cloned())
    }

    pub fn selected_untracked(&self) -> Option<T> {
        self.state.with_untracked(|s| s.selected().cloned())
    }

    pub fn set_selected(&self, record: Option<T>) {
        self.state.update(|s| s.set_selected(record));
    }

    pub fn page(&self) -> usize {
        self.state.with(|s| s.page())
    }

    pub fn set_page(&self, page: usize) {
        self.state.update(|s| s.set_page(page));
    }

    pub fn limit(&self) -> usize {
        self.state.with(|s| s.limit())
    }

    pub fn set_limit(&self, limit: usize) {
        self.state.update(|s| s.set_limit(limit));
    }

    pub fn reset_paging(&self, limit: usize) {
        self.state.update(|s| s.reset_paging(limit));
    }

    pub fn page_request(&self) -> PageRequest {
        self.state.with(|s| s.page_request())
    }
}

impl<M, T> SessionContext<M, T>
where
    M: ModalKind,
    T: Clone + TableRow + Send + Sync + 'static,
{
    pub fn reconcile_selection(&self, items: &[T]) {
        let cleared = self
            .state
            .try_update(|s| s.reconcile_selection(items))
            .unwrap_or(false);
        if cleared {
            log::debug!("selection dropped: record no longer in collection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    enum TestModal {
        #[default]
        Closed,
        Create,
        Edit,
    }

    impl ModalKind for TestModal {
        fn title(&self) -> &'static str {
            match self {
                TestModal::Closed => "",
                TestModal::Create => "Create",
                TestModal::Edit => "Edit",
            }
        }

        fn needs_record(&self) -> bool {
            matches!(self, TestModal::Edit)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Rec(&'static str);

    impl TableRow for Rec {
        fn row_id(&self) -> &str {
            self.0
        }
    }

    fn state() -> SessionState<TestModal, Rec> {
        SessionState::new(10)
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(*s.modal(), TestModal::Closed);
        assert!(!s.modal().is_open());
        assert!(s.selected().is_none());
        assert_eq!(s.page(), 1);
        assert_eq!(s.limit(), 10);
    }

    #[test]
    fn test_last_open_wins() {
        let sequence = [
            TestModal::Create,
            TestModal::Edit,
            TestModal::Closed,
            TestModal::Edit,
            TestModal::Create,
        ];
        let mut s = state();
        for modal in sequence {
            s.open_modal(modal);
            assert_eq!(*s.modal(), modal);
        }
        assert_eq!(*s.modal(), TestModal::Create);
    }

    #[test]
    fn test_create_then_cancel_keeps_selection() {
        let mut s = state();
        s.set_selected(Some(Rec("a")));

        s.open_modal(TestModal::Create);
        s.close_modal();

        assert_eq!(s.selected(), Some(&Rec("a")));
        assert!(!s.modal().is_open());
    }

    #[test]
    fn test_close_clears_selection_held_for_dialog() {
        let mut s = state();
        s.open_modal_for(TestModal::Edit, Rec("b"));
        assert_eq!(s.selected(), Some(&Rec("b")));

        s.close_modal();
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_close_restores_selection_before_dialog() {
        let mut s = state();
        s.set_selected(Some(Rec("a")));
        s.open_modal_for(TestModal::Edit, Rec("b"));
        s.close_modal();
        assert_eq!(s.selected(), Some(&Rec("a")));
    }

    #[test]
    fn test_reopen_replaces_dialog_selection() {
        let mut s = state();
        s.open_modal_for(TestModal::Edit, Rec("b"));
        s.open_modal_for(TestModal::Edit, Rec("c"));
        assert_eq!(s.selected(), Some(&Rec("c")));

        s.open_modal(TestModal::Create);
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_paging_setters_clamp() {
        let mut s = state();
        s.set_page(0);
        assert_eq!(s.page(), 1);

        s.set_page(4);
        s.set_limit(0);
        assert_eq!(s.limit(), 1);
        assert_eq!(s.page(), 1);

        s.set_page(3);
        s.reset_paging(5);
        assert_eq!(s.page_request(), PageRequest::new(1, 5));
    }

    #[test]
    fn test_reconcile_drops_missing_selection() {
        let mut s = state();
        s.set_selected(Some(Rec("gone")));
        assert!(s.reconcile_selection(&[Rec("a"), Rec("b")]));
        assert!(s.selected().is_none());

        s.set_selected(Some(Rec("a")));
        assert!(!s.reconcile_selection(&[Rec("a"), Rec("b")]));
        assert_eq!(s.selected(), Some(&Rec("a")));
    }

    #[test]
    fn test_reconcile_closes_dialog_of_missing_record() {
        let mut s = state();
        s.set_selected(Some(Rec("a")));
        s.open_modal_for(TestModal::Edit, Rec("gone"));

        assert!(s.reconcile_selection(&[Rec("a")]));
        assert!(!s.modal().is_open());
        assert_eq!(s.selected(), Some(&Rec("a")));
    }

    #[test]
    fn test_reconcile_closes_record_dialog_opened_without_record() {
        let mut s = state();
        s.set_selected(Some(Rec("focused")));
        s.open_modal(TestModal::Edit);

        assert!(s.reconcile_selection(&[Rec("other")]));
        assert!(s.selected().is_none());
        assert!(!s.modal().is_open());
    }

    #[test]
    fn test_reconcile_closes_dialog_for_focused_record() {
        let mut s = state();
        s.set_selected(Some(Rec("focused")));
        s.open_modal_for(TestModal::Edit, Rec("focused"));

        assert!(s.reconcile_selection(&[Rec("other")]));
        assert!(!s.modal().is_open());
        assert!(s.selected().is_none());

        // focusing another record later does not bring the dialog back
        s.set_selected(Some(Rec("other")));
        assert!(!s.modal().is_open());
    }

    #[test]
    fn test_orphaned_modal_only_for_record_dialogs() {
        let mut s = state();
        s.open_modal(TestModal::Create);
        assert!(!s.is_modal_orphaned());
        assert!(!s.close_orphaned_modal());
        assert_eq!(*s.modal(), TestModal::Create);

        s.open_modal(TestModal::Edit);
        assert!(s.is_modal_orphaned());
        assert!(s.close_orphaned_modal());
        assert!(!s.modal().is_open());
    }
}
