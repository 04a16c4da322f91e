//! Client-side table state: sorting, column filters, column visibility,
//! row selection and the visible window.
//!
//! Everything here is derived from the bound collection on each render;
//! nothing is persisted.

use std::collections::{BTreeMap, HashSet};

use contracts::shared::paging::total_pages;

/// Stable identity of a table row.
pub trait TableRow {
    fn row_id(&self) -> &str;
}

/// One column of a table: how to read the cell text and what the user may do with it.
pub struct ColumnDef<T> {
    pub id: &'static str,
    pub header: &'static str,
    pub accessor: fn(&T) -> String,
    pub can_hide: bool,
    pub can_filter: bool,
    pub can_sort: bool,
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ColumnDef<T> {}

impl<T> ColumnDef<T> {
    pub fn new(id: &'static str, header: &'static str, accessor: fn(&T) -> String) -> Self {
        Self {
            id,
            header,
            accessor,
            can_hide: true,
            can_filter: false,
            can_sort: true,
        }
    }

    pub fn filterable(mut self) -> Self {
        self.can_filter = true;
        self
    }

    /// Column cannot be hidden from the "Columns" menu.
    pub fn pinned(mut self) -> Self {
        self.can_hide = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.can_sort = false;
        self
    }

    pub fn value(&self, row: &T) -> String {
        (self.accessor)(row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub ascending: bool,
}

/// Header checkbox state for "select all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    NoneSelected,
    SomeSelected,
    AllSelected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub sort: Option<SortSpec>,
    filters: BTreeMap<String, String>,
    hidden: HashSet<String>,
    selected: HashSet<String>,
    page_index: usize,
    page_size: usize,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            filters: BTreeMap::new(),
            hidden: HashSet::new(),
            selected: HashSet::new(),
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn toggle_sort(&mut self, field: &str) {
        match &mut self.sort {
            Some(sort) if sort.field == field => sort.ascending = !sort.ascending,
            _ => {
                self.sort = Some(SortSpec {
                    field: field.to_string(),
                    ascending: true,
                })
            }
        }
    }

    pub fn sort_field(&self) -> String {
        self.sort.as_ref().map(|s| s.field.clone()).unwrap_or_default()
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort.as_ref().map(|s| s.ascending).unwrap_or(true)
    }

    /// Sets the filter text for a column; an empty text removes the filter.
    pub fn set_filter(&mut self, column: &str, text: &str) {
        if text.trim().is_empty() {
            self.filters.remove(column);
        } else {
            self.filters.insert(column.to_string(), text.to_string());
        }
        self.page_index = 0;
    }

    pub fn filter_value(&self, column: &str) -> String {
        self.filters.get(column).cloned().unwrap_or_default()
    }

    pub fn set_column_visible(&mut self, column: &str, visible: bool) {
        if visible {
            self.hidden.remove(column);
        } else {
            self.hidden.insert(column.to_string());
        }
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        !self.hidden.contains(column)
    }

    /// Columns to render, in declaration order.
    pub fn visible_columns<T>(&self, columns: &[ColumnDef<T>]) -> Vec<ColumnDef<T>> {
        columns
            .iter()
            .filter(|c| !c.can_hide || self.is_column_visible(c.id))
            .copied()
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    /// Selects or deselects every row in `visible_rows` (the current window only).
    pub fn toggle_all_visible<T: TableRow>(&mut self, visible_rows: &[T], checked: bool) {
        for row in visible_rows {
            self.toggle_row(row.row_id(), checked);
        }
    }

    pub fn select_all_state<T: TableRow>(&self, visible_rows: &[T]) -> SelectAllState {
        let count = visible_rows
            .iter()
            .filter(|row| self.is_selected(row.row_id()))
            .count();
        if count == 0 {
            SelectAllState::NoneSelected
        } else if count == visible_rows.len() {
            SelectAllState::AllSelected
        } else {
            SelectAllState::SomeSelected
        }
    }

    /// All selected ids, including rows outside the current window, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Forgets selected ids that are no longer part of `items`.
    pub fn retain_selection<T: TableRow>(&mut self, items: &[T]) {
        let present: HashSet<&str> = items.iter().map(|row| row.row_id()).collect();
        self.selected.retain(|id| present.contains(id.as_str()));
    }

    /// Selected records in collection order, computed on demand.
    pub fn selected_records<T: TableRow + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|row| self.is_selected(row.row_id()))
            .cloned()
            .collect()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }
}

/// Rows ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<T> {
    pub rows: Vec<T>,
    /// Rows left after filtering, before windowing.
    pub filtered_count: usize,
    pub page_count: usize,
    pub page_index: usize,
}

/// Filters, sorts and windows `items` according to `state`.
pub fn derive_view<T: Clone>(items: &[T], columns: &[ColumnDef<T>], state: &TableState) -> TableView<T> {
    let filters: Vec<(&ColumnDef<T>, String)> = state
        .filters
        .iter()
        .filter_map(|(id, text)| {
            columns
                .iter()
                .find(|c| c.id == id.as_str() && c.can_filter)
                .map(|c| (c, text.to_lowercase()))
        })
        .collect();

    let mut rows: Vec<T> = items
        .iter()
        .filter(|row| {
            filters
                .iter()
                .all(|(column, text)| column.value(row).to_lowercase().contains(text.as_str()))
        })
        .cloned()
        .collect();

    if let Some(sort) = &state.sort {
        if let Some(column) = columns.iter().find(|c| c.id == sort.field && c.can_sort) {
            let mut keyed: Vec<(String, T)> = rows
                .into_iter()
                .map(|row| (column.value(&row).to_lowercase(), row))
                .collect();
            // stable in both directions: equal keys keep their fetched order
            if sort.ascending {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            } else {
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
            }
            rows = keyed.into_iter().map(|(_, row)| row).collect();
        }
    }

    let filtered_count = rows.len();
    let page_count = total_pages(filtered_count, state.page_size);
    let page_index = state.page_index.min(page_count - 1);
    let start = page_index * state.page_size;
    let end = (start + state.page_size).min(filtered_count);

    TableView {
        rows: rows.get(start..end).unwrap_or(&[]).to_vec(),
        filtered_count,
        page_count,
        page_index,
    }
}
