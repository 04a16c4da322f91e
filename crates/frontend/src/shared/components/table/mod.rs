pub mod column_visibility_menu;
pub mod sortable_header_cell;
pub mod table_cell_checkbox;
pub mod table_header_checkbox;
pub mod table_status_row;

pub use column_visibility_menu::{ColumnToggle, ColumnVisibilityMenu};
pub use sortable_header_cell::SortableHeaderCell;
pub use table_cell_checkbox::TableCellCheckbox;
pub use table_header_checkbox::TableHeaderCheckbox;
pub use table_status_row::{TableStatusRow, NO_RESULTS};
