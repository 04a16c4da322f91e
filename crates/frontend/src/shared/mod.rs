pub mod api_utils;
pub mod collection;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod modal_frame;
pub mod page_frame;
pub mod page_standard;
pub mod session;
pub mod table_state;
