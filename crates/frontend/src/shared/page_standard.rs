//! Page category constants.
//!
//! Every screen declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"sys_users--list"`) and a `data-page-category` with one of these values.

/// List of records: table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// System administration page.
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("sys_users--list"));
        assert!(!is_valid_page_id("sys_users"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("sys_users--"));
    }
}
