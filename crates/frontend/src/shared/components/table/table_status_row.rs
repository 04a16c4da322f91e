use leptos::prelude::*;
use thaw::*;

use crate::shared::collection::BodyState;

pub const NO_RESULTS: &str = "No results.";
/// The error message itself lives in the screen's alert banner.
pub const NOT_LOADED: &str = "Nothing loaded.";

/// Text of the single placeholder row, or `None` when real rows should render.
pub fn status_text(state: &BodyState) -> Option<String> {
    match state {
        BodyState::Loading => Some("Loading...".to_string()),
        BodyState::Error(_) => Some(NOT_LOADED.to_string()),
        BodyState::Empty => Some(NO_RESULTS.to_string()),
        BodyState::Rows => None,
    }
}

/// Full-width placeholder row for loading, error and empty states.
#[component]
pub fn TableStatusRow(state: BodyState, colspan: usize) -> impl IntoView {
    let colspan = colspan.max(1).to_string();
    let text = status_text(&state).unwrap_or_default();

    let content = match state {
        BodyState::Loading => view! {
            <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                <Spinner />
                {text}
            </Flex>
        }
        .into_any(),
        BodyState::Error(_) => view! { <span class="table__status table__status--error">{text}</span> }.into_any(),
        _ => view! { <span class="table__status">{text}</span> }.into_any(),
    };

    view! {
        <TableRow>
            <TableCell attr:colspan=colspan attr:style="height: 96px; text-align: center;">
                {content}
            </TableCell>
        </TableRow>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_no_results() {
        assert_eq!(status_text(&BodyState::Empty).as_deref(), Some("No results."));
    }

    #[test]
    fn test_rows_render_no_placeholder() {
        assert!(status_text(&BodyState::Rows).is_none());
    }

    #[test]
    fn test_error_row_does_not_repeat_banner_message() {
        let text = status_text(&BodyState::Error("Failed to load users: 500".into()));
        assert_eq!(text.as_deref(), Some(NOT_LOADED));
    }
}
