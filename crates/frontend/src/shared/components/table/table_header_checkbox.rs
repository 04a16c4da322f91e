//! Header checkbox that selects or clears every visible row.
//!
//! ```rust,ignore
//! <TableHeaderCheckbox
//!     state=Signal::derive(move || table.with(|t| t.select_all_state(&view.get().rows)))
//!     on_change=Callback::new(move |check_all: bool| { /* ... */ })
//! />
//! ```

use leptos::prelude::*;
use thaw::*;

use crate::shared::table_state::SelectAllState;

/// Renders the tri-state header checkbox.
///
/// "Some selected" is shown through the input's `indeterminate` DOM property,
/// which has no HTML attribute and has to be set on the element.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    state: Signal<SelectAllState>,

    /// `true` = select all visible rows, `false` = clear them
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let indeterminate = state.get() == SelectAllState::SomeSelected;
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(indeterminate);
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                aria-label="Select all"
                prop:checked=move || state.get() == SelectAllState::AllSelected
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
