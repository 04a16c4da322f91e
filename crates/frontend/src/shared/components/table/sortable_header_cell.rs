use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Header cell that toggles sorting on click and shows the ▲▼ indicator.
///
/// Columns that cannot be sorted render as a plain header.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    #[prop(into)]
    sort_field: String,

    #[prop(into)]
    current_sort_field: Signal<String>,

    #[prop(into)]
    sort_ascending: Signal<bool>,

    on_sort: Callback<String>,

    #[prop(optional, default = true)]
    sortable: bool,

    #[prop(optional, default = 100.0)]
    min_width: f64,
) -> impl IntoView {
    if !sortable {
        return view! {
            <TableHeaderCell resizable=false min_width=min_width>
                {label}
            </TableHeaderCell>
        }
        .into_any();
    }

    let field_for_click = sort_field.clone();
    let field_for_class = sort_field.clone();
    let field_for_indicator = sort_field;

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=move |_| on_sort.run(field_for_click.clone())
            >
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), &field_for_class)>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &field_for_indicator,
                            sort_ascending.get(),
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
    .into_any()
}
