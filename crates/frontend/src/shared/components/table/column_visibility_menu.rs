use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// A hideable column as shown in the "Columns" menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnToggle {
    pub id: &'static str,
    pub label: &'static str,
}

/// "Columns" dropdown with one checkbox per hideable column.
#[component]
pub fn ColumnVisibilityMenu(
    columns: Vec<ColumnToggle>,

    /// Whether a column id is currently visible
    is_visible: Callback<&'static str, bool>,

    /// (column id, visible)
    on_toggle: Callback<(&'static str, bool)>,
) -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <div class="column-menu">
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| open.update(|v| *v = !*v)
            >
                "Columns "
                {icon("chevron-down")}
            </Button>
            <Show when=move || open.get()>
                <div class="column-menu__content">
                    {columns
                        .iter()
                        .map(|column| {
                            let id = column.id;
                            view! {
                                <label class="column-menu__item">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || is_visible.run(id)
                                        on:change=move |ev| on_toggle.run((id, event_target_checked(&ev)))
                                    />
                                    " "
                                    {column.label}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
