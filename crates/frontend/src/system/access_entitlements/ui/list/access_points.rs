use contracts::shared::paging::PageRequest;
use contracts::system::access::{AccessEntitlement, AccessPoint, AccessPointsQuery};
use leptos::prelude::*;
use thaw::*;

use super::{EntitlementsModal, EntitlementsSession, ACCESS_POINTS_PAGE_LIMIT};
use crate::shared::collection::{BodyState, Collection};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    ColumnToggle, ColumnVisibilityMenu, SortableHeaderCell, TableStatusRow,
};
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::table_state::{derive_view, ColumnDef, TableRow, TableState};

impl TableRow for AccessPoint {
    fn row_id(&self) -> &str {
        &self.id
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

pub fn access_point_columns() -> Vec<ColumnDef<AccessPoint>> {
    vec![
        ColumnDef::new("access_point_name", "Access Point", |p: &AccessPoint| {
            p.access_point_name.clone()
        })
        .filterable()
        .pinned(),
        ColumnDef::new("description", "Description", |p: &AccessPoint| {
            p.description.clone().unwrap_or_default()
        }),
        ColumnDef::new("platform", "Platform", |p: &AccessPoint| {
            p.platform.clone().unwrap_or_default()
        })
        .filterable(),
        ColumnDef::new("access_point_type", "Type", |p: &AccessPoint| {
            p.access_point_type.clone().unwrap_or_default()
        }),
        ColumnDef::new("access_control", "Access Control", |p: &AccessPoint| yes_no(p.access_control)),
        ColumnDef::new("change_control", "Change Control", |p: &AccessPoint| yes_no(p.change_control)),
        ColumnDef::new("audit", "Audit", |p: &AccessPoint| yes_no(p.audit)),
        ColumnDef::new("created_on", "Created On", |p: &AccessPoint| format_timestamp(&p.created_on)),
    ]
}

/// Access points of the focused entitlement, with create and edit actions.
#[component]
pub fn AccessPointsEntitle(
    session: EntitlementsSession,
    focused: Memo<Option<AccessEntitlement>>,
    points: Collection<AccessPoint, AccessPointsQuery>,
    paging: RwSignal<PageRequest>,
    on_retry: Callback<()>,
) -> impl IntoView {
    let table = RwSignal::new(TableState::new(ACCESS_POINTS_PAGE_LIMIT));
    let columns = StoredValue::new(access_point_columns());

    let view_rows = Memo::new(move |_| {
        points.state().with(|s| {
            columns.with_value(|cols| table.with(|t| derive_view(&s.items, cols, t)))
        })
    });
    let visible_columns =
        move || columns.with_value(|cols| table.with(|t| t.visible_columns(cols)));
    let column_toggles: Vec<ColumnToggle> = columns.with_value(|cols| {
        cols.iter()
            .filter(|c| c.can_hide)
            .map(|c| ColumnToggle { id: c.id, label: c.header })
            .collect()
    });

    let has_focus = Signal::derive(move || focused.with(Option::is_some));
    let heading = move || match focused.get() {
        Some(e) => format!("Access Points: {}", e.entitlement_name),
        None => "Access Points".to_string(),
    };

    let change_page_size = move |size: usize| {
        table.update(|t| t.set_page_size(size));
        paging.set(PageRequest::new(1, size));
    };

    view! {
        <section class="page__section">
            <div class="table-toolbar">
                <h2 class="page__section-title">{heading}</h2>
                <div class="table-toolbar__actions">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(move || !has_focus.get())
                        on_click=move |_| {
                            if let Some(entitlement) = focused.get_untracked() {
                                session.open_modal_for(EntitlementsModal::EditEntitlement, entitlement);
                            }
                        }
                        attr:title="Edit entitlement"
                    >
                        {icon("edit")}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(move || !has_focus.get())
                        on_click=move |_| {
                            if let Some(entitlement) = focused.get_untracked() {
                                session.open_modal_for(EntitlementsModal::CreateAccessPoint, entitlement);
                            }
                        }
                        attr:title="Create access point"
                    >
                        {icon("plus")}
                    </Button>
                </div>
                <SearchInput
                    initial=String::new()
                    placeholder="Filter Access Point..."
                    on_change=Callback::new(move |text: String| {
                        table.update(|t| t.set_filter("access_point_name", &text))
                    })
                />
                <ColumnVisibilityMenu
                    columns=column_toggles
                    is_visible=Callback::new(move |id: &'static str| table.with(|t| t.is_column_visible(id)))
                    on_toggle=Callback::new(move |(id, visible): (&'static str, bool)| {
                        table.update(|t| t.set_column_visible(id, visible))
                    })
                />
            </div>

            <Show
                when=move || has_focus.get()
                fallback=|| view! {
                    <div class="page__hint">"Select an entitlement to see its access points."</div>
                }
            >
                {move || points.error().map(|e| view! {
                    <div class="alert alert--error">
                        <span>{e}</span>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_retry.run(())>
                            "Retry"
                        </Button>
                    </div>
                })}

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {move || visible_columns().into_iter().map(|column| view! {
                                <SortableHeaderCell
                                    label=column.header
                                    sort_field=column.id
                                    sortable=column.can_sort
                                    current_sort_field=Signal::derive(move || table.with(|t| t.sort_field()))
                                    sort_ascending=Signal::derive(move || table.with(|t| t.sort_ascending()))
                                    on_sort=Callback::new(move |field: String| table.update(|t| t.toggle_sort(&field)))
                                />
                            }).collect_view()}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let visible = visible_columns();
                            let colspan = visible.len();
                            let rows = view_rows.with(|v| v.rows.clone());
                            match points.body_state() {
                                BodyState::Rows if !rows.is_empty() => rows
                                    .into_iter()
                                    .map(|point| {
                                        let cells = visible
                                            .iter()
                                            .map(|column| {
                                                let value = column.value(&point);
                                                view! {
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{value}</TableCellLayout>
                                                </TableCell>
                                            }})
                                            .collect_view();
                                        view! { <TableRow>{cells}</TableRow> }
                                    })
                                    .collect_view()
                                    .into_any(),
                                BodyState::Rows => view! {
                                    <TableStatusRow state=BodyState::Empty colspan=colspan />
                                }.into_any(),
                                other => view! {
                                    <TableStatusRow state=other colspan=colspan />
                                }.into_any(),
                            }
                        }}
                    </TableBody>
                </Table>

                <PaginationControls
                    current_page=Signal::derive(move || points.state().with(|s| s.current_page))
                    total_pages=Signal::derive(move || points.state().with(|s| s.total_pages))
                    total_count=Signal::derive(move || points.state().with(|s| s.total_count))
                    page_size=Signal::derive(move || paging.with(|p| p.limit))
                    on_page_change=Callback::new(move |page: usize| paging.update(|p| p.page = page.max(1)))
                    on_page_size_change=Callback::new(change_page_size)
                />
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, name: &str, platform: &str) -> AccessPoint {
        AccessPoint {
            id: id.into(),
            entitlement_id: Some("e1".into()),
            access_point_name: name.into(),
            description: None,
            platform: Some(platform.into()),
            access_point_type: None,
            access_control: true,
            change_control: false,
            audit: true,
            created_on: "2024-01-02T09:30:00Z".into(),
        }
    }

    #[test]
    fn test_flags_render_as_yes_no() {
        let columns = access_point_columns();
        let p = point("a1", "GL read", "Oracle");
        let value = |id: &str| columns.iter().find(|c| c.id == id).unwrap().value(&p);
        assert_eq!(value("access_control"), "Yes");
        assert_eq!(value("change_control"), "No");
    }

    #[test]
    fn test_sort_by_name_descending() {
        let items = vec![point("a1", "b", "x"), point("a2", "a", "x"), point("a3", "c", "x")];
        let mut state = TableState::new(ACCESS_POINTS_PAGE_LIMIT);
        state.toggle_sort("access_point_name");
        state.toggle_sort("access_point_name");

        let view = derive_view(&items, &access_point_columns(), &state);
        let names: Vec<&str> = view.rows.iter().map(|p| p.access_point_name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }
}
