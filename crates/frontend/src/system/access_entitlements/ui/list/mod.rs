pub mod access_points;

use contracts::shared::paging::PageRequest;
use contracts::system::access::{AccessEntitlement, AccessPoint, AccessPointsQuery};
use leptos::prelude::*;
use thaw::*;

use self::access_points::AccessPointsEntitle;
use crate::shared::collection::{BodyState, Collection};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{SortableHeaderCell, TableStatusRow};
use crate::shared::date_utils::{format_date_opt, format_timestamp};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::session::{ModalKind, SessionContext};
use crate::shared::table_state::{derive_view, ColumnDef, TableRow, TableState};
use crate::system::access_entitlements::api;
use crate::system::access_entitlements::ui::details::{CreateAccessPointForm, EditEntitlementForm};

pub const ENTITLEMENTS_PAGE_LIMIT: usize = 10;
pub const ACCESS_POINTS_PAGE_LIMIT: usize = 5;
const TABLE_ID: &str = "access-entitlements-table";

/// Dialogs of the access entitlements screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntitlementsModal {
    #[default]
    Closed,
    CreateAccessPoint,
    EditEntitlement,
}

impl ModalKind for EntitlementsModal {
    fn title(&self) -> &'static str {
        match self {
            EntitlementsModal::Closed => "",
            EntitlementsModal::CreateAccessPoint => "Create Access Point",
            EntitlementsModal::EditEntitlement => "Edit Entitlement",
        }
    }

    fn needs_record(&self) -> bool {
        matches!(
            self,
            EntitlementsModal::CreateAccessPoint | EntitlementsModal::EditEntitlement
        )
    }
}

pub type EntitlementsSession = SessionContext<EntitlementsModal, AccessEntitlement>;

impl TableRow for AccessEntitlement {
    fn row_id(&self) -> &str {
        &self.id
    }
}

pub fn entitlement_columns() -> Vec<ColumnDef<AccessEntitlement>> {
    vec![
        ColumnDef::new("entitlement_name", "Entitlement Name", |e: &AccessEntitlement| {
            e.entitlement_name.clone()
        })
        .filterable()
        .pinned(),
        ColumnDef::new("description", "Description", |e: &AccessEntitlement| {
            e.description.clone().unwrap_or_default()
        }),
        ColumnDef::new("status", "Status", |e: &AccessEntitlement| e.status.clone()),
        ColumnDef::new("effective_date", "Effective Date", |e: &AccessEntitlement| {
            format_date_opt(e.effective_date.as_deref())
        }),
        ColumnDef::new("revision", "Revision", |e: &AccessEntitlement| e.revision.to_string()),
        ColumnDef::new("created_by", "Created By", |e: &AccessEntitlement| {
            e.created_by.clone().unwrap_or_default()
        }),
        ColumnDef::new("created_on", "Created On", |e: &AccessEntitlement| {
            format_timestamp(&e.created_on)
        }),
    ]
}

/// Query for the access points of the focused entitlement, if any.
pub fn focused_points_query(
    focused: Option<&AccessEntitlement>,
    paging: &PageRequest,
) -> Option<AccessPointsQuery> {
    focused.map(|e| AccessPointsQuery::new(paging.page, paging.limit, Some(e.id.clone())))
}

#[component]
pub fn AccessEntitlementsPage() -> impl IntoView {
    let session = EntitlementsSession::new(ENTITLEMENTS_PAGE_LIMIT);
    let entitlements = Collection::<AccessEntitlement, PageRequest>::new();
    let points = Collection::<AccessPoint, AccessPointsQuery>::new();
    let table = RwSignal::new(TableState::new(ENTITLEMENTS_PAGE_LIMIT));
    let columns = StoredValue::new(entitlement_columns());

    let points_paging = RwSignal::new(PageRequest::new(1, ACCESS_POINTS_PAGE_LIMIT));
    let dialog_paging = RwSignal::new(PageRequest::new(1, ACCESS_POINTS_PAGE_LIMIT));

    let query = Memo::new(move |_| session.page_request());
    let focused = Memo::new(move |_| session.selected());
    let modal = Memo::new(move |_| session.modal());
    let points_query = Memo::new(move |_| {
        focused.with(|f| points_paging.with(|p| focused_points_query(f.as_ref(), p)))
    });

    let load = move |request: PageRequest| {
        entitlements.fetch(request, api::fetch_entitlements, move |items| {
            table.update(|t| t.retain_selection(items));
            session.reconcile_selection(items);
        });
    };
    Effect::new(move |_| load(query.get()));
    let reload = move || load(query.get_untracked());

    let load_points = move |query: AccessPointsQuery| {
        points.fetch(query, api::fetch_access_points, |_| {});
    };
    Effect::new(move |_| {
        if let Some(q) = points_query.get() {
            load_points(q);
        }
    });
    let reload_points = move || {
        if let Some(q) = points_query.get_untracked() {
            load_points(q);
        }
    };

    Effect::new(move |_| {
        modal.track();
        focused.track();
        session.close_orphaned_modal();
    });

    let focus = move |entitlement: AccessEntitlement| {
        points_paging.update(|p| p.page = 1);
        session.set_selected(Some(entitlement));
    };

    let view_rows = Memo::new(move |_| {
        entitlements.state().with(|s| {
            columns.with_value(|cols| table.with(|t| derive_view(&s.items, cols, t)))
        })
    });
    let visible_columns =
        move || columns.with_value(|cols| table.with(|t| t.visible_columns(cols)));

    let change_page_size = move |size: usize| {
        table.update(|t| t.set_page_size(size));
        session.set_limit(size);
    };

    view! {
        <PageFrame page_id="access_entitlements--list" category=PAGE_CAT_LIST>
            {move || match modal.get() {
                EntitlementsModal::Closed => view! { <></> }.into_any(),
                EntitlementsModal::CreateAccessPoint => match focused.get() {
                    Some(entitlement) => view! {
                        <CreateAccessPointForm
                            session=session
                            entitlement=entitlement
                            on_created=Callback::new(move |_| reload_points())
                        />
                    }.into_any(),
                    None => view! { <></> }.into_any(),
                },
                EntitlementsModal::EditEntitlement => match focused.get() {
                    Some(entitlement) => view! {
                        <EditEntitlementForm
                            session=session
                            entitlement=entitlement
                            paging=dialog_paging
                            on_saved=Callback::new(move |_| {
                                reload();
                                reload_points();
                            })
                        />
                    }.into_any(),
                    None => view! { <></> }.into_any(),
                },
            }}

            <div class="page__header">
                <div class="page__header-left">
                    {icon("key")}
                    <h1 class="page__title">"Access Entitlements"</h1>
                    <Badge>{move || entitlements.state().with(|s| s.total_count).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=Signal::derive(move || entitlements.is_loading())
                    >
                        {icon("refresh")}
                        {move || if entitlements.is_loading() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || entitlements.error().map(|e| view! {
                    <div class="alert alert--error">
                        <span>{e}</span>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| reload()>
                            "Retry"
                        </Button>
                    </div>
                })}

                <div class="table-toolbar">
                    <SearchInput
                        initial=table.with_untracked(|t| t.filter_value("entitlement_name"))
                        placeholder="Filter Entitlement Name..."
                        on_change=Callback::new(move |text: String| {
                            table.update(|t| t.set_filter("entitlement_name", &text))
                        })
                    />
                </div>

                <div class=move || {
                    if entitlements.is_loading() { "table-wrapper table-wrapper--loading" } else { "table-wrapper" }
                }>
                    <Table attr:id=TABLE_ID attr:style="width: 100%;">
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
                                match entitlements.body_state() {
                                    BodyState::Rows if !rows.is_empty() => rows
                                        .into_iter()
                                        .map(|entitlement| {
                                            let id = entitlement.id.clone();
                                            let is_focused = move || {
                                                focused.with(|f| f.as_ref().is_some_and(|e| e.id == id))
                                            };
                                            let cells = visible
                                                .iter()
                                                .map(|column| {
                                                    let value = column.value(&entitlement);
                                                    view! {
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>{value}</TableCellLayout>
                                                    </TableCell>
                                                }})
                                                .collect_view();
                                            view! {
                                                <TableRow
                                                    attr:class=move || if is_focused() { "table__row table__row--focused" } else { "table__row" }
                                                    on:click=move |_| focus(entitlement.clone())
                                                >
                                                    {cells}
                                                </TableRow>
                                            }
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
                        current_page=Signal::derive(move || entitlements.state().with(|s| s.current_page))
                        total_pages=Signal::derive(move || entitlements.state().with(|s| s.total_pages))
                        total_count=Signal::derive(move || entitlements.state().with(|s| s.total_count))
                        page_size=Signal::derive(move || session.limit())
                        on_page_change=Callback::new(move |page| session.set_page(page))
                        on_page_size_change=Callback::new(change_page_size)
                    />
                </div>

                <AccessPointsEntitle
                    session=session
                    focused=focused
                    points=points
                    paging=points_paging
                    on_retry=Callback::new(move |_| reload_points())
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::session::SessionState;

    fn entitlement(id: &str, name: &str) -> AccessEntitlement {
        AccessEntitlement {
            id: id.into(),
            entitlement_name: name.into(),
            description: None,
            comments: None,
            status: "Active".into(),
            effective_date: None,
            revision: 2,
            created_by: Some("admin".into()),
            created_on: "2024-01-02T09:30:00Z".into(),
        }
    }

    #[test]
    fn test_focused_points_query() {
        let paging = PageRequest::new(3, ACCESS_POINTS_PAGE_LIMIT);
        assert_eq!(focused_points_query(None, &paging), None);

        let e = entitlement("e1", "Finance");
        let query = focused_points_query(Some(&e), &paging).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 5);
        assert_eq!(query.entitlement_id.as_deref(), Some("e1"));
    }

    #[test]
    fn test_entitlement_column_values() {
        let columns = entitlement_columns();
        let value = |id: &str| columns.iter().find(|c| c.id == id).unwrap().value(&entitlement("e1", "Finance"));
        assert_eq!(value("revision"), "2");
        assert_eq!(value("effective_date"), "-");
        assert_eq!(value("created_on"), "2024-01-02 09:30");
    }

    #[test]
    fn test_modal_titles() {
        assert!(!EntitlementsModal::Closed.is_open());
        assert_eq!(EntitlementsModal::EditEntitlement.title(), "Edit Entitlement");
        assert_eq!(EntitlementsModal::CreateAccessPoint.title(), "Create Access Point");
    }

    #[test]
    fn test_dialogs_close_when_focused_entitlement_disappears() {
        let mut state: SessionState<EntitlementsModal, AccessEntitlement> =
            SessionState::new(ENTITLEMENTS_PAGE_LIMIT);
        let focused = entitlement("e1", "Finance");
        state.set_selected(Some(focused.clone()));

        for modal in [EntitlementsModal::CreateAccessPoint, EntitlementsModal::EditEntitlement] {
            state.open_modal_for(modal, focused.clone());
            state.reconcile_selection(&[entitlement("e2", "Payroll")]);
            assert!(!state.modal().is_open());
            assert!(state.selected().is_none());
            state.set_selected(Some(focused.clone()));
        }
        assert!(!EntitlementsModal::Closed.needs_record());
    }
}
