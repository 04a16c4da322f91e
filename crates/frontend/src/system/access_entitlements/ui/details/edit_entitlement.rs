use std::collections::BTreeMap;

use contracts::shared::paging::PageRequest;
use contracts::system::access::{
    AccessEntitlement, AccessPoint, AccessPointsQuery, UpdateEntitlementAccessPointsDto,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::collection::{BodyState, Collection};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{TableCellCheckbox, TableHeaderCheckbox, TableStatusRow};
use crate::shared::modal::Modal;
use crate::shared::table_state::{derive_view, ColumnDef, TableState};
use crate::system::access_entitlements::api;
use crate::system::access_entitlements::ui::list::access_points::access_point_columns;
use crate::system::access_entitlements::ui::list::{EntitlementsSession, ACCESS_POINTS_PAGE_LIMIT};

/// Link state each access point had when the dialog first showed it.
#[derive(Debug, Clone, Default)]
pub struct LinkTracker {
    initial: BTreeMap<String, bool>,
}

impl LinkTracker {
    /// Remembers rows not seen before. Returns the ids among them that start out linked.
    pub fn observe(&mut self, entitlement_id: &str, items: &[AccessPoint]) -> Vec<String> {
        let mut linked = Vec::new();
        for item in items {
            if self.initial.contains_key(&item.id) {
                continue;
            }
            let is_linked = item.entitlement_id.as_deref() == Some(entitlement_id);
            self.initial.insert(item.id.clone(), is_linked);
            if is_linked {
                linked.push(item.id.clone());
            }
        }
        linked
    }

    pub fn diff(&self, table: &TableState) -> UpdateEntitlementAccessPointsDto {
        let mut dto = UpdateEntitlementAccessPointsDto::default();
        for (id, &was_linked) in &self.initial {
            match (was_linked, table.is_selected(id)) {
                (false, true) => dto.link_ids.push(id.clone()),
                (true, false) => dto.unlink_ids.push(id.clone()),
                _ => {}
            }
        }
        dto
    }
}

fn dialog_columns() -> Vec<ColumnDef<AccessPoint>> {
    access_point_columns()
        .into_iter()
        .filter(|c| matches!(c.id, "access_point_name" | "platform" | "access_point_type"))
        .collect()
}

/// Links and unlinks access points of one entitlement.
///
/// The list pages through every access point. Rows already linked start checked;
/// saving sends only what changed.
#[component]
pub fn EditEntitlementForm(
    session: EntitlementsSession,
    entitlement: AccessEntitlement,
    /// Paging of the dialog's list; cancel resets it to the first page.
    paging: RwSignal<PageRequest>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let points = Collection::<AccessPoint, AccessPointsQuery>::new();
    let table = RwSignal::new(TableState::new(paging.with_untracked(|p| p.limit)));
    let tracker = StoredValue::new(LinkTracker::default());
    let columns = StoredValue::new(dialog_columns());
    let entitlement_id = StoredValue::new(entitlement.id.clone());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_saving = RwSignal::new(false);

    let query = Memo::new(move |_| paging.with(|p| AccessPointsQuery::new(p.page, p.limit, None)));
    let load = move |q: AccessPointsQuery| {
        points.fetch(q, api::fetch_access_points, move |items| {
            let linked = entitlement_id.with_value(|id| {
                tracker.try_update_value(|t| t.observe(id, items)).unwrap_or_default()
            });
            if !linked.is_empty() {
                table.update(|t| {
                    for id in &linked {
                        t.toggle_row(id, true);
                    }
                });
            }
        });
    };
    Effect::new(move |_| load(query.get()));

    let reset_paging = move || paging.set(PageRequest::new(1, ACCESS_POINTS_PAGE_LIMIT));

    let cancel = Callback::new(move |_: ()| {
        if is_saving.get_untracked() {
            return;
        }
        reset_paging();
        session.close_modal();
    });

    let save = move |_| {
        let dto = tracker.with_value(|t| table.with_untracked(|s| t.diff(s)));
        if dto.is_empty() {
            reset_paging();
            session.close_modal();
            return;
        }

        is_saving.set(true);
        error_message.set(None);
        let id = entitlement_id.get_value();
        spawn_local(async move {
            match api::update_entitlement_access_points(&id, dto).await {
                Ok(()) => {
                    log::info!("access points of entitlement {} updated", id);
                    on_saved.run(());
                    reset_paging();
                    session.close_modal();
                }
                Err(e) => {
                    error_message.set(Some(e));
                    is_saving.set(false);
                }
            }
        });
    };

    let view_rows = Memo::new(move |_| {
        points.state().with(|s| {
            columns.with_value(|cols| table.with(|t| derive_view(&s.items, cols, t)))
        })
    });
    let select_all_state =
        Signal::derive(move || view_rows.with(|v| table.with(|t| t.select_all_state(&v.rows))));
    let toggle_all = Callback::new(move |checked: bool| {
        view_rows.with_untracked(|v| table.update(|t| t.toggle_all_visible(&v.rows, checked)));
    });

    let title = format!("Entitlement Name: {}", entitlement.entitlement_name);
    let colspan = columns.with_value(|cols| cols.len()) + 1;

    view! {
        <Modal title=title on_close=cancel modal_class="modal--wide">
            <Show when=move || error_message.get().is_some()>
                <div class="error-message">
                    {move || error_message.get().unwrap_or_default()}
                </div>
            </Show>

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCheckbox state=select_all_state on_change=toggle_all />
                        {columns.with_value(|cols| cols.iter().map(|c| {
                            let header = c.header;
                            view! {
                            <TableHeaderCell resizable=false>{header}</TableHeaderCell>
                        }}).collect_view())}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = view_rows.with(|v| v.rows.clone());
                        match points.body_state() {
                            BodyState::Rows if !rows.is_empty() => rows
                                .into_iter()
                                .map(|point| {
                                    let id_for_checked = point.id.clone();
                                    let id_for_change = point.id.clone();
                                    let cells = columns.with_value(|cols| cols.iter().map(|c| {
                                        let value = c.value(&point);
                                        view! {
                                        <TableCell>
                                            <TableCellLayout truncate=true>{value}</TableCellLayout>
                                        </TableCell>
                                    }}).collect_view());
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                checked=Signal::derive(move || table.with(|t| t.is_selected(&id_for_checked)))
                                                on_change=Callback::new(move |checked| table.update(|t| t.toggle_row(&id_for_change, checked)))
                                            />
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
                current_page=Signal::derive(move || points.state().with(|s| s.current_page))
                total_pages=Signal::derive(move || points.state().with(|s| s.total_pages))
                total_count=Signal::derive(move || points.state().with(|s| s.total_count))
                page_size=Signal::derive(move || paging.with(|p| p.limit))
                on_page_change=Callback::new(move |page: usize| paging.update(|p| p.page = page.max(1)))
                on_page_size_change=Callback::new(move |size: usize| {
                    table.update(|t| t.set_page_size(size));
                    paging.set(PageRequest::new(1, size));
                })
                page_size_options=vec![5, 10, 25]
            />

            <div class="form-actions">
                <span class="form-actions__note">
                    {move || format!("{} selected", table.with(|t| t.selected_count()))}
                </span>
                <button
                    type="button"
                    class="btn-secondary"
                    on:click=move |_| cancel.run(())
                    disabled=move || is_saving.get()
                >
                    "Cancel"
                </button>
                <button type="button" class="btn-primary" on:click=save disabled=move || is_saving.get()>
                    {move || if is_saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </Modal>
    }
}
