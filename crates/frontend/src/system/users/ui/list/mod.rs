use contracts::shared::paging::PageRequest;
use contracts::system::users::User;
use leptos::prelude::*;
use thaw::*;

use crate::shared::collection::{BodyState, Collection};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    ColumnToggle, ColumnVisibilityMenu, SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
    TableStatusRow,
};
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::session::{ModalKind, SessionContext};
use crate::shared::table_state::{derive_view, ColumnDef, TableRow, TableState};
use crate::system::users::api;
use crate::system::users::ui::details::AddUserForm;

pub const USERS_PAGE_LIMIT: usize = 10;
const TABLE_ID: &str = "sys-users-table";

/// Dialogs of the users screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsersModal {
    #[default]
    Closed,
    CreateUser,
}

impl ModalKind for UsersModal {
    fn title(&self) -> &'static str {
        match self {
            UsersModal::Closed => "",
            UsersModal::CreateUser => "Add User",
        }
    }
}

pub type UsersSession = SessionContext<UsersModal, User>;

impl TableRow for User {
    fn row_id(&self) -> &str {
        &self.id
    }
}

pub fn user_columns() -> Vec<ColumnDef<User>> {
    vec![
        ColumnDef::new("user_name", "User Name", |u: &User| u.user_name.clone())
            .filterable()
            .pinned(),
        ColumnDef::new("full_name", "Full Name", |u: &User| u.display_name()),
        ColumnDef::new("email", "Email", |u: &User| u.email.clone().unwrap_or_default()),
        ColumnDef::new("job_title", "Job Title", |u: &User| {
            u.job_title.clone().unwrap_or_default()
        }),
        ColumnDef::new("status", "Status", |u: &User| {
            if u.is_active { "Active" } else { "Inactive" }.to_string()
        }),
        ColumnDef::new("created_at", "Created", |u: &User| format_timestamp(&u.created_at)),
    ]
}

#[component]
pub fn UsersTablePage() -> impl IntoView {
    let session = UsersSession::new(USERS_PAGE_LIMIT);
    let users = Collection::<User, PageRequest>::new();
    let table = RwSignal::new(TableState::new(USERS_PAGE_LIMIT));
    let columns = StoredValue::new(user_columns());

    // Every input of the request lives in the session, so one memo covers page and limit.
    let query = Memo::new(move |_| session.page_request());
    let modal = Memo::new(move |_| session.modal());

    let load = move |request: PageRequest| {
        users.fetch(request, api::fetch_users, move |items| {
            table.update(|t| t.retain_selection(items));
            session.reconcile_selection(items);
        });
    };
    Effect::new(move |_| load(query.get()));
    let reload = move || load(query.get_untracked());

    let view_rows = Memo::new(move |_| {
        users.state().with(|s| {
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

    let select_all_state =
        Signal::derive(move || view_rows.with(|v| table.with(|t| t.select_all_state(&v.rows))));

    let toggle_all = move |checked: bool| {
        view_rows.with_untracked(|v| table.update(|t| t.toggle_all_visible(&v.rows, checked)));
        let selected = users
            .state()
            .with_untracked(|s| table.with_untracked(|t| t.selected_records(&s.items)));
        log::debug!("users selected: {}", selected.len());
    };

    let change_page_size = move |size: usize| {
        table.update(|t| t.set_page_size(size));
        session.set_limit(size);
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            {move || match modal.get() {
                UsersModal::Closed => view! { <></> }.into_any(),
                UsersModal::CreateUser => view! {
                    <AddUserForm
                        session=session
                        on_created=Callback::new(move |_| {
                            session.set_page(1);
                            reload();
                        })
                    />
                }.into_any(),
            }}

            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"Users"</h1>
                    <Badge>{move || users.state().with(|s| s.total_count).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=Signal::derive(move || users.is_loading())
                    >
                        {icon("refresh")}
                        {move || if users.is_loading() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || users.error().map(|e| view! {
                    <div class="alert alert--error">
                        <span>{e}</span>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| reload()>
                            "Retry"
                        </Button>
                    </div>
                })}

                <div class="table-toolbar">
                    <div class="table-toolbar__actions">
                        <Button appearance=ButtonAppearance::Subtle disabled=true attr:title="Edit">
                            {icon("edit")}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| session.open_modal(UsersModal::CreateUser)
                            attr:title="Add user"
                        >
                            {icon("plus")}
                        </Button>
                    </div>
                    <SearchInput
                        initial=table.with_untracked(|t| t.filter_value("user_name"))
                        placeholder="Filter User Name..."
                        on_change=Callback::new(move |text: String| {
                            table.update(|t| t.set_filter("user_name", &text))
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

                <div class=move || {
                    if users.is_loading() { "table-wrapper table-wrapper--loading" } else { "table-wrapper" }
                }>
                    <Table attr:id=TABLE_ID attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    state=select_all_state
                                    on_change=Callback::new(toggle_all)
                                />
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
                                let colspan = visible.len() + 1;
                                let rows = view_rows.with(|v| v.rows.clone());
                                match users.body_state() {
                                    BodyState::Rows if !rows.is_empty() => rows
                                        .into_iter()
                                        .map(|user| user_row(user, &visible, table))
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
                        current_page=Signal::derive(move || users.state().with(|s| s.current_page))
                        total_pages=Signal::derive(move || users.state().with(|s| s.total_pages))
                        total_count=Signal::derive(move || users.state().with(|s| s.total_count))
                        page_size=Signal::derive(move || session.limit())
                        on_page_change=Callback::new(move |page| session.set_page(page))
                        on_page_size_change=Callback::new(change_page_size)
                    />
                </div>
            </div>
        </PageFrame>
    }
}

fn user_row(user: User, columns: &[ColumnDef<User>], table: RwSignal<TableState>) -> AnyView {
    let id_for_checked = user.id.clone();
    let id_for_change = user.id.clone();
    let id_for_state = user.id.clone();

    let cells = columns
        .iter()
        .map(|column| {
            let value = column.value(&user);
            view! {
                <TableCell>
                    <TableCellLayout truncate=true>{value}</TableCellLayout>
                </TableCell>
            }
        })
        .collect_view();

    view! {
        <TableRow attr:data-state=move || {
            if table.with(|t| t.is_selected(&id_for_state)) { "selected" } else { "" }
        }>
            <TableCellCheckbox
                checked=Signal::derive(move || table.with(|t| t.is_selected(&id_for_checked)))
                on_change=Callback::new(move |checked| table.update(|t| t.toggle_row(&id_for_change, checked)))
            />
            {cells}
        </TableRow>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, user_name: &str, active: bool) -> User {
        User {
            id: id.into(),
            user_name: user_name.into(),
            first_name: Some("Ann".into()),
            middle_name: None,
            last_name: Some("Lee".into()),
            email: None,
            job_title: None,
            is_active: active,
            created_at: "2024-03-15T14:02:26Z".into(),
        }
    }

    #[test]
    fn test_user_name_column_is_filterable_and_pinned() {
        let columns = user_columns();
        let name = columns.iter().find(|c| c.id == "user_name").unwrap();
        assert!(name.can_filter);
        assert!(!name.can_hide);
        assert!(columns.iter().filter(|c| c.id != "user_name").all(|c| c.can_hide));
    }

    #[test]
    fn test_column_values() {
        let columns = user_columns();
        let value = |id: &str, u: &User| columns.iter().find(|c| c.id == id).unwrap().value(u);

        let u = user("1", "alee", false);
        assert_eq!(value("full_name", &u), "Ann Lee");
        assert_eq!(value("status", &u), "Inactive");
        assert_eq!(value("created_at", &u), "2024-03-15 14:02");
        assert_eq!(value("email", &u), "");
    }

    #[test]
    fn test_user_name_filter() {
        let items = vec![user("1", "alee", true), user("2", "bkim", true), user("3", "aleon", true)];
        let mut state = TableState::new(USERS_PAGE_LIMIT);
        state.set_filter("user_name", "ALE");

        let view = derive_view(&items, &user_columns(), &state);
        let ids: Vec<&str> = view.rows.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_modal_titles() {
        assert!(!UsersModal::Closed.is_open());
        assert!(UsersModal::CreateUser.is_open());
        assert_eq!(UsersModal::CreateUser.title(), "Add User");
    }
}
