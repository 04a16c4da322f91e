use crate::layout::global_context::{AppGlobalContext, Screen};
use crate::layout::Shell;
use crate::system::access_entitlements::ui::list::AccessEntitlementsPage;
use crate::system::users::ui::list::UsersTablePage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppGlobalContext::new();
    ctx.init_router_integration();

    // Switching screens unmounts the previous one, which drops its session and collections.
    view! {
        <Shell ctx=ctx>
            {move || match ctx.active.get() {
                Screen::Users => view! { <UsersTablePage /> }.into_any(),
                Screen::AccessEntitlements => view! { <AccessEntitlementsPage /> }.into_any(),
            }}
        </Shell>
    }
}
