pub mod global_context;
pub mod sidebar;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use sidebar::Sidebar;

use crate::shared::icons::icon;

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |               Top bar                    |
/// +------------------------------------------+
/// |  Sidebar  |           Content            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(ctx: AppGlobalContext, children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="top-header">
                <button class="top-header__toggle" on:click=move |_| ctx.toggle_left() title="Toggle menu">
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Access Administration"</span>
            </header>

            <div class="app-body">
                <Sidebar ctx=ctx />
                <main class="app-main">
                    {children()}
                </main>
            </div>
        </div>
    }
}
