use crate::layout::global_context::{AppGlobalContext, Screen};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar(ctx: AppGlobalContext) -> impl IntoView {
    view! {
        <nav data-zone="left" class="sidebar" class:hidden=move || !ctx.left_open.get()>
            <div class="sidebar__group-label">"Administration"</div>
            <ul class="sidebar__items">
                {Screen::ALL
                    .into_iter()
                    .map(|screen| {
                        let is_active = move || ctx.active.get() == screen;
                        view! {
                            <li>
                                <button
                                    class="sidebar__item"
                                    class:sidebar__item--active=is_active
                                    on:click=move |_| ctx.activate(screen)
                                >
                                    {icon(screen.icon())}
                                    <span>{screen.label()}</span>
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
