use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

/// Dialog with a title bar and a close (×) button. Escape and overlay clicks close it too.
#[component]
pub fn Modal(
    #[prop(into)]
    title: Signal<String>,
    on_close: Callback<()>,
    #[prop(optional)]
    modal_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let keydown = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || keydown.remove());

    view! {
        <ModalFrame on_close=on_close modal_class=modal_class.unwrap_or("modal--form")>
            <div class="modal-header">
                <h2 class="modal-title">{move || title.get()}</h2>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_close.run(())
                    attr:title="Close"
                >
                    {icon("x")}
                </Button>
            </div>
            <div class="modal-body">
                {children()}
            </div>
        </ModalFrame>
    }
}
