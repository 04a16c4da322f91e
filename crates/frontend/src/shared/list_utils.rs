//! Shared bits for list screens: sort indicators and the debounced filter input.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const FILTER_DEBOUNCE_MS: u32 = 300;

/// Sort indicator for a header.
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// CSS class for the sort indicator span.
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Text input that reports its value after the user stops typing.
#[component]
pub fn SearchInput(
    /// Value the input starts with
    #[prop(into)]
    initial: String,
    /// Called with the settled value
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let input_value = RwSignal::new(initial);
    // Only the latest keystroke may fire on_change.
    let keystroke = StoredValue::new(0u64);

    let handle_input = move |value: String| {
        input_value.set(value.clone());
        keystroke.update_value(|n| *n += 1);
        let mine = keystroke.get_value();
        spawn_local(async move {
            TimeoutFuture::new(FILTER_DEBOUNCE_MS).await;
            if keystroke.try_get_value() == Some(mine) {
                on_change.run(value);
            }
        });
    };

    let clear = move |_| {
        input_value.set(String::new());
        keystroke.update_value(|n| *n += 1);
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("email", "name", true), " ⇅");
    }

    #[test]
    fn test_sort_class() {
        assert!(get_sort_class("name", "name").ends_with("--active"));
        assert_eq!(get_sort_class("", "name"), "table__sort-indicator");
    }
}
