use contracts::system::access::{AccessEntitlement, CreateAccessPointDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::modal::Modal;
use crate::shared::session::ModalKind;
use crate::system::access_entitlements::api;
use crate::system::access_entitlements::ui::list::{EntitlementsModal, EntitlementsSession};

#[derive(Debug, Clone, Default)]
pub struct AccessPointFormInput {
    pub access_point_name: String,
    pub description: String,
    pub platform: String,
    pub access_point_type: String,
    pub access_control: bool,
    pub change_control: bool,
    pub audit: bool,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl AccessPointFormInput {
    pub fn to_dto(&self, entitlement_id: &str) -> Result<CreateAccessPointDto, String> {
        let name = self.access_point_name.trim();
        if name.is_empty() {
            return Err("Access point name is required".to_string());
        }
        Ok(CreateAccessPointDto {
            entitlement_id: Some(entitlement_id.to_string()),
            access_point_name: name.to_string(),
            description: optional(&self.description),
            platform: optional(&self.platform),
            access_point_type: optional(&self.access_point_type),
            access_control: self.access_control,
            change_control: self.change_control,
            audit: self.audit,
        })
    }
}

#[component]
fn TextField(label: &'static str, id: &'static str, value: RwSignal<String>, disabled: Signal<bool>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type="text"
                id=id
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || disabled.get()
            />
        </div>
    }
}

#[component]
fn FlagField(label: &'static str, value: RwSignal<bool>, disabled: Signal<bool>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || value.get()
                    on:change=move |ev| value.set(event_target_checked(&ev))
                    disabled=move || disabled.get()
                />
                " "{label}
            </label>
        </div>
    }
}

/// Creates an access point under the focused entitlement.
#[component]
pub fn CreateAccessPointForm(
    session: EntitlementsSession,
    entitlement: AccessEntitlement,
    on_created: Callback<()>,
) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let platform = RwSignal::new(String::new());
    let access_point_type = RwSignal::new(String::new());
    let access_control = RwSignal::new(false);
    let change_control = RwSignal::new(false);
    let audit = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);
    let is_saving = RwSignal::new(false);
    let saving = Signal::derive(move || is_saving.get());
    let entitlement_id = StoredValue::new(entitlement.id.clone());

    let cancel = Callback::new(move |_: ()| {
        if !is_saving.get_untracked() {
            session.close_modal();
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let input = AccessPointFormInput {
            access_point_name: name.get_untracked(),
            description: description.get_untracked(),
            platform: platform.get_untracked(),
            access_point_type: access_point_type.get_untracked(),
            access_control: access_control.get_untracked(),
            change_control: change_control.get_untracked(),
            audit: audit.get_untracked(),
        };
        let dto = match entitlement_id.with_value(|id| input.to_dto(id)) {
            Ok(dto) => dto,
            Err(e) => {
                error_message.set(Some(e));
                return;
            }
        };

        is_saving.set(true);
        error_message.set(None);

        spawn_local(async move {
            match api::create_access_point(dto).await {
                Ok(id) => {
                    log::info!("access point created: {}", id);
                    on_created.run(());
                    session.close_modal();
                }
                Err(e) => {
                    error_message.set(Some(e));
                    is_saving.set(false);
                }
            }
        });
    };

    let title = format!(
        "{}: {}",
        EntitlementsModal::CreateAccessPoint.title(),
        entitlement.entitlement_name
    );

    view! {
        <Modal title=title on_close=cancel>
            <Show when=move || error_message.get().is_some()>
                <div class="error-message">
                    {move || error_message.get().unwrap_or_default()}
                </div>
            </Show>

            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="access_point_name">"Access Point Name *"</label>
                    <input
                        type="text"
                        id="access_point_name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        required
                        disabled=move || is_saving.get()
                    />
                </div>
                <TextField label="Description" id="description" value=description disabled=saving />
                <TextField label="Platform" id="platform" value=platform disabled=saving />
                <TextField label="Type" id="access_point_type" value=access_point_type disabled=saving />
                <FlagField label="Access Control" value=access_control disabled=saving />
                <FlagField label="Change Control" value=change_control disabled=saving />
                <FlagField label="Audit" value=audit disabled=saving />

                <div class="form-actions">
                    <button
                        type="button"
                        class="btn-secondary"
                        on:click=move |_| cancel.run(())
                        disabled=move || is_saving.get()
                    >
                        "Cancel"
                    </button>
                    <button type="submit" class="btn-primary" disabled=move || is_saving.get()>
                        {move || if is_saving.get() { "Saving..." } else { "Create" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dto_links_to_entitlement() {
        let input = AccessPointFormInput {
            access_point_name: " GL read ".into(),
            platform: "Oracle".into(),
            audit: true,
            ..Default::default()
        };
        let dto = input.to_dto("e1").unwrap();
        assert_eq!(dto.entitlement_id.as_deref(), Some("e1"));
        assert_eq!(dto.access_point_name, "GL read");
        assert_eq!(dto.platform.as_deref(), Some("Oracle"));
        assert_eq!(dto.description, None);
        assert!(dto.audit);
    }

    #[test]
    fn test_to_dto_requires_name() {
        let input = AccessPointFormInput::default();
        assert!(input.to_dto("e1").is_err());
    }
}
