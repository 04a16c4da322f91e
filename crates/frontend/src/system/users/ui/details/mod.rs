use contracts::system::users::CreateUserDto;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::modal::Modal;
use crate::shared::session::ModalKind;
use crate::system::users::api;
use crate::system::users::ui::list::{UsersModal, UsersSession};

/// Raw text of the add-user form.
#[derive(Debug, Clone, Default)]
pub struct UserFormInput {
    pub user_name: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub job_title: String,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl UserFormInput {
    pub fn to_dto(&self) -> Result<CreateUserDto, String> {
        let user_name = self.user_name.trim();
        if user_name.is_empty() {
            return Err("User name is required".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        if let Some(email) = optional(&self.email) {
            if !email.contains('@') {
                return Err("Email is not valid".to_string());
            }
        }

        Ok(CreateUserDto {
            user_name: user_name.to_string(),
            password: self.password.clone(),
            email: optional(&self.email),
            first_name: optional(&self.first_name),
            middle_name: optional(&self.middle_name),
            last_name: optional(&self.last_name),
            job_title: optional(&self.job_title),
        })
    }
}

#[component]
fn FormField(
    label: &'static str,
    id: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] required: bool,
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}{required.then_some(" *")}</label>
            <input
                type=input_type.unwrap_or("text")
                id=id
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                required=required
                disabled=move || disabled.get()
            />
        </div>
    }
}

/// Add-user dialog. Closes itself on success or cancel.
#[component]
pub fn AddUserForm(session: UsersSession, on_created: Callback<()>) -> impl IntoView {
    let user_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let middle_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let job_title = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_saving = RwSignal::new(false);
    let saving = Signal::derive(move || is_saving.get());

    let cancel = Callback::new(move |_: ()| {
        if !is_saving.get_untracked() {
            session.close_modal();
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let input = UserFormInput {
            user_name: user_name.get_untracked(),
            password: password.get_untracked(),
            email: email.get_untracked(),
            first_name: first_name.get_untracked(),
            middle_name: middle_name.get_untracked(),
            last_name: last_name.get_untracked(),
            job_title: job_title.get_untracked(),
        };
        let dto = match input.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                error_message.set(Some(e));
                return;
            }
        };

        is_saving.set(true);
        error_message.set(None);

        spawn_local(async move {
            match api::create_user(dto).await {
                Ok(id) => {
                    log::info!("user created: {}", id);
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

    view! {
        <Modal title=UsersModal::CreateUser.title().to_string() on_close=cancel>
            <Show when=move || error_message.get().is_some()>
                <div class="error-message">
                    {move || error_message.get().unwrap_or_default()}
                </div>
            </Show>

            <form on:submit=on_submit>
                <FormField label="User Name" id="user_name" value=user_name required=true disabled=saving />
                <FormField label="Password" id="password" value=password input_type="password" required=true disabled=saving />
                <FormField label="Email" id="email" value=email input_type="email" disabled=saving />
                <FormField label="First Name" id="first_name" value=first_name disabled=saving />
                <FormField label="Middle Name" id="middle_name" value=middle_name disabled=saving />
                <FormField label="Last Name" id="last_name" value=last_name disabled=saving />
                <FormField label="Job Title" id="job_title" value=job_title disabled=saving />

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
                        {move || if is_saving.get() { "Saving..." } else { "Create User" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> UserFormInput {
        UserFormInput {
            user_name: "  jdoe ".into(),
            password: "secret".into(),
            email: "jdoe@example.com".into(),
            first_name: "John".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_dto_trims_and_drops_blank_fields() {
        let dto = input().to_dto().unwrap();
        assert_eq!(dto.user_name, "jdoe");
        assert_eq!(dto.first_name.as_deref(), Some("John"));
        assert_eq!(dto.last_name, None);
        assert_eq!(dto.job_title, None);
    }

    #[test]
    fn test_to_dto_requires_name_and_password() {
        let mut missing_name = input();
        missing_name.user_name = "   ".into();
        assert_eq!(missing_name.to_dto().unwrap_err(), "User name is required");

        let mut missing_password = input();
        missing_password.password.clear();
        assert_eq!(missing_password.to_dto().unwrap_err(), "Password is required");
    }

    #[test]
    fn test_to_dto_rejects_bad_email() {
        let mut bad = input();
        bad.email = "nobody".into();
        assert!(bad.to_dto().is_err());
    }
}
