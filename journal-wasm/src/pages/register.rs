use journal_client::Role;
use journal_client::forms::{FormErrors, RegisterForm};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::field_error::{FieldError, FormAlert};
use crate::state::use_app_state;

const REGISTER_FAILED: &str = "Registration failed";

#[component]
pub(crate) fn RegisterPage() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::User);
    let errors = RwSignal::new(FormErrors::default());
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let form = RegisterForm {
            username: username.get(),
            password: password.get(),
            role: role.get(),
        };
        let payload = match form.submit() {
            Ok(payload) => payload,
            Err(form_errors) => {
                errors.set(form_errors);
                return;
            }
        };

        errors.set(FormErrors::default());
        submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&payload).await {
                Ok(()) => {
                    state.notify("Registration successful, please sign in");
                    navigate("/login", Default::default());
                }
                Err(err) => errors.set(FormErrors::from_api_message(&err, REGISTER_FAILED)),
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="auth-card">
            <h2>"Register"</h2>
            <FormAlert errors=errors />
            <form on:submit=on_submit>
                <label for="username">"Username"</label>
                <input
                    id="username"
                    placeholder="Input username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <FieldError errors=errors field="username" />

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    placeholder="Input password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <FieldError errors=errors field="password" />

                <label for="role">"Role"</label>
                <select
                    id="role"
                    on:change=move |ev| {
                        if let Some(value) = Role::parse(&event_target_value(&ev)) {
                            role.set(value);
                        }
                    }
                >
                    <option value="User" selected=move || role.get() == Role::User>"User"</option>
                    <option value="Admin" selected=move || role.get() == Role::Admin>"Admin"</option>
                </select>

                <button class="btn btn-block" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
            <p class="muted">
                "Already have an account? " <A href="/login">"Login"</A>
            </p>
        </section>
    }
}
