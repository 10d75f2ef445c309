use journal_client::forms::{FormErrors, LOGIN_FAILED, LoginForm};
use journal_client::session::Session;
use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::components::field_error::{FieldError, FormAlert};
use crate::state::use_app_state;
use crate::storage;

#[component]
pub(crate) fn LoginPage() -> impl IntoView {
    let state = use_app_state();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let form = LoginForm {
            username: username.get(),
            password: password.get(),
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
        spawn_local(async move {
            match api::login(&payload).await {
                Ok(response) => match state.sign_in(Session::from(response)) {
                    // полная загрузка, чтобы gate увидел свежие cookie
                    Ok(()) => storage::hard_navigate("/articles"),
                    Err(err) => errors.set(FormErrors::general_only(err)),
                },
                Err(err) => {
                    warn!("login failed: {err}");
                    errors.set(FormErrors::from_api_message(&err, LOGIN_FAILED));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="auth-card">
            <h2>"Login"</h2>
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

                <button class="btn btn-block" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="muted">
                "Don't have an account? " <A href="/register">"Register"</A>
            </p>
        </section>
    }
}
