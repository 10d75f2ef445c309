use journal_client::forms::FormErrors;
use leptos::prelude::*;

#[component]
pub(crate) fn FieldError(errors: RwSignal<FormErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|errors| errors.field(field).map(str::to_string))
            .map(|message| view! { <p class="field-error">{message}</p> })
    }
}

#[component]
pub(crate) fn FormAlert(errors: RwSignal<FormErrors>) -> impl IntoView {
    move || {
        errors
            .with(|errors| errors.general().map(str::to_string))
            .map(|message| view! { <div class="alert alert-error">{message}</div> })
    }
}
