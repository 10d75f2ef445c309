use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub(crate) fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="empty">
            <h2>"Page not found"</h2>
            <A href="/">"Go home"</A>
        </section>
    }
}
