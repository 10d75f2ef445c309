use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub(crate) fn HomePage() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"The Journal"</h1>
            <p class="hero-lead">"Your daily dose of design insights, interviews and engineering notes."</p>
            <div class="hero-actions">
                <A href="/register" attr:class="btn">"Get Started"</A>
                <A href="/login" attr:class="btn btn-ghost">"Sign In"</A>
            </div>
        </section>
    }
}
