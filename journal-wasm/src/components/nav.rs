use journal_client::Role;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::state::use_app_state;
use crate::storage;

fn link_class(active: bool) -> &'static str {
    if active { "nav-link active" } else { "nav-link" }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    let location = use_location();
    let active = move || location.pathname.get().starts_with(href);

    view! {
        <A href=href attr:class=move || link_class(active())>
            {label}
        </A>
    }
}

#[component]
pub(crate) fn Nav() -> impl IntoView {
    let state = use_app_state();

    let profile_href = move || match state.role() {
        Some(Role::Admin) => "/admin/profile",
        _ => "/user/profile",
    };

    let on_logout = move |_| {
        state.sign_out();
        storage::hard_navigate("/login");
    };

    view! {
        <header class="navbar">
            <A href="/" attr:class="brand">"Journal"</A>
            <nav class="nav-links">
                <Show when=move || state.is_admin()>
                    <NavLink href="/admin/articles" label="Admin Dashboard" />
                    <NavLink href="/admin/categories" label="Categories" />
                </Show>
                <Show when=move || state.role().is_some()>
                    <NavLink href="/articles" label="Articles" />
                </Show>
            </nav>
            <div class="nav-actions">
                <Show
                    when=move || state.role().is_some()
                    fallback=|| view! {
                        <A href="/login" attr:class="btn btn-ghost">"Login"</A>
                        <A href="/register" attr:class="btn">"Register"</A>
                    }
                >
                    <a class="nav-link" href=profile_href>"Profile"</a>
                    <button class="btn btn-ghost" on:click=on_logout>"Logout"</button>
                </Show>
            </div>
        </header>
    }
}
