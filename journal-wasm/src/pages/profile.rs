use journal_client::Profile;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::state::use_app_state;
use crate::storage;

#[component]
pub(crate) fn ProfilePage() -> impl IntoView {
    let app = use_app_state();
    let profile = RwSignal::new(None::<Profile>);

    spawn_local(async move {
        match api::profile().await {
            Ok(loaded) => profile.set(Some(loaded)),
            Err(err) => {
                // без профиля сессия бесполезна
                warn!("profile fetch failed: {err}");
                app.sign_out();
                storage::hard_navigate("/login");
            }
        }
    });

    let back = move || {
        let href = if app.is_admin() { "/admin/articles" } else { "/articles" };
        href.to_string()
    };

    view! {
        <section class="auth-card profile">
            <h2>"User Profile"</h2>
            {move || match profile.get() {
                None => view! { <p class="muted">"Loading..."</p> }.into_any(),
                Some(profile) => {
                    let initial = profile.username.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
                    view! {
                        <div class="avatar">{initial}</div>
                        <dl class="profile-fields">
                            <dt>"Username"</dt>
                            <dd>{profile.username}</dd>
                            <dt>"Role"</dt>
                            <dd>{profile.role.to_string()}</dd>
                        </dl>
                    }
                    .into_any()
                }
            }}
            <A href=back attr:class="btn btn-block">"Back to home"</A>
        </section>
    }
}
