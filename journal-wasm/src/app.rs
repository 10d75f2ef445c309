use journal_client::access::{Access, evaluate_local};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::path;

use crate::components::nav::Nav;
use crate::components::notice::NoticeToast;
use crate::pages::admin_articles::AdminArticlesPage;
use crate::pages::article_detail::ArticleDetailPage;
use crate::pages::article_form::ArticleFormPage;
use crate::pages::articles::ArticlesPage;
use crate::pages::categories::CategoriesPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;
use crate::state::{AppState, use_app_state};

/// Повторяет решение gate при переходах внутри SPA.
///
/// Токен здесь не проверяется удалённо: это сделает gate при следующей
/// полной загрузке страницы.
#[component]
fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let state = use_app_state();
    let location = use_location();
    let navigate = use_navigate();

    let access = Memo::new(move |_| {
        let path = location.pathname.get();
        state.session.with(|session| {
            let token = session.as_ref().map(|session| session.token.as_str());
            let role = session.as_ref().map(|session| session.role.as_str());
            evaluate_local(&path, token, role)
        })
    });

    Effect::new(move |_| {
        if let Access::Redirect { to, clear_session } = access.get() {
            if clear_session {
                state.sign_out();
            }
            navigate(to, Default::default());
        }
    });

    view! {
        <Show when=move || access.get() == Access::Allow>
            {children()}
        </Show>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppState::new());

    view! {
        <Router>
            <Nav />
            <NoticeToast />
            <main class="container">
                <RouteGuard>
                    <Routes fallback=NotFoundPage>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                        <Route path=path!("/articles") view=ArticlesPage />
                        <Route path=path!("/user/articles") view=ArticlesPage />
                        <Route path=path!("/articles/:id") view=ArticleDetailPage />
                        <Route path=path!("/user/articles/:id") view=ArticleDetailPage />
                        <Route path=path!("/admin/articles") view=AdminArticlesPage />
                        <Route
                            path=path!("/admin/articles/create")
                            view=|| view! { <ArticleFormPage editing=false /> }
                        />
                        <Route
                            path=path!("/admin/articles/:id/edit")
                            view=|| view! { <ArticleFormPage editing=true /> }
                        />
                        <Route path=path!("/admin/categories") view=CategoriesPage />
                        <Route path=path!("/admin/profile") view=ProfilePage />
                        <Route path=path!("/user/profile") view=ProfilePage />
                    </Routes>
                </RouteGuard>
            </main>
        </Router>
    }
}
