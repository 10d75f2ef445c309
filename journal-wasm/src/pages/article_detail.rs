use journal_client::Article;
use journal_client::fallback::fallback_articles;
use journal_client::listing::{ListQuery, RELATED_QUERY_LIMIT, related_articles};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_params_map};

use crate::api;
use crate::components::article_card::ArticleCard;
use crate::format::{long_date, reader_base};

#[derive(Debug, Clone, PartialEq)]
enum DetailState {
    Loading,
    Found(Box<Article>),
    Missing,
}

/// Статья из API, а если он недоступен, то из заглушек.
async fn load_article(id: String) -> Option<Article> {
    match api::get_article(&id).await {
        Ok(article) => Some(article),
        Err(err) => {
            warn!("article {id} fetch failed: {err}");
            fallback_articles().into_iter().find(|article| article.id == id)
        }
    }
}

async fn load_related(article: &Article) -> Vec<Article> {
    let Some(category_id) = article.category_key() else {
        return Vec::new();
    };

    let query = ListQuery::new(RELATED_QUERY_LIMIT).with_category(Some(category_id));
    let items = match api::list_articles(&query).await {
        Ok(page) => page.items,
        Err(err) => {
            warn!("related articles fetch failed: {err}");
            fallback_articles()
        }
    };
    related_articles(items, &article.id, category_id)
}

#[component]
pub(crate) fn ArticleDetailPage() -> impl IntoView {
    let params = use_params_map();
    let base = reader_base(&use_location().pathname.get_untracked());
    let state = RwSignal::new(DetailState::Loading);
    let related = RwSignal::new(Vec::<Article>::new());

    Effect::new(move |_| {
        let Some(id) = params.with(|params| params.get("id")) else {
            state.set(DetailState::Missing);
            return;
        };

        state.set(DetailState::Loading);
        related.set(Vec::new());
        spawn_local(async move {
            match load_article(id).await {
                Some(article) => {
                    let items = load_related(&article).await;
                    state.set(DetailState::Found(Box::new(article)));
                    related.set(items);
                }
                None => state.set(DetailState::Missing),
            }
        });
    });

    view! {
        <section class="detail">
            {move || match state.get() {
                DetailState::Loading => view! { <p class="muted">"Loading..."</p> }.into_any(),
                DetailState::Missing => view! {
                    <div class="empty">
                        <h2>"Article not found"</h2>
                        <A href=base>"Back to articles"</A>
                    </div>
                }
                .into_any(),
                DetailState::Found(article) => {
                    let article = *article;
                    view! {
                        <article class="detail-body">
                            <p class="muted">
                                {long_date(&article.created_at)} " · " {article.category_name().to_string()}
                            </p>
                            <h1>{article.title}</h1>
                            {article.image_url.map(|src| view! { <img class="detail-image" src=src alt="" /> })}
                            <div class="detail-content">{article.content}</div>
                        </article>
                    }
                    .into_any()
                }
            }}

            <Show when=move || matches!(state.get(), DetailState::Found(_))>
                <h3>"Other articles"</h3>
                <Show
                    when=move || related.with(|items| !items.is_empty())
                    fallback=|| view! { <p class="muted">"No related articles found"</p> }
                >
                    <div class="card-grid">
                        <For
                            each=move || related.get()
                            key=|article| article.id.clone()
                            children=move |article: Article| view! { <ArticleCard article=article base=base /> }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}
