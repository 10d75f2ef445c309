use journal_client::Article;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::format::{EXCERPT_CHARS, article_href, excerpt, long_date};

#[component]
pub(crate) fn ArticleCard(
    article: Article,
    /// Корень ленты, в которой показана карточка.
    #[prop(default = "/articles")]
    base: &'static str,
) -> impl IntoView {
    let href = article_href(base, &article.id);
    let date = long_date(&article.created_at);
    let summary = excerpt(&article.content, EXCERPT_CHARS);
    let category = article.category_name().to_string();

    view! {
        <article class="card">
            {article.image_url.map(|src| view! { <img class="card-image" src=src alt="" /> })}
            <div class="card-body">
                <p class="muted">{date}</p>
                <A href=href attr:class="card-title">{article.title}</A>
                <p class="card-text">{summary}</p>
                <span class="badge">{category}</span>
            </div>
        </article>
    }
}
