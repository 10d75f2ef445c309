//! Лента статей для читателя.

use journal_client::fallback::fallback_articles;
use journal_client::listing::{ALL_CATEGORIES, ARTICLE_SEARCH_FIELDS, READER_PAGE_SIZE, filter_articles};
use journal_client::{Article, Category};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;

use crate::api::ArticlesApi;
use crate::components::article_card::ArticleCard;
use crate::components::pagination::Pagination;
use crate::format::{reader_base, showing};
use crate::list_state::{ListState, load_category_options};

#[component]
pub(crate) fn ArticlesPage() -> impl IntoView {
    let base = reader_base(&use_location().pathname.get_untracked());
    let list = ListState::new(
        ArticlesApi,
        READER_PAGE_SIZE,
        ARTICLE_SEARCH_FIELDS,
        fallback_articles(),
    );
    let categories = RwSignal::new(Vec::<Category>::new());
    spawn_local(async move {
        let (items, _) = load_category_options().await;
        categories.set(items);
    });

    // API не всегда честно применяет поиск, поэтому фильтр повторяется
    // локально; заглушки показываются как есть.
    let visible = Memo::new(move |_| {
        let listing = list.listing.get();
        if listing.degraded {
            return listing.items;
        }
        let term = list.params.with(|params| params.search().to_string());
        filter_articles(listing.items, &term)
    });

    let on_category = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let category = (value != ALL_CATEGORIES && !value.is_empty()).then_some(value);
        list.select_category(category);
    };

    view! {
        <section class="reader">
            <header class="reader-header">
                <h1>"The Journal"</h1>
                <p class="muted">"Fresh stories, tips and interviews."</p>
                <div class="filters">
                    <select on:change=on_category>
                        <option value=ALL_CATEGORIES>"All Categories"</option>
                        <For
                            each=move || categories.get()
                            key=|category| category.id.clone()
                            children=move |category: Category| {
                                view! { <option value=category.id>{category.name}</option> }
                            }
                        />
                    </select>
                    <input
                        type="search"
                        placeholder="Search articles"
                        prop:value=move || list.search_input.get()
                        on:input=move |ev| list.input_search(event_target_value(&ev))
                    />
                </div>
            </header>

            <p class="muted">
                {move || {
                    let total = list.listing.with(|listing| listing.total);
                    showing(visible.with(Vec::len), total, "articles")
                }}
            </p>

            <Show when=move || !list.loading.get() fallback=|| view! { <p class="muted">"Loading..."</p> }>
                <Show
                    when=move || visible.with(|items| !items.is_empty())
                    fallback=|| view! { <p class="empty">"No articles found"</p> }
                >
                    <div class="card-grid">
                        <For
                            each=move || visible.get()
                            key=|article| article.id.clone()
                            children=move |article: Article| view! { <ArticleCard article=article base=base /> }
                        />
                    </div>
                    <Pagination
                        page=Signal::derive(move || list.params.with(|params| params.page()))
                        has_previous=Signal::derive(move || list.listing.with(|listing| listing.has_previous()))
                        has_next=Signal::derive(move || list.listing.with(|listing| listing.has_next()))
                        on_previous=Callback::new(move |_| list.previous_page())
                        on_next=Callback::new(move |_| list.next_page())
                    />
                </Show>
            </Show>
        </section>
    }
}
