use journal_client::fallback::fallback_articles;
use journal_client::listing::{ADMIN_PAGE_SIZE, ALL_CATEGORIES};
use journal_client::{Article, Category};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api::{self, ArticlesApi};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::pagination::Pagination;
use crate::format::date_time;
use crate::list_state::{ListState, load_category_options};
use crate::state::use_app_state;

/// В админке поиск идёт только по заголовку.
const TITLE_SEARCH_FIELDS: &str = "title";

#[component]
pub(crate) fn AdminArticlesPage() -> impl IntoView {
    let app = use_app_state();
    let list = ListState::new(ArticlesApi, ADMIN_PAGE_SIZE, TITLE_SEARCH_FIELDS, fallback_articles());
    let categories = RwSignal::new(Vec::<Category>::new());
    spawn_local(async move {
        let (items, _) = load_category_options().await;
        categories.set(items);
    });

    let pending_delete = RwSignal::new(None::<Article>);
    let deleting = RwSignal::new(false);

    let confirm_delete = Callback::new(move |_| {
        let Some(article) = pending_delete.get_untracked() else {
            return;
        };
        deleting.set(true);
        spawn_local(async move {
            match api::delete_article(&article.id).await {
                Ok(()) => {
                    list.remove_where(|item: &Article| item.id == article.id);
                    app.notify("Article is Deleted");
                }
                Err(err) => {
                    warn!("delete article {} failed: {err}", article.id);
                    app.notify_error("Failed Deleting Article");
                }
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    });

    view! {
        <section class="panel">
            <header class="panel-header">
                <h2>{move || format!("Total Articles : {}", list.listing.with(|listing| listing.total))}</h2>
                <A href="/admin/articles/create" attr:class="btn">"+ Add Article"</A>
            </header>

            <div class="filters">
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    list.select_category((value != ALL_CATEGORIES && !value.is_empty()).then_some(value));
                }>
                    <option value=ALL_CATEGORIES>"All Categories"</option>
                    <For
                        each=move || categories.get()
                        key=|category| category.id.clone()
                        children=|category: Category| view! { <option value=category.id>{category.name}</option> }
                    />
                </select>
                <input
                    type="search"
                    placeholder="Search by title"
                    prop:value=move || list.search_input.get()
                    on:input=move |ev| list.input_search(event_target_value(&ev))
                />
            </div>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Thumbnail"</th>
                        <th>"Title"</th>
                        <th>"Category"</th>
                        <th>"Created at"</th>
                        <th>"Action"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || !list.loading.get() fallback=|| view! { <tr><td colspan="5">"Loading..."</td></tr> }>
                        <Show
                            when=move || list.listing.with(|listing| !listing.items.is_empty())
                            fallback=|| view! { <tr><td colspan="5" class="empty">"No articles found"</td></tr> }
                        >
                            <For
                                each=move || list.listing.get().items
                                key=|article| article.id.clone()
                                children=move |article: Article| {
                                    let edit_href = format!("/admin/articles/{}/edit", article.id);
                                    let preview_href = format!("/articles/{}", article.id);
                                    let created = date_time(&article.created_at);
                                    let category = article.category_name().to_string();
                                    let target = article.clone();
                                    view! {
                                        <tr>
                                            <td>
                                                {article.image_url.map(|src| view! { <img class="thumb" src=src alt="" /> })}
                                            </td>
                                            <td>{article.title}</td>
                                            <td>{category}</td>
                                            <td>{created}</td>
                                            <td class="actions">
                                                <A href=preview_href>"View"</A>
                                                <A href=edit_href>"Edit"</A>
                                                <button
                                                    class="link danger"
                                                    on:click=move |_| pending_delete.set(Some(target.clone()))
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </Show>
                    </Show>
                </tbody>
            </table>

            <Pagination
                page=Signal::derive(move || list.params.with(|params| params.page()))
                has_previous=Signal::derive(move || list.listing.with(|listing| listing.has_previous()))
                has_next=Signal::derive(move || list.listing.with(|listing| listing.has_next()))
                on_previous=Callback::new(move |_| list.previous_page())
                on_next=Callback::new(move |_| list.next_page())
            />

            <ConfirmDialog
                open=Signal::derive(move || pending_delete.with(Option::is_some))
                title="Delete Article"
                message=Signal::derive(move || {
                    pending_delete.with(|article| {
                        article
                            .as_ref()
                            .map(|article| format!("Deleting \"{}\" is permanent and cannot be undone.", article.title))
                            .unwrap_or_default()
                    })
                })
                busy=deleting
                on_cancel=Callback::new(move |_| pending_delete.set(None))
                on_confirm=confirm_delete
            />
        </section>
    }
}
