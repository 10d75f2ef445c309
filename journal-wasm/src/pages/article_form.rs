//! Создание и редактирование статьи.
//!
//! Если категории или сама статья пришли из заглушек, форма работает в
//! демо-режиме: отправка не уходит в API, об этом сообщает уведомление.

use journal_client::fallback::fallback_articles;
use journal_client::forms::{ARTICLE_SAVE_FAILED, ArticleForm, FormErrors};
use journal_client::{Article, Category};
use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api;
use crate::components::field_error::{FieldError, FormAlert};
use crate::list_state::load_category_options;
use crate::state::use_app_state;

const ADMIN_ARTICLES: &str = "/admin/articles";

fn submit_label(editing: bool, saving: bool) -> &'static str {
    match (editing, saving) {
        (false, false) => "Upload",
        (false, true) => "Uploading...",
        (true, false) => "Save Changes",
        (true, true) => "Saving...",
    }
}

fn fill_from(form: RwSignal<ArticleForm>, article: &Article) {
    form.set(ArticleForm {
        title: article.title.clone(),
        content: article.content.clone(),
        category_id: article.category_key().unwrap_or_default().to_string(),
        image_url: article.image_url.clone(),
    });
}

#[component]
pub(crate) fn ArticleFormPage(editing: bool) -> impl IntoView {
    let app = use_app_state();
    let navigate = use_navigate();
    let params = use_params_map();

    let form = RwSignal::new(ArticleForm::default());
    let errors = RwSignal::new(FormErrors::default());
    let categories = RwSignal::new(Vec::<Category>::new());
    let demo_mode = RwSignal::new(false);
    let loading = RwSignal::new(editing);
    let uploading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let preview = RwSignal::new(false);

    spawn_local(async move {
        let (items, degraded) = load_category_options().await;
        categories.set(items);
        if degraded {
            demo_mode.set(true);
        }
    });

    let article_id = move || params.with(|params| params.get("id")).unwrap_or_default();

    if editing {
        let navigate = navigate.clone();
        let id = article_id();
        spawn_local(async move {
            match api::get_article(&id).await {
                Ok(article) => fill_from(form, &article),
                Err(err) => {
                    warn!("article {id} fetch failed: {err}");
                    match fallback_articles().into_iter().find(|article| article.id == id) {
                        Some(article) => {
                            demo_mode.set(true);
                            fill_from(form, &article);
                        }
                        None => {
                            app.notify_error("Article not found");
                            navigate(ADMIN_ARTICLES, Default::default());
                        }
                    }
                }
            }
            loading.set(false);
        });
    }

    let on_file = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        uploading.set(true);
        spawn_local(async move {
            match api::upload_image(&file).await {
                Ok(uploaded) => {
                    form.update(|form| form.image_url = Some(uploaded.image_url));
                    errors.update(|errors| *errors = errors.clone().without_field("image_url"));
                }
                Err(err) => {
                    warn!("image upload failed: {err}");
                    errors.update(|errors| {
                        *errors = errors.clone().with_field("image_url", "Failed to upload image");
                    });
                }
            }
            uploading.set(false);
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let payload = match categories.with(|categories| form.with(|form| form.submit(categories))) {
            Ok(payload) => payload,
            Err(form_errors) => {
                errors.set(form_errors);
                return;
            }
        };
        errors.set(FormErrors::default());

        if demo_mode.get_untracked() {
            app.notify("Demo mode: changes were not sent to the server");
            navigate(ADMIN_ARTICLES, Default::default());
            return;
        }

        saving.set(true);
        let navigate = navigate.clone();
        let id = article_id();
        spawn_local(async move {
            let result = if editing {
                api::update_article(&id, &payload).await
            } else {
                api::create_article(&payload).await
            };
            saving.set(false);

            match result {
                Ok(_) => {
                    app.notify(if editing { "Article is Updated" } else { "Article is Created" });
                    navigate(ADMIN_ARTICLES, Default::default());
                }
                Err(err) => {
                    warn!("article save failed: {err}");
                    errors.set(FormErrors::from_submit_error(&err, ARTICLE_SAVE_FAILED));
                }
            }
        });
    };

    view! {
        <section class="panel">
            <header class="panel-header">
                <A href=ADMIN_ARTICLES>"← Back"</A>
                <h2>{if editing { "Edit Article" } else { "Create Article" }}</h2>
            </header>

            <Show when=move || demo_mode.get()>
                <p class="alert">"Demo mode: API is unavailable"</p>
            </Show>
            <FormAlert errors=errors />

            <Show when=move || loading.get()>
                <p class="muted">"Loading..."</p>
            </Show>
            <form class="article-form" class:hidden=move || loading.get() on:submit=on_submit>
                <label>"Thumbnail"</label>
                {move || {
                    form.with(|form| form.image_url.clone())
                        .map(|src| view! { <img class="thumb-preview" src=src alt="" /> })
                }}
                <input type="file" accept="image/*" on:change=on_file />
                <Show when=move || uploading.get()>
                    <p class="muted">"Uploading image..."</p>
                </Show>
                <FieldError errors=errors field="image_url" />

                <label for="title">"Title"</label>
                <input
                    id="title"
                    placeholder="Input title"
                    prop:value=move || form.with(|form| form.title.clone())
                    on:input=move |ev| form.update(|form| form.title = event_target_value(&ev))
                />
                <FieldError errors=errors field="title" />

                <label for="category">"Category"</label>
                <select
                    id="category"
                    on:change=move |ev| form.update(|form| form.category_id = event_target_value(&ev))
                >
                    <option value="" selected=move || form.with(|form| form.category_id.is_empty())>
                        "Select category"
                    </option>
                    <For
                        each=move || categories.get()
                        key=|category| category.id.clone()
                        children=move |category: Category| {
                            let id = category.id.clone();
                            view! {
                                <option
                                    value=category.id
                                    selected=move || form.with(|form| form.category_id == id)
                                >
                                    {category.name}
                                </option>
                            }
                        }
                    />
                </select>
                <FieldError errors=errors field="category_id" />

                <label for="content">"Content"</label>
                <textarea
                    id="content"
                    rows="12"
                    placeholder="Type a content..."
                    prop:value=move || form.with(|form| form.content.clone())
                    on:input=move |ev| form.update(|form| form.content = event_target_value(&ev))
                />
                <p class="muted">{move || format!("{} Characters", form.with(ArticleForm::content_chars))}</p>
                <FieldError errors=errors field="content" />

                <Show when=move || preview.get()>
                    <div class="preview">
                        <h3>{move || form.with(|form| form.title.clone())}</h3>
                        <div class="detail-content">{move || form.with(|form| form.content.clone())}</div>
                    </div>
                </Show>

                <div class="form-actions">
                    <A href=ADMIN_ARTICLES attr:class="btn btn-ghost">"Cancel"</A>
                    <button class="btn btn-ghost" type="button" on:click=move |_| preview.update(|open| *open = !*open)>
                        {move || if preview.get() { "Hide Preview" } else { "Preview" }}
                    </button>
                    <button class="btn" type="submit" disabled=move || saving.get() || uploading.get()>
                        {move || submit_label(editing, saving.get())}
                    </button>
                </div>
            </form>
        </section>
    }
}

