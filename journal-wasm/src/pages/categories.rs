//! Управление категориями: таблица, поиск, диалоги создания,
//! редактирования и удаления.

use journal_client::Category;
use journal_client::fallback::fallback_categories;
use journal_client::forms::{CategoryForm, FormErrors};
use journal_client::listing::{ADMIN_PAGE_SIZE, CATEGORY_SEARCH_FIELDS};
use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CategoriesApi};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::field_error::{FieldError, FormAlert};
use crate::components::pagination::Pagination;
use crate::format::date_time;
use crate::list_state::ListState;
use crate::state::use_app_state;

const CATEGORY_SAVE_FAILED: &str = "Failed to save category";

#[derive(Debug, Clone, PartialEq)]
enum Editor {
    Closed,
    Create,
    Edit(Category),
}

impl Editor {
    fn title(&self) -> &'static str {
        match self {
            Self::Edit(_) => "Edit Category",
            _ => "Add Category",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            Self::Edit(_) => "Save Changes",
            _ => "Add",
        }
    }
}

#[component]
fn CategoryEditor(
    editor: RwSignal<Editor>,
    name: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    saving: RwSignal<bool>,
    on_submit: Callback<CategoryForm>,
) -> impl IntoView {
    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.run(CategoryForm { name: name.get() });
    };

    view! {
        <Show when=move || editor.with(|editor| *editor != Editor::Closed)>
            <div class="dialog-backdrop">
                <form class="dialog" on:submit=submit>
                    <h3>{move || editor.with(Editor::title)}</h3>
                    <FormAlert errors=errors />
                    <label for="category-name">"Name"</label>
                    <input
                        id="category-name"
                        placeholder="Input Category"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field="name" />
                    <div class="dialog-actions">
                        <button class="btn btn-ghost" type="button" on:click=move |_| editor.set(Editor::Closed)>
                            "Cancel"
                        </button>
                        <button class="btn" type="submit" disabled=move || saving.get()>
                            {move || editor.with(Editor::submit_label)}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn CategoriesPage() -> impl IntoView {
    let app = use_app_state();
    let list = ListState::new(
        CategoriesApi,
        ADMIN_PAGE_SIZE,
        CATEGORY_SEARCH_FIELDS,
        fallback_categories(),
    );

    let editor = RwSignal::new(Editor::Closed);
    let name = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let saving = RwSignal::new(false);

    let pending_delete = RwSignal::new(None::<Category>);
    let deleting = RwSignal::new(false);

    let open_editor = move |next: Editor| {
        name.set(match &next {
            Editor::Edit(category) => category.name.clone(),
            _ => String::new(),
        });
        errors.set(FormErrors::default());
        editor.set(next);
    };

    let save = Callback::new(move |form: CategoryForm| {
        let payload = match form.submit() {
            Ok(payload) => payload,
            Err(form_errors) => {
                errors.set(form_errors);
                return;
            }
        };

        let target = editor.get_untracked();
        saving.set(true);
        spawn_local(async move {
            let result = match &target {
                Editor::Edit(category) => api::update_category(&category.id, &payload).await,
                _ => api::create_category(&payload).await,
            };
            saving.set(false);

            match (result, target) {
                (Ok(updated), Editor::Edit(_)) => {
                    list.listing.update(|listing| {
                        if let Some(item) = listing.items.iter_mut().find(|item| item.id == updated.id) {
                            item.name = updated.name;
                        }
                    });
                    editor.set(Editor::Closed);
                    app.notify("Edit Success");
                }
                (Ok(_), _) => {
                    editor.set(Editor::Closed);
                    app.notify("Category is Created");
                    list.reload();
                }
                (Err(err), _) => {
                    warn!("category save failed: {err}");
                    errors.set(FormErrors::from_submit_error(&err, CATEGORY_SAVE_FAILED));
                }
            }
        });
    });

    let confirm_delete = Callback::new(move |_| {
        let Some(category) = pending_delete.get_untracked() else {
            return;
        };
        deleting.set(true);
        spawn_local(async move {
            match api::delete_category(&category.id).await {
                Ok(()) => {
                    list.remove_where(|item: &Category| item.id == category.id);
                    app.notify("Category is Deleted");
                }
                Err(err) => {
                    warn!("delete category {} failed: {err}", category.id);
                    app.notify_error("Failed Deleting Category");
                }
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    });

    view! {
        <section class="panel">
            <header class="panel-header">
                <h2>{move || format!("Total Category : {}", list.listing.with(|listing| listing.total))}</h2>
                <button class="btn" on:click=move |_| open_editor(Editor::Create)>"+ Add Category"</button>
            </header>

            <div class="filters">
                <input
                    type="search"
                    placeholder="Search Category"
                    prop:value=move || list.search_input.get()
                    on:input=move |ev| list.input_search(event_target_value(&ev))
                />
            </div>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Category"</th>
                        <th>"Created at"</th>
                        <th>"Action"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || !list.loading.get() fallback=|| view! { <tr><td colspan="3">"Loading..."</td></tr> }>
                        <Show
                            when=move || list.listing.with(|listing| !listing.items.is_empty())
                            fallback=|| view! { <tr><td colspan="3" class="empty">"No categories found"</td></tr> }
                        >
                            <For
                                each=move || list.listing.get().items
                                key=|category| (category.id.clone(), category.name.clone())
                                children=move |category: Category| {
                                    let created = category.created_at.as_ref().map(date_time).unwrap_or_default();
                                    let for_edit = category.clone();
                                    let for_delete = category.clone();
                                    view! {
                                        <tr>
                                            <td>{category.name}</td>
                                            <td>{created}</td>
                                            <td class="actions">
                                                <button
                                                    class="link"
                                                    on:click=move |_| open_editor(Editor::Edit(for_edit.clone()))
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="link danger"
                                                    on:click=move |_| pending_delete.set(Some(for_delete.clone()))
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

            <CategoryEditor editor=editor name=name errors=errors saving=saving on_submit=save />

            <ConfirmDialog
                open=Signal::derive(move || pending_delete.with(Option::is_some))
                title="Delete Category"
                message=Signal::derive(move || {
                    pending_delete.with(|category| {
                        category
                            .as_ref()
                            .map(|category| format!("Delete category \"{}\"? This will be permanently removed.", category.name))
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
