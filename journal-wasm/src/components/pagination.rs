use leptos::prelude::*;

/// Previous / Next. Следующая страница доступна, пока текущая заполнена.
#[component]
pub(crate) fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] has_previous: Signal<bool>,
    #[prop(into)] has_next: Signal<bool>,
    on_previous: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <button
                class="btn btn-ghost"
                disabled=move || !has_previous.get()
                on:click=move |_| on_previous.run(())
            >
                "Previous"
            </button>
            <span class="page-number">{move || page.get()}</span>
            <button
                class="btn btn-ghost"
                disabled=move || !has_next.get()
                on:click=move |_| on_next.run(())
            >
                "Next"
            </button>
        </div>
    }
}
