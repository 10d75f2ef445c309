use leptos::prelude::*;

use crate::state::use_app_state;

/// Всплывающее уведомление в углу экрана.
#[component]
pub(crate) fn NoticeToast() -> impl IntoView {
    let state = use_app_state();

    view! {
        {move || {
            state
                .notice
                .get()
                .map(|notice| {
                    let class = if notice.is_error { "toast toast-error" } else { "toast toast-success" };
                    view! {
                        <div class=class role="status">
                            <span>{notice.message}</span>
                        </div>
                    }
                })
        }}
    }
}
