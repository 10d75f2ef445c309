//! Состояние экранов списков: фильтры, дебаунс поиска, загрузка
//! с заглушками и отбрасывание устаревших ответов.

use gloo_timers::future::TimeoutFuture;
use journal_client::Category;
use journal_client::fallback::fallback_categories;
use journal_client::listing::{
    DEBOUNCE_DELAY, Debouncer, ListParams, ListSource, Listing, ResponseGuard, load_listing,
    normalize_categories,
};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;

pub(crate) struct ListState<T: Send + Sync + 'static> {
    pub(crate) params: RwSignal<ListParams>,
    pub(crate) listing: RwSignal<Listing<T>>,
    pub(crate) loading: RwSignal<bool>,
    pub(crate) search_input: RwSignal<String>,
    debouncer: StoredValue<Debouncer<String>>,
}

impl<T: Send + Sync + 'static> Clone for ListState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListState<T> {}

impl<T> ListState<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Поднимает эффект загрузки: любое изменение `params` запрашивает
    /// страницу у `source`; при ошибке показывается `fallback`.
    pub(crate) fn new<S>(source: S, limit: u32, search_fields: &'static str, fallback: Vec<T>) -> Self
    where
        S: ListSource<T> + Clone + 'static,
    {
        let state = Self {
            params: RwSignal::new(ListParams::new()),
            listing: RwSignal::new(Listing::empty(limit)),
            loading: RwSignal::new(true),
            search_input: RwSignal::new(String::new()),
            debouncer: StoredValue::new(Debouncer::new()),
        };
        let guard = StoredValue::new(ResponseGuard::default());

        let params = state.params;
        let listing = state.listing;
        let loading = state.loading;
        Effect::new(move |_| {
            let query = params
                .get()
                .to_query(limit)
                .with_search_fields(search_fields);

            let mut ticket = 0;
            guard.update_value(|guard| ticket = guard.issue());
            loading.set(true);

            let source = source.clone();
            let fallback = fallback.clone();
            spawn_local(async move {
                let result = load_listing(&source, &query, &fallback).await;
                if guard.with_value(|guard| guard.is_current(ticket)) {
                    listing.set(result);
                    loading.set(false);
                }
            });
        });

        state
    }

    /// Ввод в поле поиска: запрос уйдёт после паузы в наборе.
    pub(crate) fn input_search(&self, value: String) {
        self.search_input.set(value.clone());

        let mut ticket = 0;
        self.debouncer
            .update_value(|debouncer| ticket = debouncer.schedule(value));

        let debouncer = self.debouncer;
        let params = self.params;
        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_DELAY.as_millis() as u32).await;
            let mut fired = None;
            debouncer.update_value(|debouncer| fired = debouncer.fire(ticket));
            if let Some(term) = fired {
                // та же строка не сбрасывает страницу и не перезапрашивает
                params.maybe_update(|params| params.set_search(term));
            }
        });
    }

    pub(crate) fn select_category(&self, category: Option<String>) {
        self.params
            .maybe_update(|params| params.set_category(category));
    }

    pub(crate) fn next_page(&self) {
        self.params.update(ListParams::next_page);
    }

    pub(crate) fn previous_page(&self) {
        self.params.update(ListParams::previous_page);
    }

    /// Убирает элемент из видимого списка без перезагрузки.
    pub(crate) fn remove_where(&self, matches: impl Fn(&T) -> bool) {
        self.listing
            .maybe_update(|listing| listing.remove_where(matches) > 0);
    }

    /// Повторяет запрос с текущими параметрами.
    pub(crate) fn reload(&self) {
        self.params.update(|_| {});
    }
}

/// Категории для выпадающих списков; `degraded`, если подставлены заглушки.
pub(crate) async fn load_category_options() -> (Vec<Category>, bool) {
    match api::all_categories().await {
        Ok(items) => (normalize_categories(items), false),
        Err(err) => {
            warn!("categories fetch failed, showing fallback data: {err}");
            (normalize_categories(fallback_categories()), true)
        }
    }
}
