//! Загрузка списков: поиск с задержкой, фильтр по категории, постраничный
//! запрос к API и подстановка заглушек при ошибке.
//!
//! Экраны не кэшируют ответы: каждое изменение параметров даёт новый запрос.
//! Ошибка загрузки пользователю не показывается, вместо данных
//! отображается фиксированный набор заглушек.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::models::{Article, Category};

/// Пауза ввода, после которой поисковый запрос уходит в API.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(400);
/// Размер страницы в админских таблицах.
pub const ADMIN_PAGE_SIZE: u32 = 10;
/// Размер страницы в ленте читателя.
pub const READER_PAGE_SIZE: u32 = 9;
/// Сколько статей запрашивать для блока «Other Articles».
pub const RELATED_QUERY_LIMIT: u32 = 4;
/// Сколько похожих статей показывать.
pub const RELATED_SHOWN: usize = 3;
/// Поля поиска статей.
pub const ARTICLE_SEARCH_FIELDS: &str = "title,content,category.name";
/// Поля поиска категорий.
pub const CATEGORY_SEARCH_FIELDS: &str = "name";
/// Значение селекта категорий, означающее «без фильтра».
pub const ALL_CATEGORIES: &str = "all";
/// Имя категории, пришедшей без названия.
pub const UNNAMED_CATEGORY: &str = "Unnamed Category";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Параметры постраничного запроса списка.
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_fields: Option<String>,
}

impl ListQuery {
    /// Первая страница размером `limit` (не меньше 1).
    pub fn new(limit: u32) -> Self {
        Self {
            search: None,
            category: None,
            page: 1,
            limit: limit.max(1),
            search_fields: None,
        }
    }

    /// Поисковая строка; пустая после обрезки пробелов не отправляется.
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    /// Фильтр по категории; пустое значение и `"all"` снимают фильтр.
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category
            .map(str::trim)
            .filter(|value| !value.is_empty() && *value != ALL_CATEGORIES)
            .map(str::to_string);
        self
    }

    /// Номер страницы, начиная с 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Список полей, по которым API ищет `search`.
    pub fn with_search_fields(mut self, fields: &str) -> Self {
        self.search_fields = Some(fields.to_string());
        self
    }

    /// Поисковая строка.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Категория-фильтр.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Номер страницы.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Размер страницы.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Пары `ключ=значение` для транспорта без `serde`-сериализации query.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        if let Some(fields) = &self.search_fields {
            pairs.push(("searchFields", fields.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Страница, как её вернул API.
pub struct Page<T> {
    /// Элементы.
    pub items: Vec<T>,
    /// Общее количество, если API его сообщил.
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
/// То, что видит экран списка.
pub struct Listing<T> {
    /// Видимые элементы.
    pub items: Vec<T>,
    /// Общее количество (от API, иначе число элементов).
    pub total: u64,
    /// Текущая страница.
    pub page: u32,
    /// Запрошенный размер страницы.
    pub limit: u32,
    /// `true`, если вместо ответа API подставлены заглушки.
    pub degraded: bool,
}

impl<T> Listing<T> {
    /// Пустой список до первой загрузки.
    pub fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            limit: limit.max(1),
            degraded: false,
        }
    }

    /// Эвристика: следующая страница есть, если текущая заполнена целиком.
    pub fn has_next(&self) -> bool {
        self.items.len() as u64 >= u64::from(self.limit)
    }

    /// Предыдущая страница есть всегда, кроме первой.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Убирает элементы, подходящие под `matches`, и уменьшает `total`
    /// на число удалённых. Возвращает, сколько удалено.
    pub fn remove_where(&mut self, matches: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !matches(item));
        let removed = before - self.items.len();
        self.total = self.total.saturating_sub(removed as u64);
        removed
    }
}

/// Источник страниц: API-клиент фронтенда или нативный клиент.
#[async_trait(?Send)]
pub trait ListSource<T> {
    /// Запрашивает одну страницу.
    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Page<T>>;
}

/// Загружает страницу; при любой ошибке возвращает `fallback` без изменений.
pub async fn load_listing<T, S>(source: &S, query: &ListQuery, fallback: &[T]) -> Listing<T>
where
    T: Clone,
    S: ListSource<T> + ?Sized,
{
    match source.fetch_page(query).await {
        Ok(page) => {
            let total = page.total.unwrap_or(page.items.len() as u64);
            debug!(page = query.page(), items = page.items.len(), total, "list page loaded");
            Listing {
                items: page.items,
                total,
                page: query.page(),
                limit: query.limit(),
                degraded: false,
            }
        }
        Err(err) => {
            warn!(error = %err, page = query.page(), "list fetch failed, showing fallback data");
            Listing {
                items: fallback.to_vec(),
                total: fallback.len() as u64,
                page: query.page(),
                limit: query.limit(),
                degraded: true,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Состояние фильтров экрана списка. Смена поиска или категории
/// возвращает на первую страницу.
pub struct ListParams {
    search: String,
    category: Option<String>,
    page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            page: 1,
        }
    }
}

impl ListParams {
    /// Первая страница без фильтров.
    pub fn new() -> Self {
        Self::default()
    }

    /// Применённая поисковая строка.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Выбранная категория.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Текущая страница.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Меняет поисковую строку и сбрасывает страницу.
    ///
    /// Та же строка ничего не меняет; возвращает `true`, если состояние
    /// изменилось.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search {
            return false;
        }
        self.search = term;
        self.page = 1;
        true
    }

    /// Меняет категорию и сбрасывает страницу. Та же категория ничего
    /// не меняет.
    pub fn set_category(&mut self, category: Option<String>) -> bool {
        if category == self.category {
            return false;
        }
        self.category = category;
        self.page = 1;
        true
    }

    /// Следующая страница.
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Предыдущая страница, не ниже первой.
    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Запрос для текущего состояния.
    pub fn to_query(&self, limit: u32) -> ListQuery {
        ListQuery::new(limit)
            .with_search(&self.search)
            .with_category(self.category.as_deref())
            .with_page(self.page)
    }
}

#[derive(Debug, Clone)]
/// Отложенное значение с поколениями.
///
/// Каждый `schedule` выдаёт новый билет; `fire` отдаёт значение только
/// по последнему билету и только один раз. Таймер задаёт вызывающая
/// сторона (`gloo-timers` в браузере, `tokio::time` в тестах).
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> Debouncer<T> {
    /// Пустой дебаунсер.
    pub fn new() -> Self {
        Self::default()
    }

    /// Запоминает значение и возвращает билет для `fire`.
    pub fn schedule(&mut self, value: T) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(value);
        self.generation
    }

    /// Отдаёт значение, если билет последний и значение ещё не отдано.
    pub fn fire(&mut self, ticket: u64) -> Option<T> {
        if ticket != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Есть ли значение, ожидающее срабатывания.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Поколения запросов: ответ применяется, только если после него
/// не было отправлено более нового запроса.
pub struct ResponseGuard {
    latest: u64,
}

impl ResponseGuard {
    /// Регистрирует новый запрос.
    pub fn issue(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    /// Ответ на запрос `ticket` всё ещё актуален.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest == ticket
    }
}

/// Оставляет статьи, у которых заголовок, текст или категория содержат
/// `term` без учёта регистра. Пустой `term` ничего не отбрасывает.
pub fn filter_articles(items: Vec<Article>, term: &str) -> Vec<Article> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|article| {
            article.title.to_lowercase().contains(&term)
                || article.content.to_lowercase().contains(&term)
                || article.category_name().to_lowercase().contains(&term)
        })
        .collect()
}

/// Убирает категории без id, обрезает названия, пустым даёт имя по умолчанию.
pub fn normalize_categories(items: Vec<Category>) -> Vec<Category> {
    items
        .into_iter()
        .filter_map(|mut category| {
            let id = category.id.trim();
            if id.is_empty() {
                return None;
            }
            category.id = id.to_string();

            let name = category.name.trim();
            category.name = if name.is_empty() {
                UNNAMED_CATEGORY.to_string()
            } else {
                name.to_string()
            };
            Some(category)
        })
        .collect()
}

/// До трёх статей той же категории, кроме текущей.
pub fn related_articles(items: Vec<Article>, current_id: &str, category_id: &str) -> Vec<Article> {
    items
        .into_iter()
        .filter(|article| article.id != current_id && article.category_key() == Some(category_id))
        .take(RELATED_SHOWN)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::Utc;

    use super::*;
    use crate::error::ClientError;
    use crate::fallback::fallback_articles;
    use crate::models::CategoryRef;

    #[derive(Default)]
    struct RecordingSource {
        calls: RefCell<Vec<ListQuery>>,
        fail: bool,
        items: Vec<Article>,
        total: Option<u64>,
    }

    impl RecordingSource {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn with_items(items: Vec<Article>, total: Option<u64>) -> Self {
            Self {
                items,
                total,
                ..Self::default()
            }
        }

        fn searches(&self) -> Vec<Option<String>> {
            self.calls
                .borrow()
                .iter()
                .map(|q| q.search().map(str::to_string))
                .collect()
        }
    }

    #[async_trait(?Send)]
    impl ListSource<Article> for RecordingSource {
        async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Page<Article>> {
            self.calls.borrow_mut().push(query.clone());
            if self.fail {
                return Err(ClientError::Network("connection refused".to_string()));
            }
            Ok(Page {
                items: self.items.clone(),
                total: self.total,
            })
        }
    }

    fn article(id: &str, title: &str, category: Option<(&str, &str)>) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("content of {title}"),
            image_url: None,
            category_id: None,
            category: category.map(|(id, name)| CategoryRef {
                id: id.to_string(),
                name: name.to_string(),
            }),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn list_query_normalizes_inputs() {
        let query = ListQuery::new(0)
            .with_search("   ")
            .with_category(Some(ALL_CATEGORIES))
            .with_page(0);

        assert_eq!(query.search(), None);
        assert_eq!(query.category(), None);
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn list_query_pairs_skip_absent_values() {
        let query = ListQuery::new(9)
            .with_search(" rust ")
            .with_page(2)
            .with_search_fields(ARTICLE_SEARCH_FIELDS);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("search", "rust".to_string()),
                ("page", "2".to_string()),
                ("limit", "9".to_string()),
                ("searchFields", ARTICLE_SEARCH_FIELDS.to_string()),
            ]
        );
    }

    #[test]
    fn list_query_serializes_camel_case() {
        let query = ListQuery::new(10)
            .with_category(Some("c1"))
            .with_search_fields(CATEGORY_SEARCH_FIELDS);
        let value = serde_json::to_value(&query).expect("query must serialize");
        assert_eq!(
            value,
            serde_json::json!({"category": "c1", "page": 1, "limit": 10, "searchFields": "name"})
        );
    }

    #[tokio::test]
    async fn failing_fetch_yields_fallback_unchanged() {
        let source = RecordingSource::failing();
        let fallback = fallback_articles();
        let query = ListQuery::new(READER_PAGE_SIZE).with_search("anything").with_page(3);

        let listing = load_listing(&source, &query, &fallback).await;

        assert!(listing.degraded);
        assert_eq!(listing.items, fallback);
        assert_eq!(listing.total, fallback.len() as u64);
        assert_eq!(listing.page, 3);
        assert_eq!(source.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn successful_fetch_uses_server_total_or_item_count() {
        let items = vec![article("1", "A", None), article("2", "B", None)];

        let source = RecordingSource::with_items(items.clone(), Some(42));
        let listing = load_listing(&source, &ListQuery::new(10), &fallback_articles()).await;
        assert!(!listing.degraded);
        assert_eq!(listing.items, items);
        assert_eq!(listing.total, 42);

        let source = RecordingSource::with_items(items, None);
        let listing = load_listing(&source, &ListQuery::new(10), &fallback_articles()).await;
        assert_eq!(listing.total, 2);
    }

    #[tokio::test]
    async fn every_call_hits_the_source() {
        let source = RecordingSource::with_items(vec![], Some(0));
        let query = ListQuery::new(10).with_search("same");
        let empty: &[Article] = &[];

        load_listing(&source, &query, empty).await;
        load_listing(&source, &query, empty).await;

        assert_eq!(source.calls.borrow().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_keystrokes_issue_single_fetch_with_final_term() {
        let source = Rc::new(RecordingSource::with_items(vec![], Some(0)));
        let debouncer = Rc::new(RefCell::new(Debouncer::<String>::new()));
        let local = tokio::task::LocalSet::new();

        local
            .run_until(async {
                for term in ["r", "ru", "rus", "rust"] {
                    let ticket = debouncer.borrow_mut().schedule(term.to_string());
                    let debouncer = Rc::clone(&debouncer);
                    let source = Rc::clone(&source);
                    tokio::task::spawn_local(async move {
                        tokio::time::sleep(DEBOUNCE_DELAY).await;
                        let fired = debouncer.borrow_mut().fire(ticket);
                        if let Some(term) = fired {
                            let empty: &[Article] = &[];
                            let query = ListQuery::new(ADMIN_PAGE_SIZE).with_search(&term);
                            load_listing(source.as_ref(), &query, empty).await;
                        }
                    });
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                tokio::time::sleep(DEBOUNCE_DELAY * 2).await;
            })
            .await;

        assert_eq!(source.searches(), vec![Some("rust".to_string())]);
    }

    #[test]
    fn debouncer_fires_once_for_latest_ticket_only() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule("a");
        let second = debouncer.schedule("ab");

        assert_eq!(debouncer.fire(first), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(second), Some("ab"));
        assert_eq!(debouncer.fire(second), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn response_guard_rejects_stale_tickets() {
        let mut guard = ResponseGuard::default();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn listing_next_is_disabled_for_short_pages() {
        let mut listing = Listing::<u8>::empty(3);
        assert!(!listing.has_next());
        assert!(!listing.has_previous());

        listing.items = vec![1, 2, 3];
        listing.page = 2;
        assert!(listing.has_next());
        assert!(listing.has_previous());
    }

    #[test]
    fn list_params_reset_page_on_filter_change() {
        let mut params = ListParams::new();
        params.next_page();
        params.next_page();
        assert_eq!(params.page(), 3);

        params.set_search("rust");
        assert_eq!(params.page(), 1);

        params.next_page();
        params.set_category(Some("c1".to_string()));
        assert_eq!(params.page(), 1);

        params.previous_page();
        assert_eq!(params.page(), 1);

        let query = params.to_query(READER_PAGE_SIZE);
        assert_eq!(query.search(), Some("rust"));
        assert_eq!(query.category(), Some("c1"));
    }

    #[test]
    fn repeating_current_filters_keeps_page() {
        let mut params = ListParams::new();
        assert!(params.set_search("rust"));
        assert!(params.set_category(Some("c1".to_string())));
        params.next_page();
        params.next_page();
        let before = params.clone();

        assert!(!params.set_search("rust"));
        assert!(!params.set_category(Some("c1".to_string())));
        assert_eq!(params, before);
        assert_eq!(params.page(), 3);

        assert!(params.set_search("rus"));
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn remove_where_drops_item_and_decrements_total() {
        let mut listing = Listing::empty(ADMIN_PAGE_SIZE);
        listing.items = vec![
            article("1", "First", Some(("c1", "Technology"))),
            article("2", "Second", Some(("c1", "Technology"))),
        ];
        listing.total = 12;

        assert_eq!(listing.remove_where(|item| item.id == "1"), 1);
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].id, "2");
        assert_eq!(listing.total, 11);

        let unchanged = listing.clone();
        assert_eq!(listing.remove_where(|item| item.id == "missing"), 0);
        assert_eq!(listing, unchanged);
    }

    #[test]
    fn remove_where_never_underflows_total() {
        let mut listing = Listing::empty(3);
        listing.items = vec![1_u8, 2, 3];
        listing.total = 1;

        assert_eq!(listing.remove_where(|_| true), 3);
        assert!(listing.items.is_empty());
        assert_eq!(listing.total, 0);
    }

    #[test]
    fn filter_articles_matches_title_content_and_category() {
        let items = vec![
            article("1", "Rust in production", Some(("c1", "Technology"))),
            article("2", "Colour theory", Some(("c2", "Design"))),
            article("3", "Interview", Some(("c3", "People"))),
        ];

        let by_title = filter_articles(items.clone(), "RUST");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "1");

        let by_category = filter_articles(items.clone(), "design");
        assert_eq!(by_category[0].id, "2");

        let by_content = filter_articles(items.clone(), "content of interview");
        assert_eq!(by_content[0].id, "3");

        assert_eq!(filter_articles(items, "  ").len(), 3);
    }

    #[test]
    fn normalize_categories_drops_blank_ids_and_names_unnamed() {
        let raw = vec![
            Category {
                id: " c1 ".to_string(),
                name: "  Tech ".to_string(),
                created_at: None,
                article_count: None,
            },
            Category {
                id: "  ".to_string(),
                name: "Ghost".to_string(),
                created_at: None,
                article_count: None,
            },
            Category {
                id: "c3".to_string(),
                name: "".to_string(),
                created_at: None,
                article_count: Some(2),
            },
        ];

        let normalized = normalize_categories(raw);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].id, "c1");
        assert_eq!(normalized[0].name, "Tech");
        assert_eq!(normalized[1].name, UNNAMED_CATEGORY);
        assert_eq!(normalized[1].article_count, Some(2));
    }

    #[test]
    fn related_articles_excludes_current_and_caps_at_three() {
        let items = vec![
            article("1", "current", Some(("c1", "T"))),
            article("2", "a", Some(("c1", "T"))),
            article("3", "b", Some(("c2", "D"))),
            article("4", "c", Some(("c1", "T"))),
            article("5", "d", Some(("c1", "T"))),
            article("6", "e", Some(("c1", "T"))),
        ];

        let related = related_articles(items, "1", "c1");
        let ids: Vec<_> = related.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "5"]);
    }
}
