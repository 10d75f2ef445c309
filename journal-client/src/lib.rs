//! Клиентская библиотека для REST API журнала и общая логика фронтенда.
//!
//! - [`JournalClient`] / [`HttpClient`] (`reqwest`, фича `http`): нативный
//!   транспорт для CLI и gate-сервера. Клиент хранит bearer-токен после
//!   `login` и прикладывает его к каждому запросу.
//! - [`listing`]: загрузка списков с поиском, фильтром, пагинацией и
//!   подстановкой заглушек.
//! - [`access`]: политика доступа к страницам по токену и роли.
//! - [`forms`]: схемы форм и ошибки по полям.
//! - [`session`], [`models`], [`fallback`]: данные, общие с wasm-фронтендом.
#![warn(missing_docs)]

pub mod access;
mod error;
pub mod fallback;
pub mod forms;
#[cfg(feature = "http")]
mod http_client;
pub mod listing;
pub mod models;
pub mod session;

pub use error::{ClientError, ClientResult, FieldErrors};
#[cfg(feature = "http")]
pub use http_client::HttpClient;
pub use models::{Article, Category, LoginResponse, Profile, Role};

#[cfg(feature = "http")]
pub use client::JournalClient;

#[cfg(feature = "http")]
mod client {
    use async_trait::async_trait;

    use crate::error::{ClientError, ClientResult};
    use crate::http_client::HttpClient;
    use crate::listing::{ListQuery, ListSource, Page};
    use crate::models::{
        Article, ArticlePayload, Category, CategoryPayload, LoginPayload, LoginResponse, Profile,
        RegisterPayload, UploadResponse,
    };

    #[derive(Debug, Clone)]
    /// Клиент API, хранящий токен сессии.
    pub struct JournalClient {
        http: HttpClient,
        token: Option<String>,
    }

    impl JournalClient {
        /// Создаёт клиент для API по базовому URL.
        pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
            Ok(Self {
                http: HttpClient::new(base_url)?,
                token: None,
            })
        }

        /// Устанавливает токен вручную.
        pub fn set_token(&mut self, token: impl Into<String>) {
            self.token = Some(token.into());
        }

        /// Текущий токен, если установлен.
        pub fn get_token(&self) -> Option<&str> {
            self.token.as_deref()
        }

        /// Забывает токен.
        pub fn clear_token(&mut self) {
            self.token = None;
        }

        fn require_token(&self) -> ClientResult<&str> {
            self.token
                .as_deref()
                .ok_or_else(|| ClientError::Unauthorized("login required".to_string()))
        }

        /// Выполняет вход и сохраняет полученный токен в клиенте.
        pub async fn login(&mut self, payload: &LoginPayload) -> ClientResult<LoginResponse> {
            let response = self.http.login(payload).await?;
            self.token = Some(response.token.clone());
            Ok(response)
        }

        /// Регистрирует пользователя. Токен не меняется.
        pub async fn register(&self, payload: &RegisterPayload) -> ClientResult<()> {
            self.http.register(payload).await
        }

        /// Профиль текущего пользователя.
        pub async fn profile(&self) -> ClientResult<Profile> {
            self.http.profile(self.require_token()?).await
        }

        /// Проверяет чужой токен запросом профиля.
        ///
        /// `Ok(false)`: API отклонил токен; `Err`: проверить не удалось.
        pub async fn verify_token(&self, token: &str) -> ClientResult<bool> {
            match self.http.profile(token).await {
                Ok(_) => Ok(true),
                Err(ClientError::Unauthorized(_)) => Ok(false),
                Err(err) => Err(err),
            }
        }

        /// Страница статей.
        pub async fn list_articles(&self, query: &ListQuery) -> ClientResult<Page<Article>> {
            self.http.list_articles(self.get_token(), query).await
        }

        /// Статья по идентификатору.
        pub async fn get_article(&self, id: &str) -> ClientResult<Article> {
            self.http.get_article(self.get_token(), id).await
        }

        /// Создаёт статью.
        pub async fn create_article(&self, payload: &ArticlePayload) -> ClientResult<Article> {
            self.http.create_article(self.require_token()?, payload).await
        }

        /// Обновляет статью.
        pub async fn update_article(&self, id: &str, payload: &ArticlePayload) -> ClientResult<Article> {
            self.http
                .update_article(self.require_token()?, id, payload)
                .await
        }

        /// Удаляет статью.
        pub async fn delete_article(&self, id: &str) -> ClientResult<()> {
            self.http.delete_article(self.require_token()?, id).await
        }

        /// Страница категорий.
        pub async fn list_categories(&self, query: &ListQuery) -> ClientResult<Page<Category>> {
            self.http.list_categories(self.get_token(), query).await
        }

        /// Создаёт категорию.
        pub async fn create_category(&self, payload: &CategoryPayload) -> ClientResult<Category> {
            self.http.create_category(self.require_token()?, payload).await
        }

        /// Переименовывает категорию.
        pub async fn update_category(
            &self,
            id: &str,
            payload: &CategoryPayload,
        ) -> ClientResult<Category> {
            self.http
                .update_category(self.require_token()?, id, payload)
                .await
        }

        /// Удаляет категорию.
        pub async fn delete_category(&self, id: &str) -> ClientResult<()> {
            self.http.delete_category(self.require_token()?, id).await
        }

        /// Загружает изображение.
        pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<UploadResponse> {
            self.http
                .upload_image(self.require_token()?, file_name, bytes)
                .await
        }
    }

    #[async_trait(?Send)]
    impl ListSource<Article> for JournalClient {
        async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Page<Article>> {
            self.list_articles(query).await
        }
    }

    #[async_trait(?Send)]
    impl ListSource<Category> for JournalClient {
        async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Page<Category>> {
            self.list_categories(query).await
        }
    }
}
