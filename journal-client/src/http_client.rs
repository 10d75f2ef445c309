use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::listing::{ListQuery, Page};
use crate::models::{
    Article, ArticlePayload, Category, CategoryPayload, ListEnvelope, LoginPayload, LoginResponse,
    Profile, RegisterPayload, UploadResponse,
};

#[derive(Debug, Clone)]
/// HTTP-клиент REST API журнала. Токен передаётся в каждый вызов явно.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с базовым URL API, например `https://host/api`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(%method, %url, "api request");

        let request = self.client.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ClientError::from_status(status, &body)
    }

    async fn execute(request: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = request.send().await.map_err(ClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn fetch<TRes: DeserializeOwned>(request: RequestBuilder) -> ClientResult<TRes> {
        Self::execute(request)
            .await?
            .json::<TRes>()
            .await
            .map_err(ClientError::from_reqwest)
    }

    /// универсальный helper для запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> ClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        Self::fetch(self.request(method, path, token).json(body)).await
    }

    /// Вход: возвращает токен, роль и refresh-токен.
    pub async fn login(&self, payload: &LoginPayload) -> ClientResult<LoginResponse> {
        self.send_json(Method::POST, "/auth/login", payload, None).await
    }

    /// Регистрация нового пользователя.
    pub async fn register(&self, payload: &RegisterPayload) -> ClientResult<()> {
        Self::execute(self.request(Method::POST, "/auth/register", None).json(payload)).await?;
        Ok(())
    }

    /// Профиль владельца токена.
    pub async fn profile(&self, token: &str) -> ClientResult<Profile> {
        Self::fetch(self.request(Method::GET, "/auth/profile", Some(token))).await
    }

    /// Страница статей.
    pub async fn list_articles(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> ClientResult<Page<Article>> {
        let request = self.request(Method::GET, "/articles", token).query(query);
        let envelope: ListEnvelope<Article> = Self::fetch(request).await?;
        Ok(envelope.into())
    }

    /// Статья по идентификатору.
    pub async fn get_article(&self, token: Option<&str>, id: &str) -> ClientResult<Article> {
        Self::fetch(self.request(Method::GET, &format!("/articles/{id}"), token)).await
    }

    /// Создаёт статью.
    pub async fn create_article(&self, token: &str, payload: &ArticlePayload) -> ClientResult<Article> {
        self.send_json(Method::POST, "/articles", payload, Some(token))
            .await
    }

    /// Обновляет статью.
    pub async fn update_article(
        &self,
        token: &str,
        id: &str,
        payload: &ArticlePayload,
    ) -> ClientResult<Article> {
        self.send_json(Method::PUT, &format!("/articles/{id}"), payload, Some(token))
            .await
    }

    /// Удаляет статью.
    pub async fn delete_article(&self, token: &str, id: &str) -> ClientResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("/articles/{id}"), Some(token))).await?;
        Ok(())
    }

    /// Страница категорий.
    pub async fn list_categories(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> ClientResult<Page<Category>> {
        let request = self.request(Method::GET, "/categories", token).query(query);
        let envelope: ListEnvelope<Category> = Self::fetch(request).await?;
        Ok(envelope.into())
    }

    /// Создаёт категорию.
    pub async fn create_category(
        &self,
        token: &str,
        payload: &CategoryPayload,
    ) -> ClientResult<Category> {
        self.send_json(Method::POST, "/categories", payload, Some(token))
            .await
    }

    /// Переименовывает категорию.
    pub async fn update_category(
        &self,
        token: &str,
        id: &str,
        payload: &CategoryPayload,
    ) -> ClientResult<Category> {
        self.send_json(Method::PUT, &format!("/categories/{id}"), payload, Some(token))
            .await
    }

    /// Удаляет категорию.
    pub async fn delete_category(&self, token: &str, id: &str) -> ClientResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("/categories/{id}"), Some(token)))
            .await?;
        Ok(())
    }

    /// Загружает изображение (multipart, поле `image`) и возвращает его URL.
    pub async fn upload_image(
        &self,
        token: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<UploadResponse> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("image", part);
        Self::fetch(self.request(Method::POST, "/upload", Some(token)).multipart(form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("https://example.com/api/").expect("client");
        assert_eq!(client.endpoint("/articles"), "https://example.com/api/articles");
        assert_eq!(client.endpoint("categories/1"), "https://example.com/api/categories/1");
    }
}
