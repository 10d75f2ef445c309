use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use journal_client::listing::{ListQuery, ListSource, Page};
use journal_client::models::{
    ArticlePayload, CategoryPayload, ListEnvelope, LoginPayload, RegisterPayload, UploadResponse,
};
use journal_client::{Article, Category, ClientError, ClientResult, LoginResponse, Profile};
use serde::{Serialize, de::DeserializeOwned};

use crate::storage;

const API_BASE_URL: &str = match option_env!("JOURNAL_API_BASE_URL") {
    Some(value) => value,
    None => "https://test-fe.mysellerpintar.com/api",
};

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn network(err: gloo_net::Error) -> ClientError {
    ClientError::Network(err.to_string())
}

/// Bearer-токен из `localStorage` добавляется к каждому запросу.
fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::load_bearer() {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

fn with_query(builder: RequestBuilder, query: &ListQuery) -> RequestBuilder {
    let pairs = query.to_pairs();
    builder.query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
}

async fn send(request: Request) -> ClientResult<Response> {
    let response = request.send().await.map_err(network)?;
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_status(status, &body));
    }
    Ok(response)
}

async fn fetch<T: DeserializeOwned>(request: Request) -> ClientResult<T> {
    send(request)
        .await?
        .json::<T>()
        .await
        .map_err(|err| ClientError::Decode(err.to_string()))
}

fn build(builder: RequestBuilder) -> ClientResult<Request> {
    authorized(builder).build().map_err(network)
}

fn build_json<T: Serialize>(builder: RequestBuilder, body: &T) -> ClientResult<Request> {
    authorized(builder).json(body).map_err(network)
}

pub(crate) async fn login(payload: &LoginPayload) -> ClientResult<LoginResponse> {
    fetch(build_json(Request::post(&endpoint("/auth/login")), payload)?).await
}

pub(crate) async fn register(payload: &RegisterPayload) -> ClientResult<()> {
    send(build_json(Request::post(&endpoint("/auth/register")), payload)?).await?;
    Ok(())
}

pub(crate) async fn profile() -> ClientResult<Profile> {
    fetch(build(Request::get(&endpoint("/auth/profile")))?).await
}

pub(crate) async fn list_articles(query: &ListQuery) -> ClientResult<Page<Article>> {
    let request = build(with_query(Request::get(&endpoint("/articles")), query))?;
    let envelope: ListEnvelope<Article> = fetch(request).await?;
    Ok(envelope.into())
}

pub(crate) async fn get_article(id: &str) -> ClientResult<Article> {
    fetch(build(Request::get(&endpoint(&format!("/articles/{id}"))))?).await
}

pub(crate) async fn create_article(payload: &ArticlePayload) -> ClientResult<Article> {
    fetch(build_json(Request::post(&endpoint("/articles")), payload)?).await
}

pub(crate) async fn update_article(id: &str, payload: &ArticlePayload) -> ClientResult<Article> {
    fetch(build_json(Request::put(&endpoint(&format!("/articles/{id}"))), payload)?).await
}

pub(crate) async fn delete_article(id: &str) -> ClientResult<()> {
    send(build(Request::delete(&endpoint(&format!("/articles/{id}"))))?).await?;
    Ok(())
}

pub(crate) async fn list_categories(query: &ListQuery) -> ClientResult<Page<Category>> {
    let request = build(with_query(Request::get(&endpoint("/categories")), query))?;
    let envelope: ListEnvelope<Category> = fetch(request).await?;
    Ok(envelope.into())
}

/// Все категории без фильтров, для выпадающих списков.
pub(crate) async fn all_categories() -> ClientResult<Vec<Category>> {
    let envelope: ListEnvelope<Category> =
        fetch(build(Request::get(&endpoint("/categories")))?).await?;
    Ok(Page::from(envelope).items)
}

pub(crate) async fn create_category(payload: &CategoryPayload) -> ClientResult<Category> {
    fetch(build_json(Request::post(&endpoint("/categories")), payload)?).await
}

pub(crate) async fn update_category(id: &str, payload: &CategoryPayload) -> ClientResult<Category> {
    fetch(build_json(Request::put(&endpoint(&format!("/categories/{id}"))), payload)?).await
}

pub(crate) async fn delete_category(id: &str) -> ClientResult<()> {
    send(build(Request::delete(&endpoint(&format!("/categories/{id}"))))?).await?;
    Ok(())
}

/// Загрузка обложки: multipart с полем `image`.
pub(crate) async fn upload_image(file: &web_sys::File) -> ClientResult<UploadResponse> {
    let form = web_sys::FormData::new()
        .map_err(|_| ClientError::InvalidRequest("FormData is not available".to_string()))?;
    form.append_with_blob_and_filename("image", file, &file.name())
        .map_err(|_| ClientError::InvalidRequest("failed to attach image".to_string()))?;

    let request = authorized(Request::post(&endpoint("/upload")))
        .body(form)
        .map_err(network)?;
    fetch(request).await
}

#[derive(Debug, Clone, Copy)]
/// Источник страниц статей для экранов списков.
pub(crate) struct ArticlesApi;

#[async_trait(?Send)]
impl ListSource<Article> for ArticlesApi {
    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Page<Article>> {
        list_articles(query).await
    }
}

#[derive(Debug, Clone, Copy)]
/// Источник страниц категорий.
pub(crate) struct CategoriesApi;

#[async_trait(?Send)]
impl ListSource<Category> for CategoriesApi {
    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Page<Category>> {
        list_categories(query).await
    }
}
