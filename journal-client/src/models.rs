use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::Page;

/// Имя категории, если статья пришла без вложенной категории.
pub const DEFAULT_CATEGORY_NAME: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Роль пользователя. API присылает `Admin`/`User`, сравнение без учёта регистра.
pub enum Role {
    /// Администратор: доступ к `/admin/*`.
    Admin,
    /// Читатель: доступ к `/user/*`.
    User,
}

impl Role {
    /// Разбирает роль без учёта регистра и пробелов по краям.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("admin") {
            Some(Self::Admin)
        } else if raw.eq_ignore_ascii_case("user") {
            Some(Self::User)
        } else {
            None
        }
    }

    /// Значение в том виде, в каком его отдаёт API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }

    /// Префикс защищённых страниц этой роли.
    pub fn home_prefix(self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::User => "/user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown role: {value}"))
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Категория, вложенная в статью.
pub struct CategoryRef {
    /// Идентификатор категории.
    pub id: String,
    /// Название категории.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Статья в том виде, в каком её отдаёт API.
pub struct Article {
    /// Идентификатор статьи.
    pub id: String,
    /// Заголовок.
    pub title: String,
    /// Текст статьи.
    pub content: String,
    /// URL обложки.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Идентификатор категории (если API прислал его отдельно).
    #[serde(default)]
    pub category_id: Option<String>,
    /// Вложенная категория.
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Дата создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата последнего изменения (UTC).
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Название категории для отображения.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or(DEFAULT_CATEGORY_NAME)
    }

    /// Идентификатор категории: из вложенного объекта или из `categoryId`.
    pub fn category_key(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|category| category.id.as_str())
            .or(self.category_id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Категория статей.
pub struct Category {
    /// Идентификатор категории.
    pub id: String,
    /// Название.
    pub name: String,
    /// Дата создания (UTC).
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Количество статей в категории, если API его считает.
    #[serde(default)]
    pub article_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ответ `POST /auth/login`.
pub struct LoginResponse {
    /// Bearer-токен.
    pub token: String,
    /// Роль вошедшего пользователя.
    pub role: Role,
    /// Refresh-токен, если API его выдаёт.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Ответ `GET /auth/profile`.
pub struct Profile {
    /// Идентификатор пользователя.
    #[serde(default)]
    pub id: Option<String>,
    /// Логин.
    pub username: String,
    /// Роль.
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
/// Тело `POST /auth/login`.
pub struct LoginPayload {
    /// Логин.
    pub username: String,
    /// Пароль.
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
/// Тело `POST /auth/register`.
pub struct RegisterPayload {
    /// Логин.
    pub username: String,
    /// Пароль.
    pub password: String,
    /// Запрошенная роль.
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Тело создания/обновления статьи.
pub struct ArticlePayload {
    /// Заголовок.
    pub title: String,
    /// Текст.
    pub content: String,
    /// Идентификатор категории.
    pub category_id: String,
    /// URL обложки, полученный из `POST /upload`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Тело создания/обновления категории.
pub struct CategoryPayload {
    /// Название.
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ответ `POST /upload`.
pub struct UploadResponse {
    /// Публичный URL загруженного изображения.
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
/// Ответ списка: API отдаёт либо конверт `{data, total}`, либо голый массив.
pub enum ListEnvelope<T> {
    /// `{ "data": [...], "total": n }` (или `totalData`).
    Paged {
        /// Элементы страницы.
        data: Vec<T>,
        /// Общее количество, если известно.
        #[serde(default, alias = "totalData")]
        total: Option<u64>,
    },
    /// Голый массив без метаданных.
    Bare(Vec<T>),
}

impl<T> From<ListEnvelope<T>> for Page<T> {
    fn from(value: ListEnvelope<T>) -> Self {
        match value {
            ListEnvelope::Paged { data, total } => Page { items: data, total },
            ListEnvelope::Bare(items) => Page { items, total: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" admin "), Some(Role::Admin));
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("guest"), None);
    }

    #[test]
    fn role_serializes_as_api_value() {
        let raw = serde_json::to_string(&Role::Admin).expect("role must serialize");
        assert_eq!(raw, r#""Admin""#);
        let role: Role = serde_json::from_str(r#""user""#).expect("role must parse");
        assert_eq!(role, Role::User);
    }

    #[test]
    fn article_parses_camel_case_and_falls_back_to_general() {
        let raw = r#"{
            "id": "a1",
            "title": "Hello",
            "content": "World",
            "imageUrl": "https://img/1.jpg",
            "categoryId": "c9",
            "createdAt": "2025-04-13T10:55:12.000Z"
        }"#;
        let article: Article = serde_json::from_str(raw).expect("article must parse");

        assert_eq!(article.image_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(article.category_name(), DEFAULT_CATEGORY_NAME);
        assert_eq!(article.category_key(), Some("c9"));
        assert!(article.updated_at.is_none());
    }

    #[test]
    fn nested_category_wins_over_category_id() {
        let raw = r#"{
            "id": "a1", "title": "t", "content": "c", "categoryId": "old",
            "category": {"id": "new", "name": "Design"},
            "createdAt": "2025-04-13T10:55:12Z"
        }"#;
        let article: Article = serde_json::from_str(raw).expect("article must parse");
        assert_eq!(article.category_key(), Some("new"));
        assert_eq!(article.category_name(), "Design");
    }

    #[test]
    fn list_envelope_accepts_paged_and_bare_shapes() {
        let paged: ListEnvelope<Category> =
            serde_json::from_str(r#"{"data":[{"id":"1","name":"A"}],"totalData":12}"#)
                .expect("paged must parse");
        let page = Page::from(paged);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, Some(12));

        let bare: ListEnvelope<Category> =
            serde_json::from_str(r#"[{"id":"1","name":"A"},{"id":"2","name":"B"}]"#)
                .expect("bare must parse");
        let page = Page::from(bare);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, None);
    }

    #[test]
    fn article_payload_skips_missing_image() {
        let payload = ArticlePayload {
            title: "t".to_string(),
            content: "c".to_string(),
            category_id: "c1".to_string(),
            image_url: None,
        };
        let raw = serde_json::to_string(&payload).expect("payload must serialize");
        assert_eq!(raw, r#"{"title":"t","content":"c","categoryId":"c1"}"#);
    }
}
