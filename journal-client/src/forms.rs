//! Схемы форм: логин, регистрация, статья, категория.
//!
//! Формы обрезают пробелы, валидируются через `validator` и отдают либо
//! тело запроса к API, либо ошибки по полям.

use validator::{Validate, ValidationErrors};

use crate::error::{ClientError, FieldErrors};
use crate::models::{ArticlePayload, Category, CategoryPayload, LoginPayload, RegisterPayload, Role};

/// Общее сообщение при неудачном входе без текста от API.
pub const LOGIN_FAILED: &str = "Login failed";
/// Общее сообщение при неудачном сохранении статьи.
pub const ARTICLE_SAVE_FAILED: &str = "Failed to save article. Using demo mode.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ошибки формы: по полям и общая.
pub struct FormErrors {
    fields: FieldErrors,
    general: Option<String>,
}

impl FormErrors {
    /// Только общая ошибка.
    pub fn general_only(message: impl Into<String>) -> Self {
        Self {
            fields: FieldErrors::new(),
            general: Some(message.into()),
        }
    }

    /// Ошибки по полям из ответа API, иначе `generic`.
    pub fn from_submit_error(err: &ClientError, generic: &str) -> Self {
        match err.field_errors() {
            Some(fields) => Self {
                fields: fields.clone(),
                general: None,
            },
            None => Self::general_only(generic),
        }
    }

    /// Сообщение API как общая ошибка, иначе `generic`.
    pub fn from_api_message(err: &ClientError, generic: &str) -> Self {
        let message = err
            .api_message()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(generic);
        Self::general_only(message)
    }

    /// Добавляет ошибку поля.
    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.fields.insert(field.into(), message.into());
        self
    }

    /// Снимает ошибку поля, например после успешной загрузки файла.
    pub fn without_field(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    /// Ошибка поля, если есть.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Все ошибки полей.
    pub fn fields(&self) -> &FieldErrors {
        &self.fields
    }

    /// Общая ошибка, если есть.
    pub fn general(&self) -> Option<&str> {
        self.general.as_deref()
    }

    /// Ошибок нет.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                let error = errors.first()?;
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                Some((field.to_string(), message))
            })
            .collect();

        Self {
            fields,
            general: None,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
/// Форма входа.
pub struct LoginForm {
    /// Логин.
    #[validate(length(min = 6, message = "Username must be at least 6 characters"))]
    pub username: String,
    /// Пароль (пробелы не обрезаются).
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl LoginForm {
    /// Проверяет форму и собирает тело `POST /auth/login`.
    pub fn submit(&self) -> Result<LoginPayload, FormErrors> {
        let form = Self {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };
        form.validate()?;

        Ok(LoginPayload {
            username: form.username,
            password: form.password,
        })
    }
}

#[derive(Debug, Clone, Validate)]
/// Форма регистрации.
pub struct RegisterForm {
    /// Логин.
    #[validate(length(min = 6, message = "Username must be at least 6 characters"))]
    pub username: String,
    /// Пароль.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Роль нового пользователя.
    pub role: Role,
}

impl RegisterForm {
    /// Проверяет форму и собирает тело `POST /auth/register`.
    pub fn submit(&self) -> Result<RegisterPayload, FormErrors> {
        let form = Self {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        };
        form.validate()?;

        Ok(RegisterPayload {
            username: form.username,
            password: form.password,
            role: form.role,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
/// Форма создания/редактирования статьи.
pub struct ArticleForm {
    /// Заголовок.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Текст.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    /// Выбранная категория.
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    /// URL обложки (после загрузки или из существующей статьи).
    #[validate(url(message = "Invalid URL"))]
    pub image_url: Option<String>,
}

impl ArticleForm {
    /// Проверяет форму. Если список категорий известен, выбранная
    /// категория обязана в нём быть.
    pub fn submit(&self, categories: &[Category]) -> Result<ArticlePayload, FormErrors> {
        let form = Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            category_id: self.category_id.trim().to_string(),
            image_url: self
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        };

        let mut errors = match form.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => FormErrors::from(errors),
        };

        let known_category = categories.is_empty()
            || categories.iter().any(|category| category.id == form.category_id);
        if !form.category_id.is_empty() && !known_category {
            errors = errors.with_field("category_id", "Select a valid category");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ArticlePayload {
            title: form.title,
            content: form.content,
            category_id: form.category_id,
            image_url: form.image_url,
        })
    }

    /// Количество символов текста для счётчика под полем.
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

#[derive(Debug, Clone, Default, Validate)]
/// Форма категории.
pub struct CategoryForm {
    /// Название.
    #[validate(length(min = 2, message = "Category name must be at least 2 characters"))]
    pub name: String,
}

impl CategoryForm {
    /// Проверяет форму и собирает тело запроса.
    pub fn submit(&self) -> Result<CategoryPayload, FormErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
        };
        form.validate()?;
        Ok(CategoryPayload { name: form.name })
    }
}
