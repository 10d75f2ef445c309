use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Сообщения об ошибках по полям формы: `field -> message`.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `journal-client`.
pub enum ClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ошибка сети в транспорте, который не использует `reqwest` (браузер).
    #[error("network error: {0}")]
    Network(String),

    /// Требуется авторизация (отсутствует/некорректен токен или неверные учётные данные).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// API вернул ошибку; `field_errors` заполнен, если тело ответа
    /// содержало структурированный объект `errors`.
    #[error("api error {status}: {message}")]
    Api {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение из тела ответа или описание статуса.
        message: String,
        /// Ошибки по полям.
        field_errors: FieldErrors,
    },

    /// Ответ не удалось разобрать.
    #[error("decode error: {0}")]
    Decode(String),

    /// Некорректный запрос, обнаруженный до отправки.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `journal-client`.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Default, Deserialize)]
struct ErrorBodyDto {
    message: Option<String>,
    error: Option<String>,
    errors: Option<Value>,
}

impl ClientError {
    /// Строит ошибку по статусу и сырому телу неуспешного ответа.
    pub fn from_status(status: u16, body: &str) -> Self {
        let dto = serde_json::from_str::<ErrorBodyDto>(body).unwrap_or_default();
        let message = dto.message.or(dto.error).filter(|m| !m.trim().is_empty());

        match status {
            401 | 403 => Self::Unauthorized(message.unwrap_or_else(|| "unauthorized".to_string())),
            404 => Self::NotFound,
            _ => Self::Api {
                status,
                message: message.unwrap_or_else(|| format!("http status {status}")),
                field_errors: dto.errors.map(parse_field_errors).unwrap_or_default(),
            },
        }
    }

    #[cfg(feature = "http")]
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), "");
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Http(err)
    }

    /// Ошибки по полям, если API их вернул.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Api { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// Сообщение, пригодное для показа пользователю, если API его прислал.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message) | Self::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

fn parse_field_errors(raw: Value) -> FieldErrors {
    let Value::Object(map) = raw else {
        return FieldErrors::new();
    };

    map.into_iter()
        .filter_map(|(field, value)| {
            let message = match value {
                Value::String(message) => message,
                Value::Array(items) => items
                    .into_iter()
                    .find_map(|item| item.as_str().map(str::to_string))?,
                _ => return None,
            };
            Some((field, message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_maps_auth_statuses_with_message() {
        let err = ClientError::from_status(401, r#"{"message":"Invalid credentials"}"#);
        match err {
            ClientError::Unauthorized(message) => assert_eq!(message, "Invalid credentials"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = ClientError::from_status(403, "");
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "unauthorized"));
    }

    #[test]
    fn from_status_maps_not_found() {
        assert!(matches!(ClientError::from_status(404, "{}"), ClientError::NotFound));
    }

    #[test]
    fn from_status_collects_field_errors_from_strings_and_arrays() {
        let body = r#"{"message":"Validation failed","errors":{"title":"Title is taken","content":["too short","other"]}}"#;
        let err = ClientError::from_status(422, body);

        let fields = err.field_errors().expect("field errors must be parsed");
        assert_eq!(fields.get("title").map(String::as_str), Some("Title is taken"));
        assert_eq!(fields.get("content").map(String::as_str), Some("too short"));
        assert_eq!(err.api_message(), Some("Validation failed"));
    }

    #[test]
    fn from_status_without_body_uses_status_message() {
        let err = ClientError::from_status(500, "<html>oops</html>");
        match err {
            ClientError::Api {
                status,
                message,
                field_errors,
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "http status 500");
                assert!(field_errors.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_object_errors_are_ignored() {
        let err = ClientError::from_status(400, r#"{"errors":["bad"]}"#);
        assert!(err.field_errors().is_none());
    }
}
