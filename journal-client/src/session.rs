//! Сессия пользователя: что лежит в `localStorage` и какие cookie
//! зеркалируются для проверки на стороне сервера.

use serde::{Deserialize, Serialize};

use crate::models::{LoginResponse, Role};

/// Ключ `localStorage` с bearer-токеном.
pub const TOKEN_KEY: &str = "token";
/// Ключ `localStorage` с ролью.
pub const ROLE_KEY: &str = "role";
/// Ключ `localStorage` с refresh-токеном.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Cookie с токеном, которую читает gate.
pub const TOKEN_COOKIE: &str = "token";
/// Cookie с ролью, которую читает gate.
pub const ROLE_COOKIE: &str = "role";
/// Время жизни зеркальных cookie.
pub const COOKIE_MAX_AGE_SECS: u32 = 3600;

const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Активная сессия: от входа до выхода или инвалидации токена.
pub struct Session {
    /// Bearer-токен.
    pub token: String,
    /// Роль пользователя.
    pub role: Role,
    /// Refresh-токен, если есть.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Session {
    /// Собирает сессию из сохранённых значений. Пустой токен или
    /// неизвестная роль означают отсутствие сессии.
    pub fn restore(token: Option<&str>, role: Option<&str>, refresh_token: Option<&str>) -> Option<Self> {
        let token = parse_token(token?)?;
        let role = Role::parse(role?)?;
        Some(Self {
            token,
            role,
            refresh_token: refresh_token.and_then(parse_token),
        })
    }

    /// Строки `document.cookie` для записи зеркальных cookie.
    pub fn cookie_assignments(&self) -> [String; 2] {
        [
            format!("{TOKEN_COOKIE}={}; path=/; max-age={COOKIE_MAX_AGE_SECS}", self.token),
            format!("{ROLE_COOKIE}={}; path=/; max-age={COOKIE_MAX_AGE_SECS}", self.role),
        ]
    }

    /// Строки `document.cookie`, удаляющие зеркальные cookie.
    pub fn clear_cookie_assignments() -> [String; 2] {
        [
            format!("{TOKEN_COOKIE}=; path=/; expires={EXPIRED}"),
            format!("{ROLE_COOKIE}=; path=/; expires={EXPIRED}"),
        ]
    }
}

impl From<LoginResponse> for Session {
    fn from(value: LoginResponse) -> Self {
        Self {
            token: value.token,
            role: value.role,
            refresh_token: value.refresh_token,
        }
    }
}

/// Обрезает пробелы; пустая строка токеном не считается.
pub fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// Значение заголовка `Authorization` для сохранённого токена.
///
/// Роль здесь не нужна: токен уходит с запросом, даже если сессию
/// целиком восстановить нельзя.
pub fn bearer(raw_token: Option<&str>) -> Option<String> {
    raw_token
        .and_then(parse_token)
        .map(|token| format!("Bearer {token}"))
}
