//! Политика доступа к страницам фронтенда.
//!
//! Одна и та же политика применяется gate-сервером при загрузке страницы
//! (с удалённой проверкой токена) и роутером фронтенда при переходах
//! внутри приложения (токен считается проверенным, если он есть).

use crate::models::Role;

/// Страницы, доступные без токена.
pub const PUBLIC_PATHS: [&str; 3] = ["/login", "/register", "/"];
/// Куда отправлять неаутентифицированных.
pub const LOGIN_PATH: &str = "/login";
/// Куда отправлять при несовпадении роли.
pub const HOME_PATH: &str = "/";

const ADMIN_PREFIX: &str = "/admin";
const USER_PREFIX: &str = "/user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Решение по запросу страницы.
pub enum Access {
    /// Страницу можно отдавать.
    Allow,
    /// Перенаправить; при `clear_session` cookie `token`/`role` удаляются.
    Redirect {
        /// Целевой путь.
        to: &'static str,
        /// Нужно ли сбросить сессию.
        clear_session: bool,
    },
}

impl Access {
    const fn to_login(clear_session: bool) -> Self {
        Self::Redirect {
            to: LOGIN_PATH,
            clear_session,
        }
    }
}

/// Путь из белого списка публичных страниц (точное совпадение).
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Решение, которое можно принять без проверки токена.
///
/// `None` означает, что токен есть и его нужно проверить.
pub fn precheck(path: &str, token: Option<&str>) -> Option<Access> {
    if is_public(path) {
        return Some(Access::Allow);
    }

    match token.map(str::trim) {
        Some(token) if !token.is_empty() => None,
        _ => Some(Access::to_login(false)),
    }
}

/// Решение после проверки токена.
///
/// Невалидный токен сбрасывает сессию; несовпадение роли с префиксом
/// `/admin` или `/user` отправляет на главную.
pub fn after_verification(path: &str, token_valid: bool, role: Option<&str>) -> Access {
    if !token_valid {
        return Access::to_login(true);
    }

    let role = role.and_then(Role::parse);
    if path.starts_with(ADMIN_PREFIX) && role != Some(Role::Admin) {
        return Access::Redirect {
            to: HOME_PATH,
            clear_session: false,
        };
    }
    if path.starts_with(USER_PREFIX) && role != Some(Role::User) {
        return Access::Redirect {
            to: HOME_PATH,
            clear_session: false,
        };
    }

    Access::Allow
}

/// Проверка без обращения к API: наличие токена считается достаточным.
pub fn evaluate_local(path: &str, token: Option<&str>, role: Option<&str>) -> Access {
    precheck(path, token).unwrap_or_else(|| after_verification(path, true, role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_are_allowed_without_token() {
        for path in PUBLIC_PATHS {
            assert_eq!(precheck(path, None), Some(Access::Allow), "path {path}");
        }
    }

    #[test]
    fn public_match_is_exact() {
        assert!(!is_public("/login/extra"));
        assert!(!is_public("/articles"));
    }

    #[test]
    fn missing_or_blank_token_redirects_to_login_without_clearing() {
        let expected = Some(Access::Redirect {
            to: LOGIN_PATH,
            clear_session: false,
        });
        assert_eq!(precheck("/articles", None), expected);
        assert_eq!(precheck("/articles", Some("  ")), expected);
    }

    #[test]
    fn present_token_needs_verification() {
        assert_eq!(precheck("/articles", Some("abc")), None);
    }

    #[test]
    fn invalid_token_redirects_to_login_and_clears_session() {
        assert_eq!(
            after_verification("/articles", false, Some("admin")),
            Access::Redirect {
                to: LOGIN_PATH,
                clear_session: true
            }
        );
    }

    #[test]
    fn user_role_on_admin_path_is_redirected_home() {
        assert_eq!(
            after_verification("/admin/articles", true, Some("User")),
            Access::Redirect {
                to: HOME_PATH,
                clear_session: false
            }
        );
    }

    #[test]
    fn admin_role_on_user_path_is_redirected_home() {
        assert_eq!(
            after_verification("/user/profile", true, Some("Admin")),
            Access::Redirect {
                to: HOME_PATH,
                clear_session: false
            }
        );
    }

    #[test]
    fn missing_role_cannot_enter_role_sections() {
        assert_ne!(after_verification("/admin", true, None), Access::Allow);
        assert_ne!(after_verification("/user/profile", true, None), Access::Allow);
        assert_eq!(after_verification("/articles", true, None), Access::Allow);
    }

    #[test]
    fn matching_roles_are_allowed_case_insensitively() {
        assert_eq!(after_verification("/admin/categories", true, Some("ADMIN")), Access::Allow);
        assert_eq!(after_verification("/user/profile", true, Some("user")), Access::Allow);
    }

    #[test]
    fn evaluate_local_combines_both_steps() {
        assert_eq!(evaluate_local("/", None, None), Access::Allow);
        assert_eq!(
            evaluate_local("/admin/articles", Some("t"), Some("User")),
            Access::Redirect {
                to: HOME_PATH,
                clear_session: false
            }
        );
        assert_eq!(evaluate_local("/articles", Some("t"), Some("User")), Access::Allow);
    }
}
