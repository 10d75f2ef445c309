use journal_client::session::{REFRESH_TOKEN_KEY, ROLE_KEY, Session, TOKEN_KEY, bearer};
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

fn html_document() -> Result<HtmlDocument, String> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
        .ok_or_else(|| "document is not available".to_string())
}

fn write_cookies(assignments: &[String]) -> Result<(), String> {
    let document = html_document()?;
    for assignment in assignments {
        document
            .set_cookie(assignment)
            .map_err(|_| "failed to write cookie".to_string())?;
    }
    Ok(())
}

/// Заголовок `Authorization` из токена в `localStorage`, независимо от роли.
pub(crate) fn load_bearer() -> Option<String> {
    let token = local_storage().ok()?.get_item(TOKEN_KEY).ok()?;
    bearer(token.as_deref())
}

/// Сессия из `localStorage`; битые или неполные данные дают `None`.
pub(crate) fn load_session() -> Option<Session> {
    let storage = local_storage().ok()?;
    let token = storage.get_item(TOKEN_KEY).ok()?;
    let role = storage.get_item(ROLE_KEY).ok()?;
    let refresh_token = storage.get_item(REFRESH_TOKEN_KEY).ok().flatten();
    Session::restore(token.as_deref(), role.as_deref(), refresh_token.as_deref())
}

/// Сохраняет сессию и зеркалирует `token`/`role` в cookie для gate.
pub(crate) fn save_session(session: &Session) -> Result<(), String> {
    let storage = local_storage()?;
    storage
        .set_item(TOKEN_KEY, &session.token)
        .map_err(|_| "failed to save token".to_string())?;
    storage
        .set_item(ROLE_KEY, session.role.as_str())
        .map_err(|_| "failed to save role".to_string())?;
    match &session.refresh_token {
        Some(refresh_token) => storage
            .set_item(REFRESH_TOKEN_KEY, refresh_token)
            .map_err(|_| "failed to save refresh token".to_string())?,
        None => storage
            .remove_item(REFRESH_TOKEN_KEY)
            .map_err(|_| "failed to clear refresh token".to_string())?,
    }

    write_cookies(&session.cookie_assignments())
}

/// Удаляет сессию из `localStorage` и cookie.
pub(crate) fn clear_session() -> Result<(), String> {
    let storage = local_storage()?;
    for key in [TOKEN_KEY, ROLE_KEY, REFRESH_TOKEN_KEY] {
        storage
            .remove_item(key)
            .map_err(|_| format!("failed to clear {key}"))?;
    }

    write_cookies(&Session::clear_cookie_assignments())
}

/// Полная загрузка страницы: gate увидит актуальные cookie.
pub(crate) fn hard_navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}
