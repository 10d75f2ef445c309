use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use journal_client::access::{self, Access};
use journal_client::session::{ROLE_COOKIE, TOKEN_COOKIE};
use tracing::{debug, warn};

use crate::presentation::AppState;

/// Пути, которые gate пропускает без проверки: ассеты сборки и healthz.
const EXCLUDED_PREFIXES: [&str; 2] = ["/pkg/", "/assets/"];
const EXCLUDED_PATHS: [&str; 2] = ["/favicon.ico", "/healthz"];

fn is_excluded(path: &str) -> bool {
    EXCLUDED_PATHS.contains(&path) || EXCLUDED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn cookie_value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(|cookie| cookie.value())
}

fn expired(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

pub(crate) async fn auth_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if is_excluded(&path) {
        return next.run(request).await;
    }

    let token = cookie_value(&jar, TOKEN_COOKIE);
    let decision = match access::precheck(&path, token) {
        Some(decision) => decision,
        None => {
            let token = token.unwrap_or_default();
            let valid = match state.verifier.verify(token).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(path = %path, error = %err, "session token verification failed");
                    false
                }
            };
            access::after_verification(&path, valid, cookie_value(&jar, ROLE_COOKIE))
        }
    };

    match decision {
        Access::Allow => {
            debug!(path = %path, "page allowed");
            next.run(request).await
        }
        Access::Redirect { to, clear_session } => {
            debug!(path = %path, to, clear_session, "page redirected");
            let jar = if clear_session {
                jar.remove(expired(TOKEN_COOKIE)).remove(expired(ROLE_COOKIE))
            } else {
                jar
            };
            (jar, Redirect::temporary(to)).into_response()
        }
    }
}
