use std::time::Duration;

use journal_client::Role;
use journal_client::session::Session;
use leptos::prelude::*;

use crate::storage;

/// Сколько висит уведомление.
const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) message: String,
    pub(crate) is_error: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) session: RwSignal<Option<Session>>,
    pub(crate) notice: RwSignal<Option<Notice>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            session: RwSignal::new(storage::load_session()),
            notice: RwSignal::new(None),
        }
    }

    pub(crate) fn role(&self) -> Option<Role> {
        self.session.with(|session| session.as_ref().map(|session| session.role))
    }

    pub(crate) fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub(crate) fn sign_in(&self, session: Session) -> Result<(), String> {
        storage::save_session(&session)?;
        self.session.set(Some(session));
        Ok(())
    }

    pub(crate) fn sign_out(&self) {
        if let Err(err) = storage::clear_session() {
            leptos::logging::warn!("failed to clear session: {err}");
        }
        self.session.set(None);
    }

    pub(crate) fn notify(&self, message: impl Into<String>) {
        self.show(message.into(), false);
    }

    pub(crate) fn notify_error(&self, message: impl Into<String>) {
        self.show(message.into(), true);
    }

    fn show(&self, message: String, is_error: bool) {
        let notice = Notice { message, is_error };
        self.notice.set(Some(notice.clone()));

        let slot = self.notice;
        set_timeout(
            move || {
                if slot.get_untracked().as_ref() == Some(&notice) {
                    slot.set(None);
                }
            },
            NOTICE_TTL,
        );
    }
}

pub(crate) fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
