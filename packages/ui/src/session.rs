//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] sits at the app root and provides three contexts:
//! the [`SessionContext`] (the signed-in user, single source of truth), the
//! loaded [`ClientConfig`], and the shared [`HttpClient`]. Pages read them with
//! [`use_session`], [`use_config`] and [`use_api`] instead of touching browser
//! storage directly.

use api::HttpClient;
use dioxus::prelude::*;
use store::{ClientConfig, Session, SessionService};

use crate::flows::Destination;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
type PlatformStore = store::MemoryStore;

fn platform_service() -> SessionService<PlatformStore> {
    SessionService::new(PlatformStore::new())
}

/// The signed-in user, mirrored into persistent storage on every change.
#[derive(Clone)]
pub struct SessionContext {
    state: Signal<Option<Session>>,
    service: SessionService<PlatformStore>,
}

impl SessionContext {
    pub fn current(&self) -> Option<Session> {
        self.state.read().clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().as_ref().is_some_and(|s| s.is_admin)
    }

    pub fn sign_in(&mut self, session: Session) {
        tracing::info!("Signed in as {}", session.username);
        self.service.save(&session);
        self.state.set(Some(session));
    }

    pub fn sign_out(&mut self) {
        self.service.clear();
        self.state.set(None);
    }

    /// Apply a page-load redirect, signing out when it leads back to login.
    pub fn follow_redirect(&mut self, to: Destination) {
        if crate::flows::follow_redirect(&self.service, to) == Destination::Login {
            self.state.set(None);
        }
    }

    /// Keep the stored username in step with a profile edit.
    pub fn rename(&mut self, username: &str) {
        if let Some(session) = self.service.rename(username) {
            self.state.set(Some(session));
        }
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

pub fn use_api() -> HttpClient {
    use_context::<HttpClient>()
}

/// Provider component for session, config and API client.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let service = use_hook(platform_service);
    let state = use_signal({
        let service = service.clone();
        move || service.load()
    });
    use_context_provider(|| SessionContext { state, service });

    let config = use_context_provider(ClientConfig::load);
    use_context_provider(|| HttpClient::http(&config));

    rsx! {
        {children}
    }
}
