//! Page-level client tying the session, navbar, guard and fetch together.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`Client`] exists per page. The WASM entry point builds it over
//! `localStorage`, the live document and `window.fetch`; tests build it over
//! in-memory doubles.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::fetch::{self, FetchResponse, RequestOptions, Transport};
use crate::guard;
use crate::nav::{self, NavSource};
use crate::navigate::Navigator;
use crate::session::{Session, SessionRecord, SessionStore};
use crate::token;

/// Session-aware page client.
pub struct Client<S, P, T> {
    config: ClientConfig,
    session: Session<S>,
    page: P,
    transport: T,
}

impl<S, P, T> Client<S, P, T>
where
    S: SessionStore,
    P: NavSource + Navigator,
    T: Transport,
{
    pub fn new(config: ClientConfig, store: S, page: P, transport: T) -> Self {
        let session = Session::new(store, config.keys.clone());
        Self {
            config,
            session,
            page,
            transport,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Page-load hook: bring the navbar in line with the stored session.
    pub fn init(&self) {
        self.render_navbar();
    }

    pub fn render_navbar(&self) {
        nav::render_navbar(self.page.nav_items(), &self.session.read());
    }

    /// Forget the session, refresh the navbar, then go to the home route.
    pub fn logout(&self) {
        self.session.clear();
        self.render_navbar();
        log::info!("logged out");
        self.page.navigate(&self.config.home_route);
    }

    /// Advisory page gate; see [`guard`] for why this is not a security control.
    pub fn require_auth(&self, need_admin: bool) -> bool {
        guard::require_auth(&self.session, &self.page, &self.config.login_route, need_admin)
    }

    /// Send `opts` to `url` with the session's bearer token attached.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged.
    pub async fn fetch_auth(&self, url: &str, opts: &mut RequestOptions) -> Result<FetchResponse, FetchError> {
        fetch::fetch_auth(
            &self.session,
            &self.transport,
            &self.config.json_content_type,
            url,
            opts,
        )
        .await
    }

    /// Persist a freshly issued token and refresh the navbar.
    ///
    /// Role and (when `username` is empty) username come from the token
    /// claims; an undecodable token still signs in with the default role.
    pub fn sign_in(&self, access_token: &str, username: &str) -> SessionRecord {
        let claims = match token::decode_claims(access_token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                log::warn!("access token claims unreadable: {err}");
                None
            }
        };
        if let (Some(claims), Some(now)) = (&claims, token::unix_now()) {
            if claims.is_expired(now) {
                log::warn!("access token already expired: exp={:?} now={now}", claims.exp);
            }
        }
        let record = SessionRecord::from_login(access_token, username, claims.as_ref());
        self.session.persist(&record);
        self.render_navbar();
        log::info!("signed in: username={} role={}", record.username, record.role);
        record
    }
}

#[cfg(feature = "hydrate")]
pub type BrowserClient =
    Client<crate::session::LocalStore, crate::nav::dom::DomPage, crate::fetch::gloo::GlooTransport>;

#[cfg(feature = "hydrate")]
impl BrowserClient {
    /// Bind to the current window, or `None` outside a browser document.
    pub fn from_window(config: ClientConfig) -> Option<Self> {
        let store = crate::session::LocalStore::from_window()?;
        let page = crate::nav::dom::DomPage::from_window(&config)?;
        Some(Self::new(config, store, page, crate::fetch::gloo::GlooTransport))
    }
}
