//! WASM entry points callable from page scripts.
//!
//! `start` runs when the module is instantiated: it installs the panic hook
//! and logging, binds a [`BrowserClient`] with the default configuration and
//! schedules the first navbar render for when the document is parsed. Pages
//! with non-default keys or routes call `configure` right after loading.
//!
//! Poll calls exchange JSON text; page scripts `JSON.parse` the results.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use serde::Serialize;

use crate::api::Poll;
use crate::app::BrowserClient;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::fetch::RequestOptions;

thread_local! {
    static CLIENT: RefCell<Option<Rc<BrowserClient>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = install(ClientConfig::default()) {
        log::warn!("session client not installed: {err}");
    }
}

/// Replace the active configuration with a JSON override.
///
/// # Errors
///
/// Rejects malformed JSON, an unknown log level, or a page with no document
/// or storage to bind to. On rejection the previous client stays active.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = ClientConfig::from_json(json).map_err(js_error)?;
    install(config).map_err(js_error)
}

#[wasm_bindgen(js_name = renderNavbar)]
pub fn render_navbar() {
    with_client(BrowserClient::render_navbar);
}

#[wasm_bindgen]
pub fn logout() {
    with_client(BrowserClient::logout);
}

/// Advisory page gate. Returns `false` (after redirecting) when the page must
/// not render; also `false` when no client could be bound.
#[wasm_bindgen(js_name = requireAuth)]
pub fn require_auth(need_admin: Option<bool>) -> bool {
    with_client(|client| client.require_auth(need_admin.unwrap_or(false))).unwrap_or(false)
}

/// Sign in and persist the session; resolves to the stored role.
///
/// # Errors
///
/// Rejects with the error message for bad credentials or network failures.
#[wasm_bindgen]
pub async fn login(username: String, password: String) -> Result<JsValue, JsValue> {
    let client = bound_client()?;
    let record = client.login(&username, &password).await.map_err(js_error)?;
    Ok(JsValue::from_str(&record.role))
}

/// Status and body text handed back to page scripts by `fetchAuth`.
#[wasm_bindgen(getter_with_clone)]
pub struct FetchResult {
    pub status: u16,
    pub body: String,
}

/// Authenticated fetch for page scripts. `headers` is a JSON object of
/// header values; any status, including non-2xx, resolves.
///
/// # Errors
///
/// Rejects for an unsupported method, malformed headers, a network failure,
/// or when no client is bound.
#[wasm_bindgen(js_name = fetchAuth)]
pub async fn fetch_auth(
    url: String,
    method: Option<String>,
    headers: Option<String>,
    body: Option<String>,
) -> Result<FetchResult, JsValue> {
    let client = bound_client()?;
    let mut opts = RequestOptions::from_script(method.as_deref(), headers.as_deref(), body).map_err(js_error)?;
    let response = client.fetch_auth(&url, &mut opts).await.map_err(js_error)?;
    Ok(FetchResult {
        status: response.status,
        body: response.body,
    })
}

/// Resolves to a JSON array of poll ids.
///
/// # Errors
///
/// Rejects with the error message on any request failure.
#[wasm_bindgen(js_name = listPolls)]
pub async fn list_polls() -> Result<JsValue, JsValue> {
    let client = bound_client()?;
    to_json(&client.list_polls().await.map_err(js_error)?)
}

/// Resolves to the poll as JSON.
///
/// # Errors
///
/// Rejects with the error message on any request failure.
#[wasm_bindgen(js_name = getPoll)]
pub async fn get_poll(poll_id: u32) -> Result<JsValue, JsValue> {
    let client = bound_client()?;
    to_json(&client.get_poll(i64::from(poll_id)).await.map_err(js_error)?)
}

/// Cast a vote; resolves to the updated poll as JSON.
///
/// # Errors
///
/// Rejects with the error message on any request failure.
#[wasm_bindgen]
pub async fn vote(poll_id: u32, option_id: u32) -> Result<JsValue, JsValue> {
    let client = bound_client()?;
    let poll = client
        .vote(i64::from(poll_id), i64::from(option_id))
        .await
        .map_err(js_error)?;
    to_json(&poll)
}

/// Create a poll from its JSON form; resolves to the stored poll as JSON.
///
/// # Errors
///
/// Rejects for JSON that is not a poll or on any request failure.
#[wasm_bindgen(js_name = createPoll)]
pub async fn create_poll(poll: String) -> Result<JsValue, JsValue> {
    let client = bound_client()?;
    let poll: Poll = serde_json::from_str(&poll).map_err(js_error)?;
    to_json(&client.create_poll(&poll).await.map_err(js_error)?)
}

fn install(config: ClientConfig) -> Result<(), FetchError> {
    init_logging(&config);
    let client = Rc::new(BrowserClient::from_window(config).ok_or(FetchError::Unavailable)?);
    CLIENT.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&client)));
    on_document_ready(&client);
    Ok(())
}

fn init_logging(config: &ClientConfig) {
    let level = config.level().unwrap_or(log::Level::Info);
    // A second install only adjusts the level of the existing logger.
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

fn on_document_ready(client: &BrowserClient) {
    let document = client.page().document();
    if document.ready_state() != "loading" {
        client.init();
        return;
    }
    let callback = Closure::once_into_js(render_navbar);
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()) {
        log::warn!("DOMContentLoaded hook failed: {err:?}");
    }
}

fn current_client() -> Option<Rc<BrowserClient>> {
    CLIENT.with(|slot| slot.borrow().clone())
}

fn bound_client() -> Result<Rc<BrowserClient>, JsValue> {
    current_client().ok_or_else(|| js_error(FetchError::Unavailable))
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json(value: &impl Serialize) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(js_error)?;
    Ok(JsValue::from_str(&text))
}

fn with_client<R>(f: impl FnOnce(&BrowserClient) -> R) -> Option<R> {
    let client = current_client()?;
    Some(f(&client))
}
