use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use futures::executor::block_on;

use super::*;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::fetch::{AUTHORIZATION, CONTENT_TYPE};
use crate::session::MemoryStore;
use crate::test_support::{FakePage, FakeTransport};

const POLL_JSON: &str = r#"{"id":5,"owner":null,"question":"Tea or coffee?","options":[{"id":10,"text":"Tea","votes":3},{"id":20,"text":"Coffee","votes":1}]}"#;

fn client(
    items: &[(&str, &str)],
    transport: FakeTransport,
) -> Client<MemoryStore, FakePage, FakeTransport> {
    Client::new(
        ClientConfig::default(),
        MemoryStore::with_items(items.iter().copied()),
        FakePage::with_markers(&[Some("guest"), Some("auth")]),
        transport,
    )
}

fn sample_poll() -> Poll {
    Poll {
        id: 5,
        owner: None,
        question: "Tea or coffee?".to_owned(),
        options: vec![
            PollOption { id: 10, text: "Tea".to_owned(), votes: 3 },
            PollOption { id: 20, text: "Coffee".to_owned(), votes: 1 },
        ],
    }
}

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(poll_endpoint(7), "/api/polls/7");
    assert_eq!(vote_endpoint(7), "/api/polls/7/vote");
}

// =============================================================
// login
// =============================================================

#[test]
fn login_posts_form_and_persists_session() {
    let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(r#"{"sub":"admin","role":"admin"}"#));
    let body = format!(r#"{{"access_token":"{token}","token_type":"bearer"}}"#);
    let c = client(&[], FakeTransport::default().respond(200, &body));

    let record = block_on(c.login("admin", "secret")).unwrap();

    assert_eq!(record.token.as_deref(), Some(token.as_str()));
    assert_eq!(record.role, "admin");
    assert_eq!(record.username, "admin");
    assert_eq!(c.session().read(), record);
    assert_eq!(c.page().visibility(), [false, true]);

    let (url, sent) = c.transport().last_request().unwrap();
    assert_eq!(url, "/login");
    assert_eq!(sent.method, Method::Post);
    assert!(!sent.headers.contains(CONTENT_TYPE));
    let Some(Body::Multipart(form)) = sent.body else {
        panic!("login must send a multipart form");
    };
    let fields: Vec<_> = form.fields().collect();
    assert_eq!(fields, [("username", "admin"), ("password", "secret")]);
}

#[test]
fn rejected_login_leaves_storage_untouched() {
    let c = client(
        &[("username", "prev")],
        FakeTransport::default().respond(400, r#"{"detail":"bad credentials"}"#),
    );
    let err = block_on(c.login("admin", "wrong")).unwrap_err();
    assert!(matches!(err, ApiError::Status(400)));
    assert!(!c.session().store().contains("token"));
    assert_eq!(c.session().store().get_item("username").as_deref(), Some("prev"));
}

#[test]
fn login_network_failure_surfaces_fetch_error() {
    let c = client(&[], FakeTransport::default().fail(FetchError::Network("offline".to_owned())));
    let err = block_on(c.login("a", "b")).unwrap_err();
    assert!(matches!(err, ApiError::Fetch(FetchError::Network(_))));
}

// =============================================================
// polls
// =============================================================

#[test]
fn list_polls_decodes_ids_with_bearer() {
    let c = client(&[("token", "t")], FakeTransport::default().respond(200, "[1,5,9]"));
    assert_eq!(block_on(c.list_polls()).unwrap(), [1, 5, 9]);
    let (url, sent) = c.transport().last_request().unwrap();
    assert_eq!(url, "/api/polls");
    assert_eq!(sent.headers.get(AUTHORIZATION), Some("Bearer t"));
}

#[test]
fn get_poll_decodes_poll() {
    let c = client(&[], FakeTransport::default().respond(200, POLL_JSON));
    assert_eq!(block_on(c.get_poll(5)).unwrap(), sample_poll());
    assert_eq!(c.transport().last_request().unwrap().0, "/api/polls/5");
}

#[test]
fn get_poll_missing_is_status_error() {
    let c = client(&[], FakeTransport::default().respond(404, r#"{"detail":"not found"}"#));
    let err = block_on(c.get_poll(99)).unwrap_err();
    assert!(matches!(err, ApiError::Status(404)));
    assert_eq!(err.to_string(), "request failed: 404");
}

#[test]
fn vote_posts_option_id_as_json() {
    let c = client(&[], FakeTransport::default().respond(200, POLL_JSON));
    block_on(c.vote(5, 10)).unwrap();
    let (url, sent) = c.transport().last_request().unwrap();
    assert_eq!(url, "/api/polls/5/vote");
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.headers.get(CONTENT_TYPE), Some("application/json"));
    assert_eq!(sent.body, Some(Body::Text(r#"{"option_id":10}"#.to_owned())));
}

#[test]
fn create_poll_sends_poll_body() {
    let c = client(&[("token", "t")], FakeTransport::default().respond(201, POLL_JSON));
    let created = block_on(c.create_poll(&sample_poll())).unwrap();
    assert_eq!(created, sample_poll());
    let (_, sent) = c.transport().last_request().unwrap();
    let Some(Body::Text(text)) = sent.body else {
        panic!("create_poll must send a JSON body");
    };
    let echoed: Poll = serde_json::from_str(&text).unwrap();
    assert_eq!(echoed, sample_poll());
}

#[test]
fn malformed_body_is_json_error() {
    let c = client(&[], FakeTransport::default().respond(200, "<html>"));
    let err = block_on(c.list_polls()).unwrap_err();
    assert!(matches!(err, ApiError::Json(_)));
}
