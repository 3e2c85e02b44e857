//! Typed calls to the votesys HTTP API.
//!
//! Every call goes through [`Client::fetch_auth`], so the bearer token and
//! JSON content type are applied the same way page scripts get them.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] and the body is discarded;
//! the server's `detail` text is for humans and not needed to branch on.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::app::Client;
use crate::error::ApiError;
use crate::fetch::{Body, Method, MultipartForm, RequestOptions, Transport};
use crate::nav::NavSource;
use crate::navigate::Navigator;
use crate::session::{SessionRecord, SessionStore};

pub const LOGIN_ENDPOINT: &str = "/login";
pub const POLLS_ENDPOINT: &str = "/api/polls";

/// One answer of a poll with its running tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: i64,
    pub text: String,
    pub votes: i64,
}

/// A poll question and its options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: i64,
    #[serde(default)]
    pub owner: Option<String>,
    pub question: String,
    pub options: Vec<PollOption>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
}

#[derive(Debug, Serialize)]
struct VoteRequest {
    option_id: i64,
}

fn poll_endpoint(poll_id: i64) -> String {
    format!("{POLLS_ENDPOINT}/{poll_id}")
}

fn vote_endpoint(poll_id: i64) -> String {
    format!("{POLLS_ENDPOINT}/{poll_id}/vote")
}

impl<S, P, T> Client<S, P, T>
where
    S: SessionStore,
    P: NavSource + Navigator,
    T: Transport,
{
    /// Exchange credentials for an access token and persist the session.
    ///
    /// Credentials go out as an OAuth2 password form. Storage is untouched
    /// when the server rejects them.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for rejected credentials, [`ApiError::Fetch`]
    /// for network failures and [`ApiError::Json`] for an unexpected body.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionRecord, ApiError> {
        let form = MultipartForm::new()
            .field("username", username)
            .field("password", password);
        let opts = RequestOptions::new()
            .method(Method::Post)
            .body(Body::Multipart(form));
        let body: LoginResponse = self.request_json(LOGIN_ENDPOINT, opts).await?;
        if !body.token_type.eq_ignore_ascii_case("bearer") {
            log::warn!("unexpected token type: {}", body.token_type);
        }
        Ok(self.sign_in(&body.access_token, username))
    }

    /// IDs of every stored poll.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn list_polls(&self) -> Result<Vec<i64>, ApiError> {
        self.request_json(POLLS_ENDPOINT, RequestOptions::new()).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown poll.
    pub async fn get_poll(&self, poll_id: i64) -> Result<Poll, ApiError> {
        self.request_json(&poll_endpoint(poll_id), RequestOptions::new())
            .await
    }

    /// Cast one vote and return the updated poll.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown poll and 400 for
    /// an unknown option.
    pub async fn vote(&self, poll_id: i64, option_id: i64) -> Result<Poll, ApiError> {
        let opts = RequestOptions::new()
            .method(Method::Post)
            .json(&VoteRequest { option_id })?;
        self.request_json(&vote_endpoint(poll_id), opts).await
    }

    /// Create a poll. The server requires a valid token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 without a valid token and 400
    /// when the poll ID is taken.
    pub async fn create_poll(&self, poll: &Poll) -> Result<Poll, ApiError> {
        let opts = RequestOptions::new().method(Method::Post).json(poll)?;
        self.request_json(POLLS_ENDPOINT, opts).await
    }

    async fn request_json<R: DeserializeOwned>(&self, url: &str, mut opts: RequestOptions) -> Result<R, ApiError> {
        let resp = self.fetch_auth(url, &mut opts).await?;
        if !resp.is_success() {
            log::warn!("{} {url} failed: status={}", opts.method.as_str(), resp.status);
            return Err(ApiError::Status(resp.status));
        }
        Ok(resp.json()?)
    }
}
