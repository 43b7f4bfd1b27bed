// Graylog HTTP client
//
// Wraps `reqwest::Client` with URL construction, HTTP Basic auth, and
// status-to-error mapping. The two endpoint methods return decoded wire
// types; envelope semantics (what counts as malformed, what counts as
// empty) are documented on the model types.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Input, InputsResponse, SearchResponse};
use crate::transport::TransportConfig;

/// Raw HTTP client for the Graylog REST API.
///
/// Every request carries `Authorization: Basic` credentials and
/// `Accept: application/json`. Credentials are held as a
/// `SecretString` and only exposed at request-build time.
pub struct GraylogClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl GraylogClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `http://192.168.10.239:9000`);
    /// the `/api` prefix is appended per request.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username,
            password,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
        }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for an API path: `{base}/api/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Ok(Url::parse(&full)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Run a relative-time full-text search.
    ///
    /// `GET /api/search/universal/relative?query=…&range=…&limit=…`
    ///
    /// `range_secs` counts back from now; `limit` bounds the result
    /// size. An empty `messages` list is a successful response.
    pub async fn search_relative(
        &self,
        query: &str,
        range_secs: u64,
        limit: u32,
    ) -> Result<SearchResponse, Error> {
        let mut url = self.api_url("search/universal/relative")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("range", &range_secs.to_string())
            .append_pair("limit", &limit.to_string());
        debug!(query, range_secs, limit, "searching messages");
        self.get_json(url).await
    }

    /// List configured inputs (metadata only).
    ///
    /// `GET /api/system/inputs`
    ///
    /// Used as the reduced-fidelity fallback when the search endpoint
    /// is unavailable: it confirms connectivity and yields counts
    /// without message content.
    pub async fn list_inputs(&self) -> Result<Vec<Input>, Error> {
        let url = self.api_url("system/inputs")?;
        debug!("listing system inputs");
        let resp: InputsResponse = self.get_json(url).await?;
        Ok(resp.inputs)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: format!("HTTP {status}: credentials rejected"),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// First ~200 bytes of a body, clipped to a char boundary, for error messages.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
