// API client module: a small blocking HTTP client that sends fully built
// `OutboundRequest`s to the Wabel Tools API. One call per invocation, no
// retries.

use crate::error::{Error, Result};
use crate::request::{Multipart, OutboundRequest};
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use url::Url;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.wabeltools.com/v1";

/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "WABELTOOLS_API_URL";

/// How much of a rejected response body ends up in the error message.
const MAX_ERROR_BODY: usize = 512;

/// Status and raw body of a successful call.
#[derive(Debug, Clone)]
pub struct InboundResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Holds a reqwest blocking client and the base URL every request is
/// built against.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url`, which must be an absolute http(s)
    /// URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let invalid = |source: url::ParseError| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        };
        let parsed = Url::parse(base_url).map_err(invalid)?;
        if parsed.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let client = Client::builder()
            .user_agent(concat!("wabeltools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| Error::NetworkFailure {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform the call. Non-2xx answers come back as `RemoteRejected`,
    /// everything that prevents an answer as `NetworkFailure`.
    pub fn send(&self, request: OutboundRequest) -> Result<InboundResponse> {
        let url = request.full_url();
        let network = |source: reqwest::Error| Error::NetworkFailure {
            url: url.to_string(),
            source,
        };
        tracing::debug!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .client
            .request(request.method, url.clone())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.multipart(into_form(body).map_err(network)?);
        }

        let res = builder.send().map_err(network)?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), url = %url, "request rejected");
            return Err(Error::RemoteRejected {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body: excerpt(&text),
            });
        }

        let body = res.bytes().map_err(network)?.to_vec();
        tracing::debug!(status = status.as_u16(), size = body.len(), "response received");
        Ok(InboundResponse { status, body })
    }
}

fn into_form(body: Multipart) -> reqwest::Result<multipart::Form> {
    body.parts.into_iter().try_fold(multipart::Form::new(), |form, file| {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.content_type)?;
        Ok(form.part(file.field, part))
    })
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
