//! Synchronous HTTP facade over a shared async reqwest client.
//!
//! The pipeline is a sequential batch job; the tokio runtime exists only to
//! drive reqwest and never leaks into caller signatures.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout for the shared client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error from a single HTTP request.
///
/// `status` carries the response code when the server answered with a
/// non-success status; transport failures (DNS, refused connection) and
/// undecodable bodies leave it `None`.
#[derive(Debug)]
pub struct HttpError {
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(s) => write!(f, "HTTP {s}: {}", self.message),
            None => write!(f, "HTTP error: {}", self.message),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Shared HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .expect("failed to build HTTP client")
});

/// Shared runtime driving the client. Current-thread flavor: callers are
/// sequential and block on one request at a time.
static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET returning the parsed JSON body. Single attempt, no retry.
pub fn get_json(url: &str) -> Result<serde_json::Value, HttpError> {
    let text = SHARED_RUNTIME.block_on(async {
        let resp = SHARED_CLIENT
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| HttpError::from_reqwest(&e))?;
        resp.text().await.map_err(|e| HttpError::from_reqwest(&e))
    })?;

    serde_json::from_str(&text).map_err(|e| HttpError {
        status: None,
        message: format!("invalid JSON body: {e}"),
    })
}
