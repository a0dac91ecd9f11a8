use thiserror::Error;

/// Unified error type for the coin-watch core library.
///
/// Stores never surface these to callers directly — every fetch failure is
/// converted into observable state (`CoinList::Failed`, `DetailState.error`).
/// Providers and other leaf functions return `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("No market data found for coin '{0}'")]
    CoinNotFound(String),

    #[error("{0} has no time-series endpoint")]
    HistoryUnsupported(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::MalformedPayload(e.to_string())
    }
}
