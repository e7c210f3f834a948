use thiserror::Error;

/// Why a generated style could not be used. Never reaches the client; the
/// advisor logs it and falls back to a random style.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("no style model configured")]
    NotConfigured,
    #[error("style model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("style model returned status {0}")]
    Status(u16),
    #[error("style model returned no content")]
    Empty,
    #[error("style model returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("style model returned invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}
