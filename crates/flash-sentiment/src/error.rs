use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model {model} returned {status}: {body}")]
    Api {
        model: String,
        status: u16,
        body: String,
    },

    #[error("empty response from model {0}")]
    EmptyResponse(String),

    #[error("no models configured")]
    NoModels,
}
