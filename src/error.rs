use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failure while handling a single inbound event.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("callback data is not an action payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("failed to encode action payload: {0}")]
    PayloadEncode(#[source] serde_json::Error),

    #[error("{kind} {uuid} not found")]
    MissingRecord { kind: &'static str, uuid: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
