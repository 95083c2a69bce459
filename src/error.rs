use reqwest::StatusCode;
use thiserror::Error;

/// Failure fetching a page from the image source.
///
/// Every variant is the same "network failure" to the slider: the preload is
/// abandoned and the carousel stops growing until the next navigation.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection, TLS or body transfer failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    /// The body was not the expected search response.
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Flickr answered `stat: fail`.
    #[error("flickr api error {code}: {message}")]
    Api { code: i64, message: String },

    /// The request URL could not be built from the configured base.
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// Library error type for slider operations.
#[derive(Debug, Error)]
pub enum Error {
    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The gallery instance was destroyed and no longer accepts commands.
    #[error("gallery instance {0} is no longer running")]
    Closed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
