pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Occurs when the fixture document is missing, unreadable or not a JSON object.
    #[error("failed to load fixtures: {0}")]
    FixtureLoad(String),
    /// Occurs when a check looks up a fixture key that is not in the document.
    #[error("fixture key \"{0}\" not found")]
    FixtureKey(String),
    /// Occurs when `apismoke.toml` fails to load.
    #[error("failed to load apismoke.toml: {0}")]
    ConfigLoad(String),
    #[error(transparent)]
    Http(#[from] crate::http::Error),
    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
