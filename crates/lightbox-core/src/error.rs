use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightboxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTML error: {0}")]
    Html(#[from] quick_xml::Error),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid viewer config: {0}")]
    InvalidConfig(String),

    #[error("Image reference has an empty source URL")]
    EmptySource,

    #[error("Key-value store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, LightboxError>;

/// Why a single image probe failed. Probe failures drive the fallback chain
/// and are never surfaced as [`LightboxError`].
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a decodable image: {url} ({reason})")]
    Undecodable { url: String, reason: String },

    #[error("path escapes the site root: {0}")]
    OutsideRoot(String),

    #[error("unsupported URL: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
