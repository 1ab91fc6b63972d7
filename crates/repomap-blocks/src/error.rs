//! Error types for repomap-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid map block pattern: {0}")]
    Pattern(#[from] regex::Error),
}
