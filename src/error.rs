use thiserror::Error;

/// Errors from parsing line configuration.
///
/// Rendering itself never fails: missing elements produce no output and
/// missing colors fall back to the first one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown line pattern `{0}` (expected `fan` or `straight`)")]
    UnknownPattern(String),
    #[error("invalid color `{0}` (expected #rgb, #rrggbb or #rrggbbaa)")]
    InvalidColor(String),
}
