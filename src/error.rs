use thiserror::Error;

/// Errors reported before any map generation starts.
///
/// Generation itself never fails once the parameters have been validated.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map dimensions {width}x{height} are out of range, both sides must be between {min} and {max}")]
    InvalidDimensions {
        width: i32,
        height: i32,
        min: i32,
        max: i32,
    },
    #[error("invalid map parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("failed to parse map parameters: {0}")]
    Config(#[from] serde_json::Error),
}
