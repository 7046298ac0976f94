use thiserror::Error;

/// Parameter validation failures. Generation itself never fails once options validate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { width: i32, height: i32 },

    #[error("space count must be positive, got {0}")]
    NonPositiveSpaceCount(i32),

    #[error("minimum space size must be positive, got {0}")]
    NonPositiveMinSize(i32),

    #[error("minimum space size {min} exceeds maximum space size {max}")]
    InvertedSizeRange { min: i32, max: i32 },

    #[error("a {width}x{height} map cannot hold a space of minimum size {min_size}")]
    MapTooSmall { width: i32, height: i32, min_size: i32 },

    #[error("{name} must be within [0, 1], got {value}")]
    FactorOutOfRange { name: &'static str, value: f64 },

    #[error("difficulty must be within 1..=10, got {0}")]
    DifficultyOutOfRange(u8),
}
