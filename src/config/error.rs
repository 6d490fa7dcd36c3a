//! Configuration error types.

/// Errors raised while validating startup configuration.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Initial day lies outside the orbit slider range.
    #[error("day {value} is outside the orbit range [0, {max}]")]
    DayOutOfRange { value: f32, max: f32 },

    /// Initial hour lies outside one rotation.
    #[error("hour {0} is outside the rotation range [0, 24)")]
    HourOutOfRange(f32),

    /// Animation tick interval of zero would never advance.
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}
