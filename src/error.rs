use thiserror::Error;

/// Rejection raised while turning raw parameters into a renderable request.
///
/// Every variant is produced before any geometry is computed. None of them
/// are fatal to the caller; the transport layer maps them onto a response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(
        "invalid color `{value}` for `{param}`: use a hex color (e.g. #3B82F6) or a comma-separated list (e.g. #FF0000,#00FF00)"
    )]
    InvalidColor { param: String, value: String },

    #[error("`{param}` = {value} is outside the allowed range {min}..={max}")]
    OutOfRangeDimension {
        param: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("malformed aspect ratio `{0}`: expected W:H (e.g. 4:1) or a positive number")]
    MalformedAspectRatio(String),

    #[error("malformed values list `{0}`: expected comma-separated numbers (e.g. 30,20,10)")]
    MalformedMultiValue(String),
}

impl RenderError {
    pub fn invalid_color(param: &str, value: &str) -> Self {
        Self::InvalidColor {
            param: param.to_string(),
            value: value.to_string(),
        }
    }
}
