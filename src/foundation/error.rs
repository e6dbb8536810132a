/// Crate-wide result alias.
pub type StarfieldResult<T> = Result<T, StarfieldError>;

/// Errors surfaced by configuration, animation setup and output rendering.
///
/// Field generation and per-frame sampling are infallible; everything that can fail is checked
/// once, up front, when a surface is mounted or an output is produced.
#[derive(thiserror::Error, Debug)]
pub enum StarfieldError {
    /// Invalid configuration or argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid keyframes or loop timing.
    #[error("animation error: {0}")]
    Animation(String),

    /// SVG parsing, rasterization or image encoding failure.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StarfieldError {
    /// Build a [`StarfieldError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StarfieldError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`StarfieldError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StarfieldError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StarfieldError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            StarfieldError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            StarfieldError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            StarfieldError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            StarfieldError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StarfieldError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn json_errors_map_to_serde() {
        let err: StarfieldError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, StarfieldError::Serde(_)));
    }
}
