//! Engine error types

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while configuring the scene or talking to WebGL.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A shader stage failed to compile.
    #[error("{stage} shader failed to compile: {log}")]
    Shader {
        /// "vertex" or "fragment".
        stage: &'static str,
        /// Driver info log.
        log: String,
    },

    /// A program failed to link.
    #[error("program failed to link: {0}")]
    Link(String),

    /// The context refused to allocate a GPU object.
    #[error("failed to create {0}")]
    Resource(&'static str),

    /// Scene configuration did not parse.
    #[error("invalid scene configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// No usable WebGL2 context on the canvas.
    #[error("WebGL2 context unavailable: {0}")]
    Context(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EngineError::Shader {
            stage: "vertex",
            log: "syntax error".to_string(),
        };
        assert_eq!(err.to_string(), "vertex shader failed to compile: syntax error");
        assert_eq!(EngineError::Resource("buffer").to_string(), "failed to create buffer");
    }

    #[test]
    fn test_yaml_error_converts() {
        let parsed: Result<Vec<u32>, _> = serde_yaml::from_str("not: [a list");
        let err: EngineError = parsed.unwrap_err().into();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
