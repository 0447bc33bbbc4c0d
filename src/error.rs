use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("font family `{0}` is not available")]
    FontUnavailable(String),
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("failed to rasterize SVG: {0}")]
    Rasterize(String),
    #[error("PNG output requires the `png` feature")]
    PngDisabled,
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenderError::Io {
            path: path.into(),
            source,
        }
    }
}
