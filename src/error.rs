use thiserror::Error;

/// Errors raised while rebuilding shapes from their serialized form.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("unknown shape type `{0}`")]
    UnknownKind(String),

    #[error("malformed `{kind}` shape data: {source}")]
    MalformedData {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid shape id `{0}`")]
    InvalidId(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid color `{0}`, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Result type for shape reconstruction
pub type ShapeResult<T> = Result<T, ShapeError>;
