use thiserror::Error;

/// Errors raised while converting an OpenSocial XML payload.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The document is empty or not well-formed
    #[error("invalid XML: {0}")]
    InvalidXml(#[from] roxmltree::Error),

    /// The document parsed but the entity element is not there
    #[error("missing required element: {0}")]
    MissingElement(&'static str),

    /// A field is present but its text cannot be interpreted
    #[error("invalid value {value:?} for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("cannot render record as JSON: {0}")]
    Render(#[from] serde_json::Error),

    #[error("unknown entity kind: {0}")]
    UnknownEntity(String),
}
