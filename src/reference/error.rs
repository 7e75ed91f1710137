//! Reference Decoding Errors

/// Errors raised while decoding marketplace reference payloads
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// Entry is not a JSON object
    #[error("Reference entry is not an object")]
    NotAnObject,

    /// Required key is absent from the entry
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A key is present but holds a value of the wrong type
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Payload expected to be a list of entries
    #[error("Reference payload is not an array")]
    NotAnArray,

    /// Entry at the given position failed to decode
    #[error("Entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: Box<ReferenceError>,
    },
}

impl ReferenceError {
    /// Check if this error (or the entry error it wraps) is a missing field
    pub fn is_missing_field(&self) -> bool {
        match self {
            ReferenceError::MissingField(_) => true,
            ReferenceError::Entry { source, .. } => source.is_missing_field(),
            _ => false,
        }
    }
}
