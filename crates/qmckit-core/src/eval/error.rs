use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("No input was provided for evaluation")]
    EmptyInput,

    #[error("Mismatched array counts: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Mismatched array shapes: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Chunk size must be positive")]
    InvalidChunkSize,

    #[error("Batch results cannot be concatenated: {source}")]
    Concatenate {
        #[from]
        source: ndarray::ShapeError,
    },
}
