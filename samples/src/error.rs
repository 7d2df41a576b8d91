use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("line {line}: sample is missing the `{field}` field")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: `{field}` must be {expected}")]
    TypeMismatch {
        line: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("line {line}: malformed sample: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("sample value {0} can not be written as JSON")]
    NonFiniteValue(f64),

    #[error("failed to write sample")]
    Write(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SampleError {
    /// The 1-based line of the samples file the error refers to, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            SampleError::MissingField { line, .. }
            | SampleError::TypeMismatch { line, .. }
            | SampleError::Malformed { line, .. } => Some(*line),
            SampleError::NonFiniteValue(_) | SampleError::Write(_) | SampleError::Io(_) => None,
        }
    }
}
