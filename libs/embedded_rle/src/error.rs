/// Error type for run-length coding and container operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RleError {
    IoError(embedded_io::ErrorKind),
    /// A compressed frame does not fit the 16 bit length prefix
    FrameTooLarge(usize),
    /// The container ended in the middle of a record
    Truncated,
    /// Odd payload length or a run with a zero count
    InvalidRun,
    SizeMismatch { expected: usize, actual: usize },
}

impl RleError {
    pub(crate) fn from_io_error(error: impl embedded_io::Error) -> Self {
        RleError::IoError(error.kind())
    }

    pub(crate) fn from_read_exact_error<E: embedded_io::Error>(
        error: embedded_io::ReadExactError<E>,
    ) -> Self {
        match error {
            embedded_io::ReadExactError::UnexpectedEof => RleError::Truncated,
            embedded_io::ReadExactError::Other(e) => RleError::from_io_error(e),
        }
    }
}

impl embedded_io::Error for RleError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            RleError::IoError(kind) => *kind,
            RleError::Truncated | RleError::InvalidRun | RleError::SizeMismatch { .. } => {
                embedded_io::ErrorKind::InvalidData
            }
            RleError::FrameTooLarge(_) => embedded_io::ErrorKind::InvalidInput,
        }
    }
}

impl core::fmt::Display for RleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RleError::IoError(kind) => write!(f, "i/o error: {kind:?}"),
            RleError::FrameTooLarge(len) => write!(
                f,
                "compressed frame is {len} bytes, the length prefix holds at most {}",
                u16::MAX
            ),
            RleError::Truncated => f.write_str("container ends inside a frame record"),
            RleError::InvalidRun => f.write_str("malformed run in compressed payload"),
            RleError::SizeMismatch { expected, actual } => {
                write!(f, "decoded size mismatch: expected {expected} bytes, got {actual}")
            }
        }
    }
}

impl core::error::Error for RleError {}
