use thiserror::Error;

/// Broad classification of a [`SpectrogramError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configuration or argument value the caller can correct.
    InvalidArgument,
    /// A caller bug: buffers or offsets that do not fit together.
    PreconditionViolation,
}

#[derive(Debug, Error, PartialEq)]
pub enum SpectrogramError {
    #[error("slide width must be greater than zero")]
    InvalidSlide,

    #[error("dB range must be greater than zero, got {0}")]
    InvalidRange(f64),

    #[error("hue must lie in [0, 1), got {0}")]
    HueOutOfRange(f64),

    #[error("color mapping values must be finite")]
    NonFiniteMapping,

    #[error("no spectra accumulated; push at least one frame before rendering")]
    EmptyHistory,

    #[error("analysis window must hold at least 2 samples, got {0}")]
    WindowTooSmall(usize),

    #[error("raster is {actual_width}x{actual_height}, history needs {width}x{height}")]
    RasterSize {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("real and imaginary buffers differ in length ({real} vs {imag})")]
    LengthMismatch { real: usize, imag: usize },

    #[error("range {offset}..{offset}+{len} exceeds buffer of length {available}")]
    OffsetOutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("transform returned {actual} bins, expected {expected}")]
    TransformLength { expected: usize, actual: usize },

    #[error("stride {stride} is smaller than a row of {width} pixels")]
    StrideTooSmall { stride: usize, width: usize },

    #[error("raster buffer holds {actual} bytes, needs {required}")]
    BufferTooSmall { required: usize, actual: usize },
}

impl SpectrogramError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpectrogramError::InvalidSlide
            | SpectrogramError::InvalidRange(_)
            | SpectrogramError::HueOutOfRange(_)
            | SpectrogramError::NonFiniteMapping
            | SpectrogramError::EmptyHistory
            | SpectrogramError::WindowTooSmall(_)
            | SpectrogramError::RasterSize { .. } => ErrorKind::InvalidArgument,
            SpectrogramError::LengthMismatch { .. }
            | SpectrogramError::OffsetOutOfBounds { .. }
            | SpectrogramError::TransformLength { .. }
            | SpectrogramError::StrideTooSmall { .. }
            | SpectrogramError::BufferTooSmall { .. } => ErrorKind::PreconditionViolation,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpectrogramError>;
