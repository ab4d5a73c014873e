//! Scrolling spectrogram builder.
//!
//! Frames of complex samples are pushed into a [`SpectrogramAccumulator`],
//! which keeps a sliding analysis window, records one dB power spectrum per
//! push and renders the history as a 24-bit image through an HSV hue ramp.

pub mod analysis;
pub mod error;
pub mod render;

pub use analysis::{
    FftPowerTransform, Normalization, PowerTransform, SampleOffsets, SpectrogramAccumulator,
    WindowFunction,
};
pub use error::{ErrorKind, Result, SpectrogramError};
pub use render::{ChannelOrder, ColorMapping, Raster, RasterTarget};
