pub mod accumulator;
pub mod transform;
pub mod window;

pub use accumulator::{SampleOffsets, SpectrogramAccumulator};
pub use transform::{FftPowerTransform, Normalization, PowerTransform, WindowFunction};
pub use window::AnalysisWindow;
