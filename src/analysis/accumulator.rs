use crate::error::{Result, SpectrogramError};
use crate::render::color::{db_to_color, ColorMapping};
use crate::render::raster::{ChannelOrder, Raster, RasterTarget};

use super::transform::{FftPowerTransform, Normalization, PowerTransform, WindowFunction};
use super::window::AnalysisWindow;

/// Start positions of the real and imaginary data inside the buffers passed
/// to [`SpectrogramAccumulator::push_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleOffsets {
    pub real: usize,
    pub imag: usize,
}

/// Sliding-window spectrogram builder.
///
/// Each pushed frame advances the analysis window and appends one dB power
/// spectrum to the history. Rendering turns the history into an image with
/// time on the x axis and frequency (lowest at the bottom) on the y axis.
pub struct SpectrogramAccumulator<T = FftPowerTransform> {
    transform: T,
    window: AnalysisWindow,
    staged_real: Vec<f64>,
    staged_imag: Vec<f64>,
    history: Vec<Vec<f64>>,
    mapping: ColorMapping,
}

impl SpectrogramAccumulator<FftPowerTransform> {
    /// Accumulator backed by the built-in FFT, divide-by-N normalization.
    pub fn with_fft(fft_size: usize, window: WindowFunction, mapping: ColorMapping) -> Result<Self> {
        let transform = FftPowerTransform::new(fft_size, window, Normalization::DivByN);
        Self::with_mapping(transform, mapping)
    }
}

impl<T: PowerTransform> SpectrogramAccumulator<T> {
    pub fn new(transform: T) -> Result<Self> {
        Self::with_mapping(transform, ColorMapping::default())
    }

    pub fn with_mapping(transform: T, mapping: ColorMapping) -> Result<Self> {
        let n = transform.size();
        if n < 2 {
            return Err(SpectrogramError::WindowTooSmall(n));
        }
        Ok(Self {
            transform,
            window: AnalysisWindow::new(n),
            staged_real: vec![0.0; n],
            staged_imag: vec![0.0; n],
            history: Vec::new(),
            mapping,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.window.capacity()
    }

    /// Number of spectra accumulated since the last clear.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> &[Vec<f64>] {
        &self.history
    }

    /// Current window contents (real, imaginary), oldest sample first.
    pub fn window(&self) -> (Vec<f64>, Vec<f64>) {
        self.window.to_vecs()
    }

    pub fn color_mapping(&self) -> &ColorMapping {
        &self.mapping
    }

    pub fn set_color_mapping(&mut self, mapping: ColorMapping) {
        self.mapping = mapping;
    }

    /// Width and height of the image the current history renders to.
    pub fn image_size(&self) -> (usize, usize) {
        (self.history.len(), self.fft_size() / 2)
    }

    /// Zero the analysis window and drop the history.
    pub fn reset(&mut self) {
        self.window.reset();
        self.history.clear();
    }

    /// Drop the history, keeping the analysis window.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Slide `real.len()` new samples into the window and record its spectrum.
    ///
    /// Frames at least as long as the window replace it with their last N
    /// samples. Nothing is modified if the call fails.
    pub fn push_frame(&mut self, real: &[f64], imag: &[f64]) -> Result<()> {
        if real.len() != imag.len() {
            return Err(SpectrogramError::LengthMismatch {
                real: real.len(),
                imag: imag.len(),
            });
        }

        self.window
            .stage(real, imag, &mut self.staged_real, &mut self.staged_imag);
        let power = self
            .transform
            .forward_power(&self.staged_real, &self.staged_imag, true);

        let n = self.fft_size();
        if power.len() != n {
            return Err(SpectrogramError::TransformLength {
                expected: n,
                actual: power.len(),
            });
        }

        self.window.push(real, imag);
        self.history.push(power);
        log::trace!("pushed {} samples, history={}", real.len(), self.history.len());
        Ok(())
    }

    /// Push `total_len` samples in chunks of `slide`, starting at `offsets`.
    ///
    /// The last chunk may be shorter than `slide`. Returns the number of
    /// frames pushed. On error the window and history are left as they were
    /// before the call.
    pub fn push_all(
        &mut self,
        real: &[f64],
        imag: &[f64],
        total_len: usize,
        slide: usize,
        offsets: SampleOffsets,
    ) -> Result<usize> {
        if slide == 0 {
            return Err(SpectrogramError::InvalidSlide);
        }
        let real = checked_range(real, offsets.real, total_len)?;
        let imag = checked_range(imag, offsets.imag, total_len)?;

        let frames = self.push_chunks(real.chunks(slide).zip(imag.chunks(slide)))?;
        log::debug!(
            "pushed {} samples as {} frames (slide={})",
            total_len,
            frames,
            slide
        );
        Ok(frames)
    }

    /// Push a real-valued signal in chunks of `slide`, imaginary part zero.
    ///
    /// Same all-or-nothing behavior as [`push_all`](Self::push_all).
    pub fn push_real(&mut self, samples: &[f64], slide: usize) -> Result<usize> {
        if slide == 0 {
            return Err(SpectrogramError::InvalidSlide);
        }
        let zeros = vec![0.0; slide.min(samples.len())];
        self.push_chunks(
            samples
                .chunks(slide)
                .map(|chunk| (chunk, &zeros[..chunk.len()])),
        )
    }

    // Rolls the window and history back if any frame fails.
    fn push_chunks<'s>(
        &mut self,
        frames: impl Iterator<Item = (&'s [f64], &'s [f64])>,
    ) -> Result<usize> {
        let saved_window = self.window.clone();
        let saved_len = self.history.len();

        let mut pushed = 0;
        for (re, im) in frames {
            if let Err(err) = self.push_frame(re, im) {
                self.window = saved_window;
                self.history.truncate(saved_len);
                return Err(err);
            }
            pushed += 1;
        }
        Ok(pushed)
    }

    /// Render the history into a new tightly packed RGB raster.
    pub fn render_image(&mut self, clear_after: bool) -> Result<Raster> {
        if self.history.is_empty() {
            return Err(SpectrogramError::EmptyHistory);
        }
        let (width, height) = self.image_size();
        let mut raster = Raster::new(width, height, ChannelOrder::Rgb);
        self.render_into(&mut raster.target(), clear_after)?;
        Ok(raster)
    }

    /// Render the history into a caller-owned raster of exactly
    /// [`image_size`](Self::image_size) pixels.
    pub fn render_into(&mut self, target: &mut RasterTarget<'_>, clear_after: bool) -> Result<()> {
        if self.history.is_empty() {
            return Err(SpectrogramError::EmptyHistory);
        }
        let (width, height) = self.image_size();
        if target.width() != width || target.height() != height {
            return Err(SpectrogramError::RasterSize {
                width,
                height,
                actual_width: target.width(),
                actual_height: target.height(),
            });
        }

        for (col, power) in self.history.iter().enumerate() {
            for (row, &level) in power[..height].iter().enumerate() {
                target.put_pixel(col, height - row - 1, db_to_color(level, &self.mapping));
            }
        }
        log::debug!("rendered {}x{} spectrogram", width, height);

        if clear_after {
            self.history.clear();
        }
        Ok(())
    }
}

fn checked_range(buf: &[f64], offset: usize, len: usize) -> Result<&[f64]> {
    offset
        .checked_add(len)
        .filter(|&end| end <= buf.len())
        .map(|end| &buf[offset..end])
        .ok_or(SpectrogramError::OffsetOutOfBounds {
            offset,
            len,
            available: buf.len(),
        })
}
