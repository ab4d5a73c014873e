use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Floor applied before taking the logarithm, i.e. -200 dB.
const MIN_POWER: f64 = 1e-20;

/// Spectral transform the accumulator calls once per window position.
pub trait PowerTransform {
    /// Number of points per window (N).
    fn size(&self) -> usize;

    /// Power spectrum of one N-point window, one value per bin.
    ///
    /// When `in_db` is set the values are `10 * log10(power)`.
    fn forward_power(&mut self, real: &[f64], imag: &[f64], in_db: bool) -> Vec<f64>;
}

impl<T: PowerTransform + ?Sized> PowerTransform for Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn forward_power(&mut self, real: &[f64], imag: &[f64], in_db: bool) -> Vec<f64> {
        (**self).forward_power(real, imag, in_db)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowFunction {
    #[default]
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl WindowFunction {
    /// Symmetric window coefficients of the given length.
    pub fn coefficients(self, size: usize) -> Vec<f64> {
        if size < 2 {
            return vec![1.0; size];
        }
        let denom = (size - 1) as f64;
        (0..size)
            .map(|i| {
                let x = 2.0 * PI * i as f64 / denom;
                match self {
                    WindowFunction::Hann => 0.5 * (1.0 - x.cos()),
                    WindowFunction::Hamming => 0.54 - 0.46 * x.cos(),
                    WindowFunction::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
                    WindowFunction::Rectangular => 1.0,
                }
            })
            .collect()
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowFunction::Hann => "hann",
            WindowFunction::Hamming => "hamming",
            WindowFunction::Blackman => "blackman",
            WindowFunction::Rectangular => "rectangular",
        };
        f.write_str(name)
    }
}

impl FromStr for WindowFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Ok(WindowFunction::Hann),
            "hamming" => Ok(WindowFunction::Hamming),
            "blackman" => Ok(WindowFunction::Blackman),
            "rectangular" | "rect" | "none" => Ok(WindowFunction::Rectangular),
            other => Err(format!("unknown window function '{}'", other)),
        }
    }
}

/// Scaling applied to the FFT output before computing power.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Normalization {
    None,
    #[default]
    DivByN,
    DivBySqrtN,
}

impl Normalization {
    fn factor(self, size: usize) -> f64 {
        match self {
            Normalization::None => 1.0,
            Normalization::DivByN => 1.0 / size as f64,
            Normalization::DivBySqrtN => 1.0 / (size as f64).sqrt(),
        }
    }
}

/// Windowed forward FFT returning per-bin power, backed by rustfft.
pub struct FftPowerTransform {
    size: usize,
    window: Vec<f64>,
    scale: f64,
    fft: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl FftPowerTransform {
    pub fn new(size: usize, window: WindowFunction, normalization: Normalization) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self {
            size,
            window: window.coefficients(size),
            scale: normalization.factor(size),
            fft,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
        }
    }

    /// Hann window, divide-by-N normalization.
    pub fn with_size(size: usize) -> Self {
        Self::new(size, WindowFunction::default(), Normalization::default())
    }
}

impl PowerTransform for FftPowerTransform {
    fn size(&self) -> usize {
        self.size
    }

    fn forward_power(&mut self, real: &[f64], imag: &[f64], in_db: bool) -> Vec<f64> {
        debug_assert_eq!(real.len(), self.size);
        debug_assert_eq!(imag.len(), self.size);

        for (((slot, &re), &im), &w) in self
            .buffer
            .iter_mut()
            .zip(real)
            .zip(imag)
            .zip(&self.window)
        {
            *slot = Complex::new(re * w, im * w);
        }
        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        self.buffer
            .iter()
            .map(|c| {
                let power = (*c * self.scale).norm_sqr();
                if in_db {
                    10.0 * power.max(MIN_POWER).log10()
                } else {
                    power
                }
            })
            .collect()
    }
}
