use clap::Parser;
use specgram::render::color::{DEFAULT_GAIN, DEFAULT_HUE_MAX, DEFAULT_HUE_MIN, DEFAULT_RANGE};
use specgram::WindowFunction;
use std::path::PathBuf;

pub const DEFAULT_FFT_SIZE: usize = 1024;
pub const DEFAULT_SLIDE: usize = 256;

#[derive(Parser, Debug)]
#[command(name = "specgram", about = "Render an audio file as a color spectrogram image")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Output PNG file. With --max-columns, an index is added before the extension.
    #[arg(short, long, default_value = "spectrogram.png")]
    pub output: PathBuf,

    /// Config file (defaults to ./specgram.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Analysis window size in samples
    #[arg(long, default_value_t = DEFAULT_FFT_SIZE)]
    pub fft_size: usize,

    /// Samples the window advances per column
    #[arg(long, default_value_t = DEFAULT_SLIDE)]
    pub slide: usize,

    /// Window function (hann, hamming, blackman, rectangular)
    #[arg(long, default_value_t = WindowFunction::Hann)]
    pub window: WindowFunction,

    /// Highest level shown, in dB
    #[arg(long, default_value_t = DEFAULT_GAIN, allow_hyphen_values = true)]
    pub gain: f64,

    /// dB span below the gain mapped onto the hue ramp
    #[arg(long, default_value_t = DEFAULT_RANGE)]
    pub range: f64,

    /// Hue for levels at or above the gain (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_HUE_MIN)]
    pub hue_min: f64,

    /// Hue for levels at or below gain - range (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_HUE_MAX)]
    pub hue_max: f64,

    /// Render pixels in B,G,R byte order (converted back to RGB when writing PNG)
    #[arg(long)]
    pub bgr: bool,

    /// Split the spectrogram into images of at most this many columns
    #[arg(long)]
    pub max_columns: Option<usize>,
}
