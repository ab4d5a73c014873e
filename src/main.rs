mod audio;
mod cli;
mod config;
mod encode;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use specgram::render::color::{DEFAULT_GAIN, DEFAULT_HUE_MAX, DEFAULT_HUE_MIN, DEFAULT_RANGE};
use specgram::{ChannelOrder, ColorMapping, Raster, SpectrogramAccumulator};

use cli::{Cli, DEFAULT_FFT_SIZE, DEFAULT_SLIDE};
use encode::png::{numbered_path, write_png};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();
    apply_config(&mut cli);

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }
    if cli.slide == 0 {
        anyhow::bail!("--slide must be at least 1");
    }
    if cli.max_columns == Some(0) {
        anyhow::bail!("--max-columns must be at least 1");
    }

    let mapping = ColorMapping::new(cli.gain, cli.range, cli.hue_min, cli.hue_max)
        .context("Invalid color mapping")?;
    let mut acc = SpectrogramAccumulator::with_fft(cli.fft_size, cli.window, mapping)
        .context("Invalid analysis window")?;

    log::info!("specgram - spectrogram renderer");
    log::info!("Input: {}", cli.input.display());
    log::info!(
        "Window: {} x {} samples, slide {}",
        cli.window,
        cli.fft_size,
        cli.slide
    );
    log::info!(
        "Color: gain {} dB, range {} dB, hue {:.3} -> {:.3}",
        mapping.gain(),
        mapping.range(),
        mapping.hue_min(),
        mapping.hue_max()
    );

    log::info!("Decoding audio...");
    let signal = audio::decode::decode_signal(&cli.input)?;
    if signal.samples.is_empty() {
        anyhow::bail!("Input contains no audio samples");
    }
    let total_frames = signal.samples.len().div_ceil(cli.slide);
    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} columns ({eta} remaining)")
            .context("Invalid progress template")?
            .progress_chars("=>-"),
    );

    let order = if cli.bgr { ChannelOrder::Bgr } else { ChannelOrder::Rgb };
    let mut images = 0;
    // One column per chunk so --max-columns can cut an image between pushes.
    for chunk in signal.samples.chunks(cli.slide) {
        acc.push_real(chunk, cli.slide)?;
        pb.inc(1);

        if cli.max_columns.is_some_and(|max| acc.len() >= max) {
            let raster = render_and_clear(&mut acc, order)?;
            write_png(&raster, &numbered_path(&cli.output, images))?;
            images += 1;
        }
    }
    pb.finish_with_message("Analysis complete");

    if !acc.is_empty() {
        let raster = render_and_clear(&mut acc, order)?;
        let path = if cli.max_columns.is_some() {
            numbered_path(&cli.output, images)
        } else {
            cli.output.clone()
        };
        write_png(&raster, &path)?;
        images += 1;
    }

    log::info!("Done! {} column(s) in {} image(s)", total_frames, images);
    Ok(())
}

fn render_and_clear(acc: &mut SpectrogramAccumulator, order: ChannelOrder) -> Result<Raster> {
    let (width, height) = acc.image_size();
    let mut raster = Raster::new(width, height, order);
    acc.render_into(&mut raster.target(), true)?;
    Ok(raster)
}

/// Fill options left at their defaults from the config file, if one is found.
fn apply_config(cli: &mut Cli) {
    let Some(path) = config::find_config(cli.config.as_deref()) else {
        return;
    };
    let cfg = match config::load_config(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::warn!("Ignoring config: {:#}", err);
            return;
        }
    };
    log::info!("Loaded config from {}", path.display());

    if cli.fft_size == DEFAULT_FFT_SIZE { cli.fft_size = cfg.analysis.fft_size; }
    if cli.slide == DEFAULT_SLIDE { cli.slide = cfg.analysis.slide; }
    if cli.gain == DEFAULT_GAIN { cli.gain = cfg.color.gain; }
    if cli.range == DEFAULT_RANGE { cli.range = cfg.color.range; }
    if cli.hue_min == DEFAULT_HUE_MIN { cli.hue_min = cfg.color.hue_min; }
    if cli.hue_max == DEFAULT_HUE_MAX { cli.hue_max = cfg.color.hue_max; }
    if cli.window == Default::default() {
        if let Some(name) = cfg.analysis.window.as_deref() {
            match name.parse() {
                Ok(window) => cli.window = window,
                Err(err) => log::warn!("Ignoring config window: {}", err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_flag_parses() {
        let cli = Cli::try_parse_from(["specgram", "in.wav", "--bgr"]).unwrap();
        assert!(cli.bgr);
        let cli = Cli::try_parse_from(["specgram", "in.wav"]).unwrap();
        assert!(!cli.bgr);
    }

    #[test]
    fn render_and_clear_honors_channel_order() {
        let mapping = ColorMapping::new(-30.0, 80.0, 0.0, 2.0 / 3.0).unwrap();
        let mut rgb = SpectrogramAccumulator::with_fft(8, Default::default(), mapping).unwrap();
        let mut bgr = SpectrogramAccumulator::with_fft(8, Default::default(), mapping).unwrap();
        let tone: Vec<f64> = (0..16).map(|i| (i as f64 * 0.7).sin()).collect();
        rgb.push_real(&tone, 4).unwrap();
        bgr.push_real(&tone, 4).unwrap();

        let rgb_raster = render_and_clear(&mut rgb, ChannelOrder::Rgb).unwrap();
        let bgr_raster = render_and_clear(&mut bgr, ChannelOrder::Bgr).unwrap();
        assert!(rgb.is_empty() && bgr.is_empty());
        assert_eq!(bgr_raster.order(), ChannelOrder::Bgr);
        assert_eq!((bgr_raster.width(), bgr_raster.height()), (4, 4));

        for (a, b) in rgb_raster
            .as_bytes()
            .chunks_exact(3)
            .zip(bgr_raster.as_bytes().chunks_exact(3))
        {
            assert_eq!([a[0], a[1], a[2]], [b[2], b[1], b[0]]);
        }
        let image = encode::png::to_rgb_image(&bgr_raster).unwrap();
        assert_eq!(image.into_raw(), rgb_raster.as_bytes());
    }
}
