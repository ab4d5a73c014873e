use anyhow::{Context, Result};
use image::RgbImage;
use specgram::{ChannelOrder, Raster};
use std::path::{Path, PathBuf};

/// Copy a raster into an `RgbImage`, dropping row padding and undoing BGR order.
pub fn to_rgb_image(raster: &Raster) -> Result<RgbImage> {
    let width = u32::try_from(raster.width()).context("Image too wide")?;
    let height = u32::try_from(raster.height()).context("Image too tall")?;
    if width == 0 || height == 0 {
        anyhow::bail!("Cannot encode an empty {}x{} image", width, height);
    }

    let mut pixels = Vec::with_capacity(raster.width() * raster.height() * 3);
    for row in raster.as_bytes().chunks(raster.stride()).take(raster.height()) {
        for px in row[..raster.width() * 3].chunks_exact(3) {
            match raster.order() {
                ChannelOrder::Rgb => pixels.extend_from_slice(px),
                ChannelOrder::Bgr => pixels.extend_from_slice(&[px[2], px[1], px[0]]),
            }
        }
    }

    RgbImage::from_raw(width, height, pixels).context("Raster does not match image dimensions")
}

pub fn write_png(raster: &Raster, path: &Path) -> Result<()> {
    let image = to_rgb_image(raster)?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write image: {}", path.display()))?;
    log::info!(
        "Wrote {}x{} image to {}",
        raster.width(),
        raster.height(),
        path.display()
    );
    Ok(())
}

/// `out.png` -> `out_003.png`.
pub fn numbered_path(base: &Path, index: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("spectrogram");
    let ext = base.extension().and_then(|e| e.to_str()).unwrap_or("png");
    base.with_file_name(format!("{}_{:03}.{}", stem, index, ext))
}
