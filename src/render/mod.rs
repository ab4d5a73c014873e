pub mod color;
pub mod raster;

pub use color::{db_to_color, hsv_to_rgb, hue_for_level, ColorMapping};
pub use raster::{ChannelOrder, Raster, RasterTarget, PIXEL_WIDTH};
