use crate::error::{Result, SpectrogramError};

/// Bytes per pixel of every raster the renderer writes.
pub const PIXEL_WIDTH: usize = 3;

/// Byte order of the three channels within a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    fn arrange(self, rgb: [u8; 3]) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => rgb,
            ChannelOrder::Bgr => [rgb[2], rgb[1], rgb[0]],
        }
    }
}

/// Owned 24-bit image, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    stride: usize,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl Raster {
    /// Tightly packed raster (stride = width * 3), zero filled.
    pub fn new(width: usize, height: usize, order: ChannelOrder) -> Self {
        let stride = width * PIXEL_WIDTH;
        Self {
            width,
            height,
            stride,
            order,
            data: vec![0; stride * height],
        }
    }

    /// Raster whose rows are padded to `stride` bytes, as bitmap formats expect.
    pub fn with_stride(
        width: usize,
        height: usize,
        stride: usize,
        order: ChannelOrder,
    ) -> Result<Self> {
        check_stride(width, stride)?;
        Ok(Self {
            width,
            height,
            stride,
            order,
            data: vec![0; stride * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at (`x`, `y`) as R,G,B regardless of storage order.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = x * PIXEL_WIDTH + y * self.stride;
        let stored = [self.data[off], self.data[off + 1], self.data[off + 2]];
        Some(self.order.arrange(stored))
    }

    pub fn target(&mut self) -> RasterTarget<'_> {
        RasterTarget {
            width: self.width,
            height: self.height,
            stride: self.stride,
            order: self.order,
            data: &mut self.data,
        }
    }
}

/// Caller-owned pixel buffer the renderer writes into.
#[derive(Debug)]
pub struct RasterTarget<'a> {
    width: usize,
    height: usize,
    stride: usize,
    order: ChannelOrder,
    data: &'a mut [u8],
}

impl<'a> RasterTarget<'a> {
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        order: ChannelOrder,
    ) -> Result<Self> {
        check_stride(width, stride)?;
        // The last row only needs its pixels, not the padding.
        let required = match height {
            0 => 0,
            h => (h - 1) * stride + width * PIXEL_WIDTH,
        };
        if data.len() < required {
            return Err(SpectrogramError::BufferTooSmall {
                required,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            order,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of pixel (`x`, `y`).
    pub fn offset(&self, x: usize, y: usize) -> usize {
        x * PIXEL_WIDTH + y * self.stride
    }

    /// Write an R,G,B triplet at (`x`, `y`) in the target's channel order.
    ///
    /// Coordinates must lie inside the target.
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        debug_assert!(x < self.width && y < self.height);
        let off = self.offset(x, y);
        self.data[off..off + PIXEL_WIDTH].copy_from_slice(&self.order.arrange(rgb));
    }
}

fn check_stride(width: usize, stride: usize) -> Result<()> {
    if stride < width * PIXEL_WIDTH {
        return Err(SpectrogramError::StrideTooSmall { stride, width });
    }
    Ok(())
}
