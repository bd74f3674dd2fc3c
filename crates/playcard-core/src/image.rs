//! Row-major 8-bit image buffers with a compile-time channel count.

/// Errors raised when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid buffer length for {width}x{height}x{channels} (expected {expected} bytes, got {got})")]
    BufferSize {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        got: usize,
    },
}

/// Borrowed image: `data.len() == width * height * C`.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a, const C: usize> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, interleaved channels
}

/// Owned image: `data.len() == width * height * C`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image<const C: usize> {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

pub type GrayImageView<'a> = ImageView<'a, 1>;
pub type GrayImage = Image<1>;
pub type RgbImageView<'a> = ImageView<'a, 3>;
pub type RgbImage = Image<3>;

fn check_len(width: usize, height: usize, channels: usize, got: usize) -> Result<(), ImageError> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .unwrap_or(usize::MAX);
    if expected != got {
        return Err(ImageError::BufferSize {
            width,
            height,
            channels,
            expected,
            got,
        });
    }
    Ok(())
}

impl<'a, const C: usize> ImageView<'a, C> {
    /// Wrap a borrowed buffer, validating its length.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        check_len(width, height, C, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Channel samples of pixel `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &'a [u8] {
        let i = (y * self.width + x) * C;
        &self.data[i..i + C]
    }

    pub fn to_owned_image(&self) -> Image<C> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

impl<'a> ImageView<'a, 1> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

impl<const C: usize> Image<C> {
    /// Take ownership of a raw buffer, validating its length.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        check_len(width, height, C, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: [u8; C]) -> Self {
        let mut data = Vec::with_capacity(width * height * C);
        for _ in 0..width * height {
            data.extend_from_slice(&value);
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn view(&self) -> ImageView<'_, C> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let i = (y * self.width + x) * C;
        &self.data[i..i + C]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: [u8; C]) {
        let i = (y * self.width + x) * C;
        self.data[i..i + C].copy_from_slice(&value);
    }
}

impl Image<1> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}
