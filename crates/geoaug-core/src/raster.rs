//! Raster buffers shared by images and masks.
//!
//! A [`Raster`] is a row-major, channel-interleaved sample buffer. Images use
//! any [`Element`] type with one or more channels; masks are single-channel
//! rasters of class indices. Transforms never mutate a raster in place, they
//! always allocate a new one.
//!
//! # Coordinate System
//!
//! - Origin is the centre of the top-left pixel
//! - x grows to the right, y grows downwards
//! - Pixel `(x, y)` covers the continuous area `[x - 0.5, x + 0.5)`

use image::{ImageBuffer, Pixel};

use crate::error::{AugmentError, Result};

/// Sample type stored in a [`Raster`].
///
/// Resampling happens in `f32`; integer samples are rounded and saturated
/// when converted back.
pub trait Element: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Widen to the working precision.
    fn to_f32(self) -> f32;

    /// Narrow from the working precision.
    fn from_f32(value: f32) -> Self;
}

impl Element for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, u8::MAX as f32) as u8
    }
}

impl Element for u16 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, u16::MAX as f32) as u16
    }
}

impl Element for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }
}

/// A 2D sample buffer with an interleaved channel axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: Element> {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<T>,
}

impl<T: Element> Raster<T> {
    /// Create a raster from raw samples.
    ///
    /// # Errors
    ///
    /// [`AugmentError::EmptyRaster`] if any dimension is zero, and
    /// [`AugmentError::BufferSize`] if `data.len()` is not
    /// `width * height * channels`.
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(AugmentError::EmptyRaster);
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(AugmentError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a raster where every sample has the same value.
    pub fn filled(width: u32, height: u32, channels: u32, value: T) -> Result<Self> {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![value; len])
    }

    /// Create a raster by evaluating `f(x, y, channel)` for every sample.
    pub fn from_fn<F>(width: u32, height: u32, channels: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32, u32) -> T,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * channels as usize);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }
        Self::new(width, height, channels, data)
    }

    /// Create a single-channel raster (e.g. a label mask).
    pub fn single_channel(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        Self::new(width, height, 1, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw samples in row-major, channel-interleaved order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the raster and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[T] {
        let start = self.offset(x as usize, y as usize);
        &self.data[start..start + self.channels as usize]
    }

    /// Sample at `(x, y, channel)` widened to `f32`.
    #[inline]
    pub(crate) fn sample_f32(&self, x: usize, y: usize, channel: usize) -> f32 {
        self.data[self.offset(x, y) + channel].to_f32()
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * self.channels as usize
    }

    /// Check whether two rasters share the same pixel grid.
    pub fn same_extent<U: Element>(&self, other: &Raster<U>) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Build a raster from an `image` crate buffer.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let rgb = image::RgbImage::new(64, 48);
    /// let raster = Raster::from_image(&rgb)?;
    /// assert_eq!(raster.channels(), 3);
    /// ```
    pub fn from_image<P>(buffer: &ImageBuffer<P, Vec<T>>) -> Result<Self>
    where
        P: Pixel<Subpixel = T>,
    {
        let (width, height) = buffer.dimensions();
        Self::new(
            width,
            height,
            u32::from(P::CHANNEL_COUNT),
            buffer.as_raw().clone(),
        )
    }

    /// Convert to an `image` crate buffer.
    ///
    /// Returns `None` when the pixel type's channel count differs from this
    /// raster's.
    pub fn to_image<P>(&self) -> Option<ImageBuffer<P, Vec<T>>>
    where
        P: Pixel<Subpixel = T>,
    {
        if u32::from(P::CHANNEL_COUNT) != self.channels {
            return None;
        }
        ImageBuffer::from_raw(self.width, self.height, self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster = Raster::new(4, 3, 3, vec![0u8; 4 * 3 * 3]).unwrap();
        assert_eq!(raster.dimensions(), (4, 3));
        assert_eq!(raster.channels(), 3);
        assert_eq!(raster.as_slice().len(), 36);
    }

    #[test]
    fn test_raster_rejects_wrong_length() {
        let err = Raster::new(4, 3, 3, vec![0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            AugmentError::BufferSize {
                expected: 36,
                actual: 10
            }
        );
    }

    #[test]
    fn test_raster_rejects_zero_dimension() {
        assert_eq!(
            Raster::<u8>::new(0, 3, 1, vec![]).unwrap_err(),
            AugmentError::EmptyRaster
        );
        assert_eq!(
            Raster::<u8>::new(3, 3, 0, vec![]).unwrap_err(),
            AugmentError::EmptyRaster
        );
    }

    #[test]
    fn test_from_fn_layout() {
        let raster = Raster::from_fn(3, 2, 2, |x, y, c| (y * 100 + x * 10 + c) as u16).unwrap();
        assert_eq!(raster.pixel(0, 0), &[0, 1]);
        assert_eq!(raster.pixel(2, 1), &[120, 121]);
        assert_eq!(raster.sample_f32(1, 1, 1), 111.0);
    }

    #[test]
    fn test_u8_from_f32_saturates() {
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u8::from_f32(127.5), 128);
    }

    #[test]
    fn test_same_extent() {
        let image = Raster::filled(10, 8, 3, 0u8).unwrap();
        let mask = Raster::filled(10, 8, 1, 0u8).unwrap();
        let other = Raster::filled(8, 10, 1, 0u8).unwrap();
        assert!(image.same_extent(&mask));
        assert!(!image.same_extent(&other));
    }

    #[test]
    fn test_image_round_trip() {
        let rgb = image::RgbImage::from_fn(5, 4, |x, y| image::Rgb([x as u8, y as u8, 7]));
        let raster = Raster::from_image(&rgb).unwrap();
        assert_eq!(raster.channels(), 3);
        assert_eq!(raster.pixel(4, 3), &[4, 3, 7]);

        let back: image::RgbImage = raster.to_image().unwrap();
        assert_eq!(back, rgb);
        assert!(raster.to_image::<image::Luma<u8>>().is_none());
    }
}
