use crate::error::{Error, Result};
use crate::macros::*;

use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// A single 8-bit component of a packed ARGB pixel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Channel {
    Alpha,
    Red,
    Green,
    Blue,
}

impl Channel {
    /// The bit offset of the channel within a packed ARGB value.
    #[inline]
    pub fn shift(self) -> u32 {
        match self {
            Channel::Alpha => 24,
            Channel::Red => 16,
            Channel::Green => 8,
            Channel::Blue => 0,
        }
    }
}

/// Pack four channel values into an ARGB value.
#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

/// A grid of packed ARGB pixels, stored row by row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a buffer where every pixel has the same value.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the buffer, in pixels.
    /// * `height` - The height of the buffer, in pixels.
    /// * `fill` - The packed ARGB value of every pixel.
    ///
    pub fn new(width: u32, height: u32, fill: u32) -> Result<Self> {
        let len = Self::checked_len(width, height)?;

        Ok(Self {
            pixels: vec![fill; len],
            width,
            height,
        })
    }

    /// Create a buffer from existing packed ARGB pixel data.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the buffer, in pixels.
    /// * `height` - The height of the buffer, in pixels.
    /// * `pixels` - The pixel values, row by row.
    ///
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        if Self::checked_len(width, height)? != pixels.len() {
            return Err(Error::InvalidBuffer);
        }

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    fn checked_len(width: u32, height: u32) -> Result<usize> {
        let len = (width as u64) * (height as u64);
        if len == 0 || len > usize::MAX as u64 {
            return Err(Error::InvalidBuffer);
        }

        Ok(len as usize)
    }

    /// A buffer with no pixels, which no public constructor can produce.
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Return the buffer's dimensions.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The total number of pixels within the buffer.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// A read-only view of the packed pixels, row by row.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside of the buffer"
        );
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get the packed ARGB value of a pixel.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Set the packed ARGB value of a pixel.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u32) {
        let i = self.index(x, y);
        self.pixels[i] = value;
    }

    /// Get a single channel of a pixel.
    #[inline]
    pub fn get_channel(&self, x: u32, y: u32, channel: Channel) -> u8 {
        (self.get_pixel(x, y) >> channel.shift()) as u8
    }

    /// Set a single channel of a pixel, leaving the other channels untouched.
    #[inline]
    pub fn set_channel(&mut self, x: u32, y: u32, channel: Channel, value: u8) {
        let i = self.index(x, y);
        self.pixels[i] = Self::with_channel(self.pixels[i], channel, value);
    }

    /// Get a channel of the pixel at a given raster index.
    #[inline]
    pub(crate) fn get_channel_at(&self, index: usize, channel: Channel) -> u8 {
        (self.pixels[index] >> channel.shift()) as u8
    }

    /// Set a channel of the pixel at a given raster index.
    #[inline]
    pub(crate) fn set_channel_at(&mut self, index: usize, channel: Channel, value: u8) {
        self.pixels[index] = Self::with_channel(self.pixels[index], channel, value);
    }

    #[inline]
    fn with_channel(pixel: u32, channel: Channel, value: u8) -> u32 {
        let shift = channel.shift();
        (pixel & !(0xFF << shift)) | ((value as u32) << shift)
    }

    /// Attempt to load an image from a file.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to the image file.
    ///
    /// `Note:` images without an alpha channel are converted to RGBA, and every
    /// pixel is fully opaque.
    ///
    pub fn load_from_file(file_path: &str) -> Result<PixelBuffer> {
        if !Path::new(file_path).exists() {
            return Err(Error::PathInvalid);
        }

        // If we can't identify the image format then we cannot
        // go any further here.
        let format = unwrap_or_return_err!(
            ImageFormat::from_path(file_path),
            Error::ImageFormatNotRecognized
        );
        if !matches!(
            format,
            ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Jpeg
        ) {
            return Err(Error::ImageFormatNotRecognized);
        }

        let image = unwrap_or_return_err!(image::open(file_path), Error::ImageOpening);

        PixelBuffer::try_from(&image.to_rgba8())
    }

    /// Save the buffer to a file at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to which the file should be saved.
    ///
    /// `Note:` the file type is derived from the file extension, and only
    /// lossless formats are permitted.
    ///
    pub fn save(&self, path: &str) -> Result<()> {
        let format = Self::output_format(path)?;

        let Some(image) = self.to_rgba_image() else {
            return Err(Error::ImageSaving(
                "The pixel data does not match the image dimensions.".to_string(),
            ));
        };

        image
            .save_with_format(path, format)
            .map_err(|e| Error::ImageSaving(e.to_string()))
    }

    /// Get the image format that a buffer would be saved as.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to which the file would be saved.
    ///
    /// `Note:` only lossless formats are permitted.
    ///
    pub fn output_format(path: &str) -> Result<ImageFormat> {
        match ImageFormat::from_path(path) {
            Ok(f @ (ImageFormat::Png | ImageFormat::Bmp)) => Ok(f),
            Ok(ImageFormat::Jpeg) => Err(Error::ImageFormatLossy),
            _ => Err(Error::ImageFormatNotRecognized),
        }
    }

    /// Unpack the buffer into an RGBA image.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let bytes = self
            .pixels
            .iter()
            .flat_map(|p| {
                let [a, r, g, b] = p.to_be_bytes();
                [r, g, b, a]
            })
            .collect();

        RgbaImage::from_raw(self.width, self.height, bytes)
    }
}

impl TryFrom<&RgbaImage> for PixelBuffer {
    type Error = Error;

    fn try_from(image: &RgbaImage) -> Result<Self> {
        let pixels = image
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                pack_argb(a, r, g, b)
            })
            .collect();

        PixelBuffer::from_pixels(image.width(), image.height(), pixels)
    }
}

#[cfg(test)]
mod tests_pixel_buffer {
    use super::{pack_argb, Channel, PixelBuffer};
    use crate::{error::Error, utilities::test_utils::TestUtils};

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(PixelBuffer::new(0, 5, 0), Err(Error::InvalidBuffer));
        assert_eq!(PixelBuffer::new(5, 0, 0), Err(Error::InvalidBuffer));
        assert_eq!(
            PixelBuffer::from_pixels(2, 2, vec![0; 3]),
            Err(Error::InvalidBuffer)
        );
        assert!(PixelBuffer::from_pixels(2, 2, vec![0; 4]).is_ok());
    }

    #[test]
    fn test_channel_layout() {
        let mut buffer = PixelBuffer::new(3, 2, pack_argb(0xAA, 0x11, 0x22, 0x33)).unwrap();

        assert_eq!(buffer.get_pixel(2, 1), 0xAA112233);
        assert_eq!(buffer.get_channel(2, 1, Channel::Alpha), 0xAA);
        assert_eq!(buffer.get_channel(2, 1, Channel::Red), 0x11);
        assert_eq!(buffer.get_channel(2, 1, Channel::Green), 0x22);
        assert_eq!(buffer.get_channel(2, 1, Channel::Blue), 0x33);

        buffer.set_channel(1, 1, Channel::Green, 0xFF);
        assert_eq!(buffer.get_pixel(1, 1), 0xAA11FF33);

        // Raster order: (1, 1) is the fifth pixel.
        assert_eq!(buffer.pixels()[4], 0xAA11FF33);

        buffer.set_pixel(0, 0, 0x01020304);
        assert_eq!(buffer.get_channel(0, 0, Channel::Red), 0x02);
    }

    #[test]
    fn test_save_and_load_png() {
        let mut tu = TestUtils::new();
        let path = tu.get_out_file("png", true);

        let buffer = TestUtils::noise_buffer(17, 9, 1234);
        buffer.save(&path).expect("failed to save the image");

        let loaded = PixelBuffer::load_from_file(&path).expect("failed to load the image");
        assert_eq!(loaded, buffer, "pixels were altered by the png round trip");
    }

    #[test]
    fn test_save_lossy_rejected() {
        let mut tu = TestUtils::new();
        let buffer = PixelBuffer::new(4, 4, 0xFF000000).unwrap();

        assert_eq!(
            buffer.save(&tu.get_out_file("jpg", true)),
            Err(Error::ImageFormatLossy)
        );
        assert_eq!(
            buffer.save(&tu.get_out_file("xyz", true)),
            Err(Error::ImageFormatNotRecognized)
        );
    }

    #[test]
    fn test_empty_image_rejected() {
        let image = image::RgbaImage::new(0, 0);
        assert_eq!(PixelBuffer::try_from(&image), Err(Error::InvalidBuffer));

        let image = image::RgbaImage::new(3, 0);
        assert_eq!(PixelBuffer::try_from(&image), Err(Error::InvalidBuffer));
    }

    #[test]
    fn test_image_conversion() {
        let image = image::RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 4]));
        let buffer = PixelBuffer::try_from(&image).expect("failed to convert the image");

        assert_eq!(buffer.dimensions(), (2, 3));
        assert_eq!(buffer.get_pixel(1, 2), pack_argb(4, 1, 2, 3));
    }

    #[test]
    fn test_output_format() {
        assert_eq!(PixelBuffer::output_format("a.png"), Ok(image::ImageFormat::Png));
        assert_eq!(PixelBuffer::output_format("a.BMP"), Ok(image::ImageFormat::Bmp));
        assert_eq!(
            PixelBuffer::output_format("a.jpeg"),
            Err(Error::ImageFormatLossy)
        );
        assert_eq!(
            PixelBuffer::output_format("a"),
            Err(Error::ImageFormatNotRecognized)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let mut tu = TestUtils::new();
        let path = tu.get_out_file("png", false);

        assert_eq!(PixelBuffer::load_from_file(&path), Err(Error::PathInvalid));
    }

    #[test]
    fn test_load_rgb_image_is_opaque() {
        let mut tu = TestUtils::new();
        let path = tu.get_out_file("bmp", true);

        let rgb = image::RgbImage::from_pixel(3, 3, image::Rgb([10, 20, 30]));
        rgb.save(&path).expect("failed to save the image");

        let loaded = PixelBuffer::load_from_file(&path).expect("failed to load the image");
        assert_eq!(loaded.get_pixel(1, 1), pack_argb(255, 10, 20, 30));
    }
}
