//! In-memory ARGB bitmaps and PNG conversion

use crate::io::error::{Result, WfcError, invalid_parameter, io_error};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Pack channels into a 32-bit ARGB value
pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> u32 {
    (alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32
}

/// Split a 32-bit ARGB value into `[alpha, red, green, blue]`
pub const fn channels(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

/// Row-major image of packed ARGB pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Wrap a pixel buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not `width * height`
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(invalid_parameter(
                "pixels",
                &pixels.len(),
                &format!("expected {width}x{height} = {} pixels", width * height),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a bitmap filled with a single color
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at a position, if inside the bitmap
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(x + y * self.width).copied()
    }

    /// Overwrite a pixel; positions outside the bitmap are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x >= self.width {
            return;
        }
        if let Some(pixel) = self.pixels.get_mut(x + y * self.width) {
            *pixel = color;
        }
    }

    /// Load a bitmap from an image file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| WfcError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        Ok(Self::from_rgba_image(&img.to_rgba8()))
    }

    /// Save the bitmap as an image, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The image cannot be encoded or written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| io_error(parent, "create output directory", e))?;
        }

        self.to_rgba_image()
            .save(path)
            .map_err(|e| WfcError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Convert from a decoded RGBA image
    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let pixels = image
            .pixels()
            .map(|&Rgba([red, green, blue, alpha])| argb(alpha, red, green, blue))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an RGBA image buffer
    pub fn to_rgba_image(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let [alpha, red, green, blue] =
                channels(self.pixel(x as usize, y as usize).unwrap_or(0));
            Rgba([red, green, blue, alpha])
        })
    }
}
