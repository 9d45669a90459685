//! Off-screen Cairo drawing surface backing a pad.

use cairo::{Context, Format, ImageSurface, Operator};
use log::{debug, warn};
use std::io::Write;
use thiserror::Error;

/// Errors raised while creating or reading back a drawing surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("drawing context unavailable: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface pixels unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
}

/// A rectangular image surface with its immediate-mode drawing context.
pub struct Canvas {
    surface: ImageSurface,
    ctx: Context,
    width: i32,
    height: i32,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.surface.format())
            .finish()
    }
}

impl Canvas {
    /// Creates an ARGB surface, falling back to RGB24 when the ARGB surface
    /// cannot be allocated.
    ///
    /// # Errors
    /// Returns [`RenderError`] when the size is not positive or neither
    /// format yields a usable drawing context.
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidSize { width, height });
        }

        match Self::with_format(Format::ARgb32, width, height) {
            Ok(canvas) => Ok(canvas),
            Err(err) => {
                warn!("ARGB32 surface unavailable ({err}); trying RGB24 fallback");
                Self::with_format(Format::Rgb24, width, height)
            }
        }
    }

    fn with_format(format: Format, width: i32, height: i32) -> Result<Self, RenderError> {
        let surface = ImageSurface::create(format, width, height)?;
        let ctx = Context::new(&surface)?;
        debug!("Created {width}x{height} {format:?} canvas");
        Ok(Self {
            surface,
            ctx,
            width,
            height,
        })
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Encodes the current surface contents as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), RenderError> {
        self.surface.flush();
        self.surface.write_to_png(writer)?;
        Ok(())
    }

    /// Copies the current pixels out of the surface.
    ///
    /// The live surface is shared with its context, so the pixels are read
    /// from a private copy.
    pub fn snapshot(&self) -> Result<Snapshot, RenderError> {
        self.surface.flush();
        let mut copy = ImageSurface::create(Format::ARgb32, self.width, self.height)?;
        {
            let ctx = Context::new(&copy)?;
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.set_operator(Operator::Source);
            ctx.paint()?;
        }
        copy.flush();

        let stride = copy.stride() as usize;
        let data = copy.data()?.to_vec();
        Ok(Snapshot {
            width: self.width,
            height: self.height,
            stride,
            data,
        })
    }
}

/// Pixel copy of a [`Canvas`], in Cairo's native-endian ARGB32 layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: usize,
    data: Vec<u8>,
}

impl Snapshot {
    /// Returns the pixel at `(x, y)` as a packed `0xAARRGGBB` value.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * 4;
        let bytes = self.data.get(offset..offset + 4)?;
        Some(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}
