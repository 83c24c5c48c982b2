//! Source picture and per-tile cropping.
//!
//! The picture is embedded at build time and decoded once. Tiles never store
//! pixels; the view samples the crop for a tile's correct position on demand.

use anyhow::{bail, Context, Result};
use image::RgbImage;

use crate::fb::Rgb;
use crate::types::{slot_col, slot_row, Slot, IMAGE_PATH};

/// Bytes of [`IMAGE_PATH`], baked into the binary.
pub const EMBEDDED_IMAGE: &[u8] = include_bytes!("../assets/jungle.png");

#[derive(Debug, Clone)]
pub struct Picture {
    image: RgbImage,
}

impl Picture {
    /// Decode the embedded puzzle picture.
    pub fn embedded() -> Result<Self> {
        Self::from_bytes(EMBEDDED_IMAGE).with_context(|| format!("failed to load {IMAGE_PATH}"))
    }

    /// Decode any format the `image` crate was built with.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .context("failed to decode picture")?
            .to_rgb8();
        Self::from_rgb(image)
    }

    /// Wrap already decoded pixels.
    pub fn from_rgb(image: RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            bail!("picture has no pixels");
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour of pixel `(px, py)` inside the crop for slot `correct`.
    ///
    /// The board is treated as `grid * tile_w` by `grid * tile_h` virtual
    /// pixels stretched over the whole picture; each tile shows the region at
    /// its correct row/column.
    pub fn tile_pixel(
        &self,
        correct: Slot,
        grid: u8,
        px: u32,
        py: u32,
        tile_w: u32,
        tile_h: u32,
    ) -> Rgb {
        let grid = grid.max(1) as u32;
        let u = slot_col(correct, grid as u8) as u32 * tile_w + px.min(tile_w.saturating_sub(1));
        let v = slot_row(correct, grid as u8) as u32 * tile_h + py.min(tile_h.saturating_sub(1));
        self.sample(u, grid * tile_w, v, grid * tile_h)
    }

    /// Nearest-neighbour sample at virtual pixel `(u, v)` of a `span_u x span_v`
    /// grid laid over the picture.
    fn sample(&self, u: u32, span_u: u32, v: u32, span_v: u32) -> Rgb {
        let x = scale(u, span_u, self.image.width());
        let y = scale(v, span_v, self.image.height());
        let p = self.image.get_pixel(x, y);
        Rgb::new(p[0], p[1], p[2])
    }
}

// Map the centre of virtual pixel `i` (of `span`) onto `0..len`.
fn scale(i: u32, span: u32, len: u32) -> u32 {
    if span == 0 {
        return 0;
    }
    let pos = ((2 * i as u64 + 1) * len as u64) / (2 * span as u64);
    (pos as u32).min(len - 1)
}
