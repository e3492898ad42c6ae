use crate::BenchConfig;

/// Axis-aligned pixel rectangle used for draw sources and destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clips `self` as a source rectangle to an image of the given size and
    /// shrinks `dst` by the same proportion.
    ///
    /// Returns `None` when nothing of the source lies inside the image.
    pub fn clip_source(
        &self,
        dst: TileRect,
        image_width: u32,
        image_height: u32,
    ) -> Option<(TileRect, TileRect)> {
        if self.is_empty() || dst.is_empty() {
            return None;
        }
        if self.x >= image_width || self.y >= image_height {
            return None;
        }
        let width = self.width.min(image_width - self.x);
        let height = self.height.min(image_height - self.y);
        if width == self.width && height == self.height {
            return Some((*self, dst));
        }

        let dst_width = (u64::from(dst.width) * u64::from(width) / u64::from(self.width)) as u32;
        let dst_height =
            (u64::from(dst.height) * u64::from(height) / u64::from(self.height)) as u32;
        let dst = TileRect::new(dst.x, dst.y, dst_width, dst_height);
        if dst.is_empty() {
            return None;
        }
        Some((TileRect::new(self.x, self.y, width, height), dst))
    }
}

/// Yields the `(source, destination)` pair of every tile in one pass.
///
/// Tiles are visited column by column; the source and destination of a tile
/// share the same coordinates.
pub fn tile_grid(config: &BenchConfig) -> impl Iterator<Item = (TileRect, TileRect)> {
    let count = config.sprite_count;
    let size = config.sprite_size;
    (0..count).flat_map(move |i| {
        (0..count).map(move |j| {
            let rect = TileRect::new(i * size, j * size, size, size);
            (rect, rect)
        })
    })
}
