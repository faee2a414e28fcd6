//! The tilemap — the scene's world singleton.
//!
//! Exactly one [`Tilemap`] exists per scene, stored as a resource in the
//! component store (it describes the world, not any entity). Cells map to
//! texture names row-major; the cell list is validated against the grid size
//! at construction so the `width * height == cells.len()` invariant holds for
//! the tilemap's whole life.

use crate::error::TilemapError;

/// A rectangular grid of tiles, each naming the texture it is drawn with.
#[derive(Debug, Clone, Default)]
pub struct Tilemap {
    width: u32,
    height: u32,
    tile_size: u32,
    /// Row-major, `width * height` entries.
    cells: Vec<String>,
}

impl Tilemap {
    /// Build a tilemap, validating that `cells` covers the grid exactly.
    pub fn new(
        width: u32,
        height: u32,
        tile_size: u32,
        cells: Vec<String>,
    ) -> Result<Self, TilemapError> {
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(TilemapError {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Edge length of one (square) tile, in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// The texture name at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the grid.
    pub fn cell(&self, x: u32, y: u32) -> &str {
        assert!(
            x < self.width && y < self.height,
            "tile ({x}, {y}) outside {}x{} tilemap",
            self.width,
            self.height
        );
        &self.cells[(y * self.width + x) as usize]
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// `true` for the empty map a scene starts with.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
