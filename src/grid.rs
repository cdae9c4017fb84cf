// src/grid.rs
// Validity-grid sources consumed by the quadtree builder.
// Provides the GridSource oracle trait, an owned BitGrid implementation, and
// an image-mask loader that thresholds luma into valid/blocked cells.
// RELEVANT FILES:src/quadtree/mod.rs,src/error.rs

use crate::error::QuadnavError;

/// Read-only validity oracle sampled during a quadtree build.
///
/// Cells are addressed by linear index `row * width + col`. The builder
/// assumes a square grid whose side is a power of two; other shapes are a
/// documented limitation and are not defended against.
pub trait GridSource {
    /// Whether the cell at the given linear index is traversable.
    fn is_valid(&self, index: usize) -> bool;

    fn width(&self) -> usize;

    fn height(&self) -> usize;
}

/// Owned validity map backed by a flat bool vector.
#[derive(Debug, Clone)]
pub struct BitGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl BitGrid {
    /// Create a grid with every cell set to `valid`.
    pub fn new(width: usize, height: usize, valid: bool) -> Self {
        Self {
            width,
            height,
            cells: vec![valid; width * height],
        }
    }

    /// Create a grid by sampling `f(x, y)` for every cell.
    pub fn from_fn<F: FnMut(usize, usize) -> bool>(width: usize, height: usize, mut f: F) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Threshold a decoded image into a validity map.
    ///
    /// A cell is valid when its grayscale value is at or above `threshold`,
    /// so white (unpainted) pixels are traversable and dark strokes block.
    pub fn from_image(img: &image::DynamicImage, threshold: u8) -> Self {
        let luma = img.to_luma8();
        let (width, height) = (luma.width() as usize, luma.height() as usize);
        Self {
            width,
            height,
            cells: luma.pixels().map(|p| p.0[0] >= threshold).collect(),
        }
    }

    /// Load an image mask from disk and threshold it into a validity map.
    ///
    /// Rejects images the quadtree cannot address exactly: the mask must be
    /// square with a power-of-two side length.
    pub fn from_image_path(
        path: impl AsRef<std::path::Path>,
        threshold: u8,
    ) -> Result<Self, QuadnavError> {
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes)?;
        let grid = Self::from_image(&img, threshold);
        if grid.width != grid.height || !grid.width.is_power_of_two() {
            return Err(QuadnavError::grid(format!(
                "image mask must be square with a power-of-two side, got {}x{}",
                grid.width, grid.height
            )));
        }
        Ok(grid)
    }

    pub fn set(&mut self, x: usize, y: usize, valid: bool) {
        self.cells[y * self.width + x] = valid;
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }
}

impl GridSource for BitGrid {
    fn is_valid(&self, index: usize) -> bool {
        self.cells[index]
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}
