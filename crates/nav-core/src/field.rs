//! Row-major 2D cell storage with bounds-checked access.
//!
//! Every map the engine builds (SDF, id map, flow fields, scratch
//! generations) is a `Field<T>` of some cell type.  Coordinates are `i32`
//! because build passes routinely probe stencils that step off the map edge;
//! [`Field::get`] is the checked probe for those, while [`Field::at`] panics
//! on out-of-range access (a programming error, same class as slice
//! indexing).

use glam::IVec2;

/// A fixed-size `width × height` grid of `T`, stored row-major.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field<T> {
    width:  i32,
    height: i32,
    data:   Vec<T>,
}

impl<T: Clone> Field<T> {
    /// Allocate a `width × height` field with every cell set to `fill`.
    ///
    /// # Panics
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        assert!(width > 0 && height > 0, "field dimensions must be positive");
        Self {
            width,
            height,
            data: vec![fill; width as usize * height as usize],
        }
    }

    /// Reset every cell to `v`.
    pub fn fill(&mut self, v: T) {
        self.data.fill(v);
    }
}

impl<T> Field<T> {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `true` iff `(x, y)` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// `true` iff `cell` lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        self.in_bounds(cell.x, cell.y)
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Borrow the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics when `(x, y)` is outside the grid.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> &T {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) outside {}x{} field",
            self.width,
            self.height
        );
        &self.data[self.offset(x, y)]
    }

    /// Mutably borrow the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics when `(x, y)` is outside the grid.
    #[inline]
    pub fn at_mut(&mut self, x: i32, y: i32) -> &mut T {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) outside {}x{} field",
            self.width,
            self.height
        );
        let i = self.offset(x, y);
        &mut self.data[i]
    }

    /// Borrow the cell at `cell` (panicking accessor, `IVec2` flavor).
    #[inline]
    pub fn cell(&self, cell: IVec2) -> &T {
        self.at(cell.x, cell.y)
    }

    /// Mutably borrow the cell at `cell`.
    #[inline]
    pub fn cell_mut(&mut self, cell: IVec2) -> &mut T {
        self.at_mut(cell.x, cell.y)
    }

    /// Checked probe: `None` when `cell` is off the grid.
    #[inline]
    pub fn get(&self, cell: IVec2) -> Option<&T> {
        if self.contains(cell) {
            Some(&self.data[self.offset(cell.x, cell.y)])
        } else {
            None
        }
    }

    /// The raw row-major cell slice (row `y` occupies
    /// `[y * width, (y + 1) * width)`).  Used by the persistence layer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw access, same layout as [`Field::as_slice`].
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate `(cell, value)` over the whole grid in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (IVec2, &T)> + '_ {
        self.data.iter().enumerate().map(|(i, v)| {
            let x = (i % self.width as usize) as i32;
            let y = (i / self.width as usize) as i32;
            (IVec2::new(x, y), v)
        })
    }
}
