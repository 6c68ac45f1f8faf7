use anyhow::{anyhow, ensure};
use std::{
    fmt::{self, Display},
    ops,
};

/// A fixed-size, dense 2D array of cells. This has no notion of space, it's
/// just storage with bounds checks. See [crate::SpatialGrid] for grids that
/// live in world space.
///
/// Cells are stored row-major: `(x, y)` lives at `y * width + x`. Dimensions
/// are fixed at construction; a grid is never resized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Create a new grid where every cell holds `T::default()`
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Clone> Grid<T> {
    /// Create a new grid where every cell holds a copy of `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Overwrite every cell in the grid with a copy of `value`
    pub fn fill(&mut self, value: T) {
        for cell in &mut self.cells {
            *cell = value.clone();
        }
    }
}

impl<T> Grid<T> {
    /// Wrap an existing buffer of cells, which must be in row-major order.
    /// Fails if the buffer length doesn't match the given dimensions.
    pub fn from_vec(
        width: usize,
        height: usize,
        cells: Vec<T>,
    ) -> anyhow::Result<Self> {
        let expected = width.checked_mul(height);
        ensure!(
            expected == Some(cells.len()),
            "expected {} cells for a {}x{} grid, got {}",
            match expected {
                Some(len) => len.to_string(),
                None => "more than usize::MAX".to_owned(),
            },
            width,
            height,
            cells.len()
        );
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, i.e. `width * height`
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Is the given position inside this grid? Takes signed values so callers
    /// can check positions computed by offsetting (which may go negative)
    /// without casting first. Never panics.
    pub fn is_valid(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && (x as u64) < self.width as u64
            && (y as u64) < self.height as u64
    }

    /// Is the given position on the outer edge of the grid? A cell is on the
    /// border if it's in the first or last row, or the first or last column.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0
            || y == 0
            || x == self.width.wrapping_sub(1)
            || y == self.height.wrapping_sub(1)
    }

    /// Get a reference to a cell, or `None` if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        let i = self.offset(x, y)?;
        Some(&self.cells[i])
    }

    /// Get a mutable reference to a cell, or `None` if out of bounds
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        let i = self.offset(x, y)?;
        Some(&mut self.cells[i])
    }

    /// Overwrite a single cell. Fails if the position is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> anyhow::Result<()> {
        let i = self.offset(x, y).ok_or_else(|| {
            anyhow!(
                "position ({}, {}) is outside {}x{} grid",
                x,
                y,
                self.width,
                self.height
            )
        })?;
        self.cells[i] = value;
        Ok(())
    }

    /// Invoke `visit` on every position in the grid. Order is row-major: `y`
    /// is the outer loop and `x` the inner loop, so an entire row is visited
    /// before moving to the next.
    pub fn iterate(&self, mut visit: impl FnMut(usize, usize)) {
        for (x, y) in self.positions() {
            visit(x, y);
        }
    }

    /// Iterator of every position in the grid, in the same order as
    /// [Self::iterate]
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// All positions that satisfy the predicate, in row-major order. The
    /// iterator is lazy, so each call recomputes the sequence from scratch.
    pub fn positions_where<'a, P: Fn(usize, usize) -> bool + 'a>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.positions().filter(move |&(x, y)| predicate(x, y))
    }

    /// Iterate over cell values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Iterate over mutable cell values in row-major order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// Map this grid into a new grid of the same dimensions by applying the
    /// given function to each cell
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.into_iter().map(f).collect(),
        }
    }

    /// Convert a position to an index in the flat cell vector
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}

/// Unchecked access. Out-of-bounds positions are a bug in the caller, so this
/// panics. Check with [Grid::is_valid] first, or use [Grid::get].
impl<T> ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        match self.offset(x, y) {
            Some(i) => &self.cells[i],
            None => panic!(
                "position ({}, {}) is outside {}x{} grid",
                x, y, self.width, self.height
            ),
        }
    }
}

impl<T> ops::IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        match self.offset(x, y) {
            Some(i) => &mut self.cells[i],
            None => panic!(
                "position ({}, {}) is outside {}x{} grid",
                x, y, self.width, self.height
            ),
        }
    }
}

/// Debug-friendly dump of the grid: one bracketed line per row, with each
/// cell padded by a space on either side. Not meant to be parsed.
impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row = &self.cells[y * self.width..(y + 1) * self.width];
            write!(f, "[")?;
            for cell in row {
                write!(f, " {} ", cell)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        let grid: Grid<u8> = Grid::new(4, 3);
        for x in -2..6 {
            for y in -2..5 {
                let expected = (0..4).contains(&x) && (0..3).contains(&y);
                assert_eq!(grid.is_valid(x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_is_border() {
        let grid: Grid<u8> = Grid::new(4, 3);
        let border: Vec<_> =
            grid.positions_where(|x, y| grid.is_border(x, y)).collect();
        // Only the two middle cells of the middle row are interior
        assert_eq!(border.len(), 10);
        assert!(!grid.is_border(1, 1));
        assert!(!grid.is_border(2, 1));
        assert!(grid.is_border(3, 1));
        assert!(grid.is_border(1, 2));
        // Far out of range is not the last column/row
        assert!(!grid.is_border(usize::MAX, 1));
        assert!(!grid.is_border(1, usize::MAX));
    }

    #[test]
    fn test_iterate_order() {
        let grid: Grid<()> = Grid::new(3, 2);
        let mut visited = Vec::new();
        grid.iterate(|x, y| visited.push((x, y)));
        assert_eq!(
            visited,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_positions_where() {
        let mut grid: Grid<u32> = Grid::new(3, 3);
        for (x, y) in grid.positions().collect::<Vec<_>>() {
            grid[(x, y)] = (y * 3 + x) as u32;
        }

        let odd = |grid: &Grid<u32>| {
            grid.positions_where(|x, y| grid[(x, y)] % 2 == 1)
                .collect::<Vec<_>>()
        };
        assert_eq!(odd(&grid), vec![(1, 0), (0, 1), (2, 1), (1, 2)]);
        // Re-invoking recomputes the same sequence
        assert_eq!(odd(&grid), odd(&grid));
    }

    #[test]
    fn test_fill_and_set() {
        let mut grid = Grid::filled(2, 2, 'a');
        assert!(grid.iter().all(|c| *c == 'a'));

        grid.set(1, 0, 'b').unwrap();
        assert_eq!(grid.get(1, 0), Some(&'b'));
        assert!(grid.set(2, 0, 'c').is_err());
        assert_eq!(grid.get(0, 2), None);

        grid.fill('z');
        assert!(grid.iter().all(|c| *c == 'z'));
    }

    #[test]
    fn test_from_vec() {
        let grid = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid[(1, 0)], 2);
        assert_eq!(grid[(0, 1)], 3);
        assert!(Grid::from_vec(2, 3, vec![1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_from_vec_overflowing_dimensions() {
        // The cell count doesn't fit in a usize, so no buffer can match
        assert!(Grid::<u8>::from_vec(usize::MAX, 2, vec![]).is_err());
        assert!(Grid::<u8>::from_vec(2, usize::MAX / 2 + 1, vec![]).is_err());
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_index_out_of_bounds() {
        let grid: Grid<u8> = Grid::new(2, 2);
        let _ = grid[(2, 0)];
    }

    #[test]
    fn test_map() {
        let grid = Grid::from_vec(2, 1, vec![1, 2]).unwrap();
        let mapped = grid.map(|v| v * 10);
        assert_eq!(mapped.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(mapped.width(), 2);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid.to_string(), "[ 1  2 ]\n[ 3  4 ]\n");
    }

    #[test]
    fn test_display_empty_rows() {
        let grid: Grid<u8> = Grid::new(0, 3);
        assert_eq!(grid.to_string(), "[]\n[]\n[]\n");
    }
}
