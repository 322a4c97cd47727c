//! Partitioning of the tile sequence across cube faces.
//!
//! The input is consumed greedily: the first `grid_size²` items go to the
//! front face in row-major order, the next slice to the back face, and so on
//! through [`CubeFace::ALL`]. Short inputs leave trailing faces partially or
//! fully empty. Items beyond `6 × grid_size²` have no cell and are reported as
//! overflow.

use crate::error::{GalleryError, Result};
use crate::face::CubeFace;

/// A cell coordinate on one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub face: CubeFace,
    pub row: u32,
    pub col: u32,
}

/// The contiguous slice of input assigned to one face.
#[derive(Clone, Debug)]
pub struct FaceSlice<'a, T> {
    pub face: CubeFace,
    /// Index of `items[0]` within the full input sequence.
    pub start: usize,
    pub items: &'a [T],
    grid_size: u32,
}

impl<'a, T> FaceSlice<'a, T> {
    /// Iterate `(input index, cell, item)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, Cell, &'a T)> + '_ {
        let g = self.grid_size as usize;
        let face = self.face;
        let start = self.start;
        self.items.iter().enumerate().map(move |(i, item)| {
            let cell = Cell {
                face,
                row: (i / g) as u32,
                col: (i % g) as u32,
            };
            (start + i, cell, item)
        })
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == (self.grid_size as usize).pow(2)
    }
}

/// Face-to-items mapping produced by [`allocate`].
#[derive(Clone, Debug)]
pub struct GridAllocation<'a, T> {
    faces: [FaceSlice<'a, T>; 6],
    /// Number of trailing input items that did not fit on the cube.
    pub overflow: usize,
}

impl<'a, T> GridAllocation<'a, T> {
    /// The slice assigned to `face`.
    pub fn face(&self, face: CubeFace) -> &FaceSlice<'a, T> {
        &self.faces[face.id()]
    }

    /// All six faces in canonical order.
    pub fn faces(&self) -> &[FaceSlice<'a, T>; 6] {
        &self.faces
    }

    /// Every allocated item with its cell, in input order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, Cell, &'a T)> + '_ {
        self.faces.iter().flat_map(|slice| slice.cells())
    }

    /// Number of items that received a cell.
    pub fn len(&self) -> usize {
        self.faces.iter().map(|slice| slice.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `items` into six row-major face grids of `grid_size × grid_size`.
pub fn allocate<T>(items: &[T], grid_size: u32) -> Result<GridAllocation<'_, T>> {
    if grid_size == 0 {
        return Err(GalleryError::invalid("grid size must be at least 1"));
    }

    let per_face = (grid_size as usize).checked_pow(2);
    let capacity = per_face.and_then(|n| n.checked_mul(CubeFace::ALL.len()));
    let (Some(per_face), Some(capacity)) = (per_face, capacity) else {
        return Err(GalleryError::invalid(format!(
            "grid size {grid_size} has more cells than can be addressed"
        )));
    };

    let faces = CubeFace::ALL.map(|face| {
        let start = (face.id() * per_face).min(items.len());
        let end = (start + per_face).min(items.len());
        FaceSlice {
            face,
            start,
            items: &items[start..end],
            grid_size,
        }
    });

    let overflow = items.len().saturating_sub(capacity);
    if overflow > 0 {
        tracing::warn!(
            overflow,
            capacity,
            "more tiles than cube cells, trailing tiles are not placed"
        );
    }

    Ok(GridAllocation { faces, overflow })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sources(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/assets/{i}.jpg")).collect()
    }

    #[test]
    fn full_cube_fills_every_face() {
        let items = sources(54);
        let alloc = allocate(&items, 3).unwrap();

        assert_eq!(alloc.len(), 54);
        assert_eq!(alloc.overflow, 0);
        for slice in alloc.faces() {
            assert_eq!(slice.items.len(), 9);
            assert!(slice.is_full());
        }
        assert_eq!(alloc.face(CubeFace::Back).items[0], "/assets/9.jpg");
        assert_eq!(alloc.face(CubeFace::Bottom).items[8], "/assets/53.jpg");
    }

    #[test]
    fn every_item_gets_one_unique_cell() {
        for (len, grid) in [(54, 3), (20, 3), (0, 2), (100, 4), (7, 1)] {
            let items = sources(len);
            let alloc = allocate(&items, grid).unwrap();

            let mut seen_indices = HashSet::new();
            let mut seen_cells = HashSet::new();
            for (index, cell, item) in alloc.cells() {
                assert_eq!(item, &items[index]);
                assert!(cell.row < grid && cell.col < grid);
                assert!(seen_indices.insert(index), "index {index} allocated twice");
                assert!(seen_cells.insert(cell), "cell {cell:?} shared");
            }

            let capacity = 6 * (grid as usize).pow(2);
            assert_eq!(seen_indices.len(), len.min(capacity));
            assert_eq!(alloc.overflow, len.saturating_sub(capacity));
        }
    }

    #[test]
    fn cells_are_row_major() {
        let items = sources(9);
        let alloc = allocate(&items, 3).unwrap();
        let cells: Vec<_> = alloc
            .face(CubeFace::Front)
            .cells()
            .map(|(_, c, _)| (c.row, c.col))
            .collect();
        assert_eq!(
            cells,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn short_input_leaves_trailing_faces_empty() {
        let items = sources(12);
        let alloc = allocate(&items, 3).unwrap();

        assert_eq!(alloc.face(CubeFace::Front).items.len(), 9);
        assert_eq!(alloc.face(CubeFace::Back).items.len(), 3);
        assert!(!alloc.face(CubeFace::Back).is_full());
        for face in [CubeFace::Left, CubeFace::Right, CubeFace::Top, CubeFace::Bottom] {
            assert!(alloc.face(face).items.is_empty());
        }
    }

    #[test]
    fn empty_input_is_valid() {
        let items: Vec<String> = Vec::new();
        let alloc = allocate(&items, 3).unwrap();
        assert!(alloc.is_empty());
        assert_eq!(alloc.cells().count(), 0);
    }

    #[test]
    fn unaddressable_grid_is_rejected() {
        let items = sources(4);
        assert!(matches!(
            allocate(&items, u32::MAX),
            Err(GalleryError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_grid_is_rejected() {
        let items = sources(4);
        assert!(matches!(
            allocate(&items, 0),
            Err(GalleryError::InvalidConfiguration(_))
        ));
    }
}
