//! Fixed row layout of the 91-cell hexagonal board.

use hexchess_core::{HexCoord, PackedId};

/// Placement of one board row: first column, row index and cell count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpec {
    start_x: u8,
    y: u8,
    length: u8,
}

impl RowSpec {
    const fn new(start_x: u8, y: u8, length: u8) -> Self {
        Self { start_x, y, length }
    }

    /// Column of the leftmost cell in the row.
    #[must_use]
    pub const fn start_x(&self) -> u8 {
        self.start_x
    }

    /// Row index shared by every cell in the row.
    #[must_use]
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Number of cells in the row.
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Coordinates of the row in ascending column order.
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> {
        let y = self.y;
        (self.start_x..self.start_x + self.length)
            .map(move |x| HexCoord::from_packed(PackedId::new((x << 4) | y)))
    }
}

/// Rows in ascending `y` order. The upper half widens as it walks left, the
/// lower half is pinned at column zero and shrinks.
pub const ROW_LAYOUT: [RowSpec; 11] = [
    RowSpec::new(5, 0, 6),
    RowSpec::new(4, 1, 7),
    RowSpec::new(3, 2, 8),
    RowSpec::new(2, 3, 9),
    RowSpec::new(1, 4, 10),
    RowSpec::new(0, 5, 11),
    RowSpec::new(0, 6, 10),
    RowSpec::new(0, 7, 9),
    RowSpec::new(0, 8, 8),
    RowSpec::new(0, 9, 7),
    RowSpec::new(0, 10, 6),
];

/// Number of cells produced by [`ROW_LAYOUT`].
pub const CELL_COUNT: usize = 91;

const _: () = assert!(layout_is_packable(&ROW_LAYOUT));
const _: () = assert!(layout_cell_count(&ROW_LAYOUT) == CELL_COUNT);

// Every column and row must fit a nibble, otherwise `coords` would alias cells.
const fn layout_is_packable(rows: &[RowSpec]) -> bool {
    let mut index = 0;
    while index < rows.len() {
        let row = rows[index];
        if row.length == 0 || row.y > 0xF || row.start_x as u16 + row.length as u16 > 0x10 {
            return false;
        }
        index += 1;
    }
    true
}

const fn layout_cell_count(rows: &[RowSpec]) -> usize {
    let mut total = 0;
    let mut index = 0;
    while index < rows.len() {
        total += rows[index].length as usize;
        index += 1;
    }
    total
}

/// Enumerates every board coordinate row-major: rows by ascending `y`, cells
/// by ascending `x`. Callers rely on this order for listing and drawing.
pub fn layout_coords() -> impl Iterator<Item = HexCoord> {
    ROW_LAYOUT.iter().flat_map(RowSpec::coords)
}
