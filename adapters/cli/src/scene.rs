//! Conversion from the board to rendering descriptors.

use std::fmt::Write as _;

use hexchess_board::{query, Board};
use hexchess_core::ColorZone;
use hexchess_rendering::{CellPresentation, Palette, Scene};

/// Builds a scene with one presentation per board cell, in board order.
#[must_use]
pub fn build_scene(board: &Board, palette: &Palette, show_coordinates: bool) -> Scene {
    let cells = query::cells(board)
        .iter()
        .map(|cell| CellPresentation {
            coord: cell.coord(),
            fill: palette.fill(cell.zone(), cell.visual()),
            visual: cell.visual(),
            glyph: cell.glyph().cloned(),
        })
        .collect();
    Scene::new(cells, show_coordinates)
}

/// Plain-text listing of the board geometry: one line per row with each
/// cell's display key and zone.
#[must_use]
pub fn describe_layout(board: &Board) -> String {
    let mut text = String::new();
    for row in query::rows(board) {
        let Some(first) = row.first() else {
            continue;
        };
        let _ = write!(text, "y={:>2}:", first.coord().y());
        for cell in row {
            let _ = write!(text, " {}({})", cell.coord(), zone_label(cell.zone()));
        }
        text.push('\n');
    }
    text
}

const fn zone_label(zone: ColorZone) -> char {
    match zone {
        ColorZone::A => 'A',
        ColorZone::B => 'B',
        ColorZone::C => 'C',
        ColorZone::Neutral => '-',
    }
}
