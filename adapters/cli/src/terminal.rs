//! Text rendering backend that draws the board as truecolor terminal cells.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use glam::Vec2;
use hexchess_core::HexCoord;
use hexchess_rendering::{
    CellPresentation, Color, FrameInput, HexLayout, Presentation, RenderingBackend, Scene,
};
use tracing::warn;
use unicode_width::UnicodeWidthStr;

/// Columns occupied by one cell.
const CELL_WIDTH: usize = 4;
const PROMPT: &str = "cell (x,y) or q to quit> ";

/// Backend reading cell keys from `input` and drawing frames to `output`.
#[derive(Debug)]
pub struct TerminalBackend<R, W> {
    input: R,
    output: W,
    layout: HexLayout,
}

impl<R: BufRead, W: Write> TerminalBackend<R, W> {
    /// Creates a backend over the provided streams.
    pub fn new(input: R, output: W) -> Result<Self> {
        let layout = HexLayout::new(1.0)?;
        Ok(Self {
            input,
            output,
            layout,
        })
    }

    fn draw(&mut self, title: &str, clear_color: Color, scene: &Scene) -> Result<()> {
        render_frame(&mut self.output, &self.layout, title, clear_color, scene)
            .and_then(|()| queue!(self.output, Print(PROMPT)))
            .and_then(|()| self.output.flush())
            .context("failed to draw board")
    }
}

impl<R: BufRead, W: Write> RenderingBackend for TerminalBackend<R, W> {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> Result<()>,
    {
        let Presentation {
            window_title,
            clear_color,
            mut scene,
        } = presentation;
        self.draw(&window_title, clear_color, &scene)?;

        let mut line = String::new();
        loop {
            line.clear();
            if self
                .input
                .read_line(&mut line)
                .context("failed to read input")?
                == 0
            {
                return Ok(());
            }

            let input = match parse_input(line.trim()) {
                Ok(Some(input)) => input,
                Ok(None) => return Ok(()),
                Err(key) => {
                    warn!(%key, "not a cell key");
                    continue;
                }
            };
            update_scene(input, &mut scene)?;
            self.draw(&window_title, clear_color, &scene)?;
        }
    }
}

/// Interprets one input line. `Ok(None)` requests exit; `Err` carries an
/// unreadable key.
fn parse_input(line: &str) -> Result<Option<FrameInput>, String> {
    match line {
        "q" | "quit" => Ok(None),
        "" => Ok(Some(FrameInput::default())),
        key => key
            .parse::<HexCoord>()
            .map(|cell| Some(FrameInput { click: Some(cell) }))
            .map_err(|_| key.to_owned()),
    }
}

/// Queues a full frame: title, then one text line per board row.
///
/// Cells are staggered by their [`HexLayout`] centers so each row sits half a
/// cell from its neighbours.
pub fn render_frame<W: Write>(
    out: &mut W,
    layout: &HexLayout,
    title: &str,
    clear_color: Color,
    scene: &Scene,
) -> io::Result<()> {
    let origin = scene
        .cells
        .iter()
        .map(|cell| layout.center(cell.coord))
        .fold(Vec2::splat(f32::INFINITY), Vec2::min);
    let background = term_color(clear_color);

    queue!(out, ResetColor, Print('\n'), Print(title), Print('\n'))?;
    let mut row = None;
    let mut column = 0;
    for cell in &scene.cells {
        if row != Some(cell.coord.y()) {
            if row.is_some() {
                queue!(out, ResetColor, Print('\n'))?;
            }
            row = Some(cell.coord.y());
            column = 0;
        }
        let offset = (layout.center(cell.coord).x - origin.x) / layout.horizontal_spacing();
        let target = (offset * CELL_WIDTH as f32).round() as usize;
        queue!(
            out,
            SetBackgroundColor(background),
            Print(" ".repeat(target.saturating_sub(column))),
            SetBackgroundColor(term_color(cell.fill)),
            SetForegroundColor(TermColor::Black),
            Print(cell_label(cell, scene.show_coordinates)),
            ResetColor
        )?;
        column = target.max(column) + CELL_WIDTH;
    }
    if row.is_some() {
        queue!(out, ResetColor, Print('\n'))?;
    }
    Ok(())
}

/// Cell text centered in exactly [`CELL_WIDTH`] display columns.
fn cell_label(cell: &CellPresentation, show_coordinates: bool) -> String {
    let text = match (&cell.glyph, show_coordinates) {
        (Some(glyph), _) => glyph.to_string(),
        (None, true) => cell.coord.display_key(),
        (None, false) => "·".to_owned(),
    };
    let padding = CELL_WIDTH.saturating_sub(text.width());
    let left = padding / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(padding - left))
}

fn term_color(color: Color) -> TermColor {
    let [r, g, b] = color.to_rgb_u8();
    TermColor::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::Command;
    use hexchess_core::{Glyph, VisualState};

    const FILL: Color = Color::from_rgb_u8(0x10, 0x20, 0x30);
    const CLEAR: Color = Color::from_rgb_u8(0, 0, 0);

    fn cell(x: i64, y: i64, glyph: Option<&str>) -> CellPresentation {
        CellPresentation {
            coord: HexCoord::new(x, y).expect("valid coordinate"),
            fill: FILL,
            visual: VisualState::Default,
            glyph: glyph.map(|text| Glyph::new(text).expect("non-empty glyph")),
        }
    }

    fn ansi(command: impl Command) -> String {
        let mut text = String::new();
        command.write_ansi(&mut text).expect("ansi writes to a string");
        text
    }

    fn render(scene: &Scene) -> String {
        let layout = HexLayout::new(1.0).expect("positive radius");
        let mut frame = Vec::new();
        render_frame(&mut frame, &layout, "hexchess", CLEAR, scene).expect("frame renders");
        String::from_utf8(frame).expect("frame is utf-8")
    }

    /// Frame text with the styling sequences used by `render_frame` removed.
    fn plain(frame: &str) -> String {
        [
            ansi(SetBackgroundColor(term_color(CLEAR))),
            ansi(SetBackgroundColor(term_color(FILL))),
            ansi(SetForegroundColor(TermColor::Black)),
            ansi(ResetColor),
        ]
        .iter()
        .fold(frame.to_owned(), |text, sequence| text.replace(sequence.as_str(), ""))
    }

    #[test]
    fn cells_are_painted_with_their_fill() {
        let frame = render(&Scene::new(vec![cell(7, 5, Some("♔"))], false));

        assert!(frame.contains(&ansi(SetBackgroundColor(TermColor::Rgb {
            r: 0x10,
            g: 0x20,
            b: 0x30
        }))));
        assert!(frame.contains(&ansi(SetForegroundColor(TermColor::Black))));
        assert!(frame.ends_with(&format!("{}\n", ansi(ResetColor))));
    }

    #[test]
    fn rows_are_staggered_by_half_a_cell() {
        let scene = Scene::new(vec![cell(1, 0, Some("♔")), cell(0, 1, None)], false);

        let frame = plain(&render(&scene));
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines[1], "hexchess");
        assert_eq!(lines[2], "   ♔  ");
        assert_eq!(lines[3], " ·  ");
    }

    #[test]
    fn every_label_fills_exactly_one_cell_width() {
        for glyph in [Some("♔"), Some("♟\u{fe0e}"), None] {
            let label = cell_label(&cell(10, 5, glyph), true);
            assert_eq!(label.width(), CELL_WIDTH, "label {label:?}");
        }
        assert_eq!(cell_label(&cell(7, 5, None), false).width(), CELL_WIDTH);
    }

    #[test]
    fn black_pawn_rows_keep_their_alignment() {
        let pawn_row = plain(&render(&Scene::new(
            vec![cell(1, 0, Some("♟\u{fe0e}")), cell(2, 0, None)],
            false,
        )));
        let king_row = plain(&render(&Scene::new(
            vec![cell(1, 0, Some("♔")), cell(2, 0, None)],
            false,
        )));

        let pawn_line = pawn_row.lines().nth(2).expect("board row");
        let king_line = king_row.lines().nth(2).expect("board row");
        assert_eq!(pawn_line.width(), 2 * CELL_WIDTH);
        assert_eq!(pawn_line.width(), king_line.width());
    }

    #[test]
    fn coordinates_label_empty_cells() {
        let frame = plain(&render(&Scene::new(vec![cell(7, 5, None)], true)));

        assert!(frame.contains("7,5"));
    }

    #[test]
    fn parse_input_recognises_quit_keys_and_blank_lines() {
        assert_eq!(parse_input("q"), Ok(None));
        assert_eq!(parse_input("quit"), Ok(None));
        assert_eq!(parse_input(""), Ok(Some(FrameInput::default())));
        assert_eq!(
            parse_input("7,5"),
            Ok(Some(FrameInput {
                click: HexCoord::new(7, 5).ok()
            }))
        );
        assert_eq!(parse_input("7, 5"), Err("7, 5".to_owned()));
    }

    #[test]
    fn run_feeds_clicks_until_quit() {
        let input = b"7,5\nnonsense\n\n8,5\nq\n9,5\n".as_slice();
        let mut output = Vec::new();
        let backend = TerminalBackend::new(input, &mut output).expect("backend");
        let mut clicks = Vec::new();

        backend
            .run(
                Presentation::new("t", Color::new(0.0, 0.0, 0.0, 1.0), Scene::default()),
                |frame, _scene| {
                    clicks.push(frame.click);
                    Ok(())
                },
            )
            .expect("loop ends at quit");

        assert_eq!(
            clicks,
            vec![HexCoord::new(7, 5).ok(), None, HexCoord::new(8, 5).ok()]
        );
    }

    #[test]
    fn run_stops_on_callback_error() {
        let input = b"7,5\n8,5\n".as_slice();
        let mut calls = 0;

        let result = TerminalBackend::new(input, Vec::new())
            .expect("backend")
            .run(
                Presentation::new("t", Color::new(0.0, 0.0, 0.0, 1.0), Scene::default()),
                |_, _| {
                    calls += 1;
                    anyhow::bail!("engine went away")
                },
            );

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
