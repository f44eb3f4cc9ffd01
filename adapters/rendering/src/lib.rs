#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for hexchess adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use hexchess_core::{ColorZone, Glyph, HexCoord, VisualState};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Parses an opaque `#rrggbb` color.
    pub fn from_hex(value: &str) -> Result<Self, RenderingError> {
        let invalid = || RenderingError::InvalidColor {
            value: value.to_owned(),
        };
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel =
            |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| invalid());
        Ok(Self::from_rgb_u8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Byte RGB channels, rounded and clamped, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        let byte = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.red), byte(self.green), byte(self.blue)]
    }
}

/// Fill colors for the three tiling zones plus highlight overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Fill of zone A cells.
    pub zone_a: Color,
    /// Fill of zone B cells.
    pub zone_b: Color,
    /// Fill of zone C cells.
    pub zone_c: Color,
    /// Fill of cells outside every zone table.
    pub neutral: Color,
    /// Override for the selected cell.
    pub selected: Color,
    /// Override for reachable destinations.
    pub reachable: Color,
    /// Override for a king in check.
    pub check: Color,
}

impl Palette {
    /// Color a cell is drawn with. Any non-default visual state overrides the zone.
    #[must_use]
    pub const fn fill(&self, zone: ColorZone, visual: VisualState) -> Color {
        match visual {
            VisualState::Selected => self.selected,
            VisualState::Reachable => self.reachable,
            VisualState::Check => self.check,
            VisualState::Default => match zone {
                ColorZone::A => self.zone_a,
                ColorZone::B => self.zone_b,
                ColorZone::C => self.zone_c,
                ColorZone::Neutral => self.neutral,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            zone_a: Color::from_rgb_u8(0xe8, 0xc4, 0x8a),
            zone_b: Color::from_rgb_u8(0xb5, 0x86, 0x50),
            zone_c: Color::from_rgb_u8(0xd1, 0x9e, 0x66),
            neutral: Color::from_rgb_u8(0x80, 0x80, 0x80),
            selected: Color::from_rgb_u8(0x5f, 0x9e, 0xa0),
            reachable: Color::from_rgb_u8(0x9a, 0xcd, 0x32),
            check: Color::from_rgb_u8(0xcd, 0x5c, 0x5c),
        }
    }
}

/// Pointy-top hex layout mapping axial coordinates to pixel centers.
///
/// `x` is the axial column and `y` the axial row, so the six neighbours of a
/// cell sit at offsets `(±1,0)`, `(0,±1)`, `(1,-1)` and `(-1,1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    radius: f32,
}

impl HexLayout {
    /// Creates a layout whose hexes have the provided corner radius.
    ///
    /// Returns an error when `radius` is not a positive finite number.
    pub fn new(radius: f32) -> Result<Self, RenderingError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RenderingError::InvalidHexRadius { radius });
        }
        Ok(Self { radius })
    }

    /// Distance between the centers of horizontally adjacent hexes.
    #[must_use]
    pub fn horizontal_spacing(&self) -> f32 {
        self.radius * 3.0_f32.sqrt()
    }

    /// Distance between the center lines of adjacent rows.
    #[must_use]
    pub fn vertical_spacing(&self) -> f32 {
        self.radius * 1.5
    }

    /// Pixel center of a cell.
    #[must_use]
    pub fn center(&self, coord: HexCoord) -> Vec2 {
        let column = f32::from(coord.x());
        let row = f32::from(coord.y());
        Vec2::new(
            self.horizontal_spacing() * (column + row / 2.0),
            self.vertical_spacing() * row,
        )
    }
}

/// A single cell as it should appear on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPresentation {
    /// Coordinate of the cell.
    pub coord: HexCoord,
    /// Fill color after highlight overrides.
    pub fill: Color,
    /// Highlight state driving the fill.
    pub visual: VisualState,
    /// Occupant glyph, if any.
    pub glyph: Option<Glyph>,
}

/// Scene description containing every cell in generation order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scene {
    /// Cells in row-major order, rows ascending `y`.
    pub cells: Vec<CellPresentation>,
    /// Whether adapters should label cells with their display keys.
    pub show_coordinates: bool,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(cells: Vec<CellPresentation>, show_coordinates: bool) -> Self {
        Self {
            cells,
            show_coordinates,
        }
    }

    /// Presentation of the cell at `coord`.
    #[must_use]
    pub fn cell(&self, coord: HexCoord) -> Option<&CellPresentation> {
        self.cells.iter().find(|cell| cell.coord == coord)
    }
}

/// Input captured by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Cell the player clicked, if any.
    pub click: Option<HexCoord>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown above the board.
    pub window_title: String,
    /// Color behind the board.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting hexchess scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// `update_scene` receives each input captured by the adapter and may
    /// mutate the scene before it is drawn again. An error returned from the
    /// closure stops the backend and is returned to the caller.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Hex radius must be positive to avoid a degenerate layout.
    InvalidHexRadius {
        /// Provided radius that failed validation.
        radius: f32,
    },
    /// Colors must be written as `#rrggbb`.
    InvalidColor {
        /// Provided text that failed to parse.
        value: String,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHexRadius { radius } => {
                write!(f, "hex radius must be positive (received {radius})")
            }
            Self::InvalidColor { value } => {
                write!(f, "color must be written as #rrggbb (received {value:?})")
            }
        }
    }
}

impl Error for RenderingError {}
