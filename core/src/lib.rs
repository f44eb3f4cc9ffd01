#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the hexchess client.
//!
//! This crate defines the vocabulary that connects the rendered board, the
//! pure interaction systems and the adapters that talk to the external rule
//! engine. Systems emit [`Command`] values describing board mutations, the
//! board executes them through its `apply` entry point and reports what
//! happened as [`Event`] values. Coordinates travel between all of these as
//! [`HexCoord`], which owns the packed-id and display-key codecs.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest value accepted on either coordinate axis.
pub const AXIS_MAX: u8 = 0xF;

/// Separator between the two axes of a display key.
pub const KEY_SEPARATOR: char = ',';

/// Errors raised while converting between coordinate representations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoordError {
    /// An axis value fell outside `0..=15`.
    #[error("{axis} coordinate {value} is outside 0..=15")]
    AxisOutOfRange {
        /// Axis that failed validation.
        axis: Axis,
        /// Value supplied for the axis.
        value: i64,
    },
    /// A packed identifier fell outside `0..=255`.
    #[error("packed id {value} is outside 0..=255")]
    PackedIdOutOfRange {
        /// Raw identifier that failed validation.
        value: i64,
    },
    /// A display key did not follow the canonical `"x,y"` form.
    #[error("display key `{key}` is not of the form \"x,y\"")]
    MalformedKey {
        /// Key text that failed to parse.
        key: String,
    },
}

/// Names one of the two coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis, which also indexes board rows.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Packs a coordinate pair into a single nibble-pair identifier.
///
/// Fails when either axis is negative or larger than [`AXIS_MAX`]; values are
/// never truncated into range.
pub fn encode(x: i64, y: i64) -> Result<PackedId, CoordError> {
    Ok(HexCoord::new(x, y)?.packed())
}

/// Unpacks a raw identifier into its `(x, y)` pair.
///
/// Fails when the identifier does not fit in the nibble-pair encoding.
pub fn decode(id: i64) -> Result<(u8, u8), CoordError> {
    let coord = HexCoord::from_packed(PackedId::from_raw(id)?);
    Ok((coord.x(), coord.y()))
}

/// Scalar identifier holding a coordinate as `(x << 4) | y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedId(u8);

impl PackedId {
    /// Wraps an already packed identifier. Every byte is a valid nibble pair.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Validates a raw integer before treating it as a packed identifier.
    pub fn from_raw(value: i64) -> Result<Self, CoordError> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| CoordError::PackedIdOutOfRange { value })
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Location of a single hex cell.
///
/// The pair is stored unpacked but is only constructible inside the range the
/// packed form can represent. Serde uses the display key, so engine maps keyed
/// by `"x,y"` deserialize directly into maps keyed by [`HexCoord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexCoord {
    x: u8,
    y: u8,
}

impl HexCoord {
    /// Creates a coordinate, rejecting axis values outside `0..=15`.
    pub fn new(x: i64, y: i64) -> Result<Self, CoordError> {
        Ok(Self {
            x: checked_axis(Axis::X, x)?,
            y: checked_axis(Axis::Y, y)?,
        })
    }

    /// Rebuilds the coordinate stored in a packed identifier.
    #[must_use]
    pub const fn from_packed(id: PackedId) -> Self {
        Self {
            x: (id.get() >> 4) & AXIS_MAX,
            y: id.get() & AXIS_MAX,
        }
    }

    /// Horizontal position of the cell.
    #[must_use]
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// Row of the cell.
    #[must_use]
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Packs the coordinate into its scalar identifier.
    #[must_use]
    pub const fn packed(&self) -> PackedId {
        PackedId((self.x << 4) | self.y)
    }

    /// Renders the `"x,y"` key shared with the engine and the view.
    #[must_use]
    pub fn display_key(&self) -> String {
        self.to_string()
    }

    /// Returns the coordinate shifted by the provided offsets, if it stays in range.
    #[must_use]
    pub fn offset(&self, dx: i64, dy: i64) -> Option<Self> {
        Self::new(i64::from(self.x) + dx, i64::from(self.y) + dy).ok()
    }
}

fn checked_axis(axis: Axis, value: i64) -> Result<u8, CoordError> {
    match u8::try_from(value) {
        Ok(v) if v <= AXIS_MAX => Ok(v),
        _ => Err(CoordError::AxisOutOfRange { axis, value }),
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.x, self.y)
    }
}

impl FromStr for HexCoord {
    type Err = CoordError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordError::MalformedKey {
            key: key.to_owned(),
        };
        let (x, y) = key.split_once(KEY_SEPARATOR).ok_or_else(malformed)?;
        let x = parse_axis_digits(x).ok_or_else(malformed)?;
        let y = parse_axis_digits(y).ok_or_else(malformed)?;
        Self::new(x, y)
    }
}

/// Parses a canonical decimal axis: digits only, no sign, no leading zeros.
fn parse_axis_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

impl TryFrom<String> for HexCoord {
    type Error = CoordError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse()
    }
}

impl From<HexCoord> for String {
    fn from(coord: HexCoord) -> Self {
        coord.display_key()
    }
}

/// Errors raised while validating occupant glyphs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    /// The engine reported an occupant without any text to draw.
    #[error("occupant glyph must not be empty")]
    Empty,
}

/// Text drawn inside an occupied cell.
///
/// Engine glyphs may carry presentation selectors (the black pawn is sent as
/// `"♟︎"`), so a glyph is stored as a short string rather than a `char`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Glyph(String);

impl Glyph {
    /// Creates a glyph, rejecting empty text.
    pub fn new(text: impl Into<String>) -> Result<Self, GlyphError> {
        let text = text.into();
        if text.is_empty() {
            return Err(GlyphError::Empty);
        }
        Ok(Self(text))
    }

    /// Text of the glyph.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Glyph {
    type Error = GlyphError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<Glyph> for String {
    fn from(glyph: Glyph) -> Self {
        glyph.0
    }
}

/// Side participating in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Side that moves first.
    White,
    /// Side that moves second.
    Black,
}

impl Side {
    /// Glyph the engine uses for this side's king.
    #[must_use]
    pub const fn king_glyph(&self) -> &'static str {
        match self {
            Self::White => "♔",
            Self::Black => "♚",
        }
    }

    /// Parses the one-letter side code reported by the engine.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Self::White),
            "B" => Some(Self::Black),
            _ => None,
        }
    }
}

/// One of the three tiling colors, or no color at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorZone {
    /// First tiling color.
    A,
    /// Second tiling color.
    B,
    /// Third tiling color.
    C,
    /// Cell outside every tiling table.
    Neutral,
}

impl ColorZone {
    /// Indicates whether the zone belongs to the three-color tiling.
    #[must_use]
    pub const fn is_tiled(&self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

/// Interaction highlight currently applied to a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualState {
    /// No highlight; the zone color shows through.
    #[default]
    Default,
    /// Destination reachable from the current selection.
    Reachable,
    /// Cell picked by the player.
    Selected,
    /// King of the side to move while in check.
    Check,
}

/// Decides when the king of the side to move is marked as in check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckIndicator {
    /// Mark the king only while it still has listed moves of its own.
    #[default]
    KingWithMoves,
    /// Mark the king whenever the engine reports check.
    Always,
}

/// Occupants reported by the engine, keyed by cell. Empty cells are absent.
pub type BoardMap = BTreeMap<HexCoord, Glyph>;

/// Destinations reachable by each movable piece of the side to move.
///
/// The index is rebuilt wholesale from every engine response and never patched
/// in place. Destination lists keep the order the engine reported.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovesIndex {
    entries: BTreeMap<HexCoord, Vec<HexCoord>>,
}

impl MovesIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from `(origin, destinations)` pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (HexCoord, Vec<HexCoord>)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Destinations listed for `origin`, or `None` when the engine sent no entry.
    #[must_use]
    pub fn get(&self, origin: HexCoord) -> Option<&[HexCoord]> {
        self.entries.get(&origin).map(Vec::as_slice)
    }

    /// Destinations listed for `origin`, empty when there is no entry.
    #[must_use]
    pub fn destinations(&self, origin: HexCoord) -> &[HexCoord] {
        self.get(origin).unwrap_or(&[])
    }

    /// Indicates whether `origin → destination` is listed.
    #[must_use]
    pub fn allows(&self, origin: HexCoord, destination: HexCoord) -> bool {
        self.destinations(origin).contains(&destination)
    }

    /// Indicates whether `origin` has at least one listed destination.
    #[must_use]
    pub fn has_moves(&self, origin: HexCoord) -> bool {
        !self.destinations(origin).is_empty()
    }

    /// Iterates over the entries in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &[HexCoord])> {
        self.entries
            .iter()
            .map(|(origin, destinations)| (*origin, destinations.as_slice()))
    }

    /// Number of origins listed in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Indicates whether the index lists no origin at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Move the player confirmed, ready to be forwarded to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    /// Cell holding the piece being moved.
    pub from: HexCoord,
    /// Destination cell.
    pub to: HexCoord,
}

impl MoveRequest {
    /// Creates a new move request.
    #[must_use]
    pub const fn new(from: HexCoord, to: HexCoord) -> Self {
        Self { from, to }
    }
}

/// Commands that express all permissible mutations of the rendered board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generates the cell layout, replacing any previous content.
    BuildBoard,
    /// Removes the glyph from every cell.
    ClearGlyphs,
    /// Draws an occupant glyph inside a cell.
    PlaceGlyph {
        /// Cell receiving the glyph.
        cell: HexCoord,
        /// Glyph reported by the engine.
        glyph: Glyph,
    },
    /// Returns every cell to [`VisualState::Default`].
    ResetVisuals,
    /// Applies a highlight to a single cell.
    SetVisual {
        /// Cell receiving the highlight.
        cell: HexCoord,
        /// Highlight to apply.
        state: VisualState,
    },
}

/// Events broadcast by the board after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The cell layout was (re)generated.
    BoardBuilt {
        /// Number of cells in the new layout.
        cells: usize,
    },
    /// Every glyph was removed.
    GlyphsCleared,
    /// A glyph was drawn inside a cell.
    GlyphPlaced {
        /// Cell that received the glyph.
        cell: HexCoord,
    },
    /// Every highlight was removed.
    VisualsReset,
    /// A highlight was applied to a cell.
    VisualChanged {
        /// Cell that changed.
        cell: HexCoord,
        /// Highlight now applied.
        state: VisualState,
    },
    /// A command referenced a coordinate with no cell binding and was skipped.
    CellMissing {
        /// Coordinate that has no cell.
        cell: HexCoord,
    },
}
