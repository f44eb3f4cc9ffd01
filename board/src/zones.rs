//! Static three-color tiling tables.
//!
//! Each table lists the packed ids of one tiling color, sorted ascending and
//! grouped by column. No two edge-adjacent cells share a table.

use hexchess_core::{ColorZone, PackedId};

/// Packed ids painted with the first tiling color.
#[rustfmt::skip]
pub const ZONE_A: [u8; 30] = [
    0x07, 0x0a,
    0x15, 0x18,
    0x23, 0x26, 0x29,
    0x34, 0x37, 0x3a,
    0x42, 0x45, 0x48,
    0x50, 0x53, 0x56, 0x59,
    0x61, 0x64, 0x67,
    0x72, 0x75, 0x78,
    0x80, 0x83, 0x86,
    0x91, 0x94,
    0xa2, 0xa5,
];

/// Packed ids painted with the second tiling color.
#[rustfmt::skip]
pub const ZONE_B: [u8; 31] = [
    0x06, 0x09,
    0x14, 0x17, 0x1a,
    0x25, 0x28,
    0x33, 0x36, 0x39,
    0x41, 0x44, 0x47, 0x4a,
    0x52, 0x55, 0x58,
    0x60, 0x63, 0x66, 0x69,
    0x71, 0x74, 0x77,
    0x82, 0x85,
    0x90, 0x93, 0x96,
    0xa1, 0xa4,
];

/// Packed ids painted with the third tiling color.
#[rustfmt::skip]
pub const ZONE_C: [u8; 30] = [
    0x05, 0x08,
    0x16, 0x19,
    0x24, 0x27, 0x2a,
    0x32, 0x35, 0x38,
    0x43, 0x46, 0x49,
    0x51, 0x54, 0x57, 0x5a,
    0x62, 0x65, 0x68,
    0x70, 0x73, 0x76,
    0x81, 0x84, 0x87,
    0x92, 0x95,
    0xa0, 0xa3,
];

/// Looks up the tiling color of a packed id. Ids absent from every table are
/// [`ColorZone::Neutral`].
#[must_use]
pub fn classify(id: PackedId) -> ColorZone {
    let id = id.get();
    if ZONE_A.binary_search(&id).is_ok() {
        ColorZone::A
    } else if ZONE_B.binary_search(&id).is_ok() {
        ColorZone::B
    } else if ZONE_C.binary_search(&id).is_ok() {
        ColorZone::C
    } else {
        ColorZone::Neutral
    }
}
