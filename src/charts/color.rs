//! Mark colours drawn from a fixed categorical palette.

use crate::config::ColorMode;
use plotters::style::RGBColor;
use rand::Rng;

pub const OUTLINE: RGBColor = RGBColor(0x33, 0x33, 0x33);

/// Ten categorical colours (d3 "category10").
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4), // Blue
    RGBColor(0xff, 0x7f, 0x0e), // Orange
    RGBColor(0x2c, 0xa0, 0x2c), // Green
    RGBColor(0xd6, 0x27, 0x28), // Red
    RGBColor(0x94, 0x67, 0xbd), // Purple
    RGBColor(0x8c, 0x56, 0x4b), // Brown
    RGBColor(0xe3, 0x77, 0xc2), // Pink
    RGBColor(0x7f, 0x7f, 0x7f), // Grey
    RGBColor(0xbc, 0xbd, 0x22), // Olive
    RGBColor(0x17, 0xbe, 0xcf), // Cyan
];

/// Hands out palette slots for entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAssigner {
    Random,
    /// Slot hashed from the entity name alone, independent of the dataset.
    Stable,
}

impl ColorAssigner {
    pub fn new(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Random => ColorAssigner::Random,
            ColorMode::Stable => ColorAssigner::Stable,
        }
    }

    pub fn slot(&self, entity: &str) -> usize {
        match self {
            ColorAssigner::Random => rand::thread_rng().gen_range(0..PALETTE.len()),
            ColorAssigner::Stable => stable_slot(entity),
        }
    }
}

fn stable_slot(entity: &str) -> usize {
    let digest = blake3::hash(entity.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    (u64::from_le_bytes(prefix) % PALETTE.len() as u64) as usize
}
