//! Warlock progression table: the single source of truth for level-gated numbers.

use thiserror::Error;

/// Lowest character level the table covers.
pub const MIN_LEVEL: u8 = 1;
/// Highest character level; leveling past this is impossible.
pub const MAX_LEVEL: u8 = 20;

/// One immutable row of the warlock progression table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionRow {
    /// How many cantrips the character knows at this level.
    pub cantrips: u8,
    /// How many leveled spells the character knows at this level.
    pub spells_known: u8,
    /// Size of the pact-slot pool.
    pub pact_slots: u8,
    /// Highest spell level castable from a pact slot (1..=5).
    pub pact_slot_level: u8,
    /// How many eldritch invocations the character knows (0 before level 2).
    pub invocations: u8,
    /// Whether this level grants an ability score improvement or feat.
    pub asi: bool,
    /// Mystic Arcanum rank unlocked at this level, if any (6..=9).
    pub arcanum: Option<u8>,
}

/// Errors raised when a level falls outside the progression table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("no progression row for level {level} (valid range {MIN_LEVEL}..={MAX_LEVEL})")]
    LevelOutOfRange { level: u8 },
}

const fn row(
    cantrips: u8,
    spells_known: u8,
    pact_slots: u8,
    pact_slot_level: u8,
    invocations: u8,
    asi: bool,
    arcanum: Option<u8>,
) -> ProgressionRow {
    ProgressionRow {
        cantrips,
        spells_known,
        pact_slots,
        pact_slot_level,
        invocations,
        asi,
        arcanum,
    }
}

/// SRD warlock progression, indexed by `level - 1`.
static TABLE: [ProgressionRow; MAX_LEVEL as usize] = [
    row(2, 2, 1, 1, 0, false, None),    // 1
    row(2, 3, 2, 1, 2, false, None),    // 2
    row(2, 4, 2, 2, 2, false, None),    // 3
    row(2, 5, 2, 2, 2, true, None),     // 4
    row(3, 6, 2, 3, 3, false, None),    // 5
    row(3, 7, 2, 3, 3, false, None),    // 6
    row(3, 8, 2, 4, 4, false, None),    // 7
    row(3, 9, 2, 4, 4, true, None),     // 8
    row(3, 10, 2, 5, 5, false, None),   // 9
    row(4, 10, 2, 5, 5, false, None),   // 10
    row(4, 11, 3, 5, 5, false, Some(6)), // 11
    row(4, 11, 3, 5, 6, true, None),    // 12
    row(4, 12, 3, 5, 6, false, Some(7)), // 13
    row(4, 12, 3, 5, 6, false, None),   // 14
    row(4, 13, 3, 5, 7, false, Some(8)), // 15
    row(4, 13, 3, 5, 7, true, None),    // 16
    row(4, 14, 4, 5, 7, false, Some(9)), // 17
    row(4, 14, 4, 5, 8, false, None),   // 18
    row(4, 15, 4, 5, 8, true, None),    // 19
    row(4, 15, 4, 5, 8, false, None),   // 20
];

/// Look up the progression row for a character level.
///
/// # Errors
///
/// Returns `ProgressionError::LevelOutOfRange` when `level` is outside
/// `MIN_LEVEL..=MAX_LEVEL`. Callers construct levels inside that range, so an
/// error here is a programming or data fault, not a user mistake.
pub fn row_for(level: u8) -> Result<&'static ProgressionRow, ProgressionError> {
    if level < MIN_LEVEL || level > MAX_LEVEL {
        return Err(ProgressionError::LevelOutOfRange { level });
    }
    Ok(&TABLE[(level - 1) as usize])
}

/// The warlock hit die (d8).
#[must_use]
pub const fn hit_die() -> i32 {
    8
}

/// Fixed HP gain option in place of a roll (PHB fixed value for a d8).
#[must_use]
pub const fn fixed_hp_gain() -> i32 {
    5
}

/// Mystic Arcanum ranks, lowest to highest.
pub const ARCANUM_RANKS: [u8; 4] = [6, 7, 8, 9];
