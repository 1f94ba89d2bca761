//! Pure derived-stats calculator over a character snapshot.

use serde::{Deserialize, Serialize};

use crate::progression::{ProgressionError, hit_die, row_for};
use crate::state::{Ability, Character, proficiency_bonus};

/// Flat HP bonus per character level granted by the Tough feat.
const TOUGH_HP_PER_LEVEL: i32 = 2;

/// Everything computed from a character rather than stored on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub level: u8,
    pub proficiency_bonus: i32,
    pub con_mod: i32,
    pub cha_mod: i32,
    pub hp_max: i32,
    pub pact_slots_max: u8,
    pub pact_slot_level: u8,
    pub cantrips_known_max: u8,
    pub spells_known_max: u8,
    pub invocations_known_max: u8,
    /// Mystic Arcanum rank newly unlocked at this level, if any.
    pub arcanum_unlock: Option<u8>,
    pub spell_save_dc: i32,
    pub spell_attack: i32,
}

/// Compute derived stats for a character.
///
/// Pure and idempotent: never mutates its argument, and two calls on an
/// unmodified character return identical values. Callers derive fresh after
/// every mutation rather than caching.
///
/// HP: level 1 grants the full hit die plus CON modifier; each later level
/// grants `max(1, roll + CON modifier)` where a missing roll counts as 0
/// before the floor; Tough adds a flat bonus per level.
///
/// # Errors
///
/// Returns `ProgressionError::LevelOutOfRange` when the character's level is
/// outside the progression table. Levels are bounded 1..=20 by construction,
/// so this is a fatal data fault.
pub fn derive(character: &Character) -> Result<DerivedStats, ProgressionError> {
    let level = character.class.level;
    let prog = row_for(level)?;

    let con_mod = character.ability_mod(Ability::Con);
    let cha_mod = character.ability_mod(Ability::Cha);
    let pb = proficiency_bonus(level);

    let mut hp_max = hit_die() + con_mod;
    for lvl in 2..=level {
        let roll = character.hp.rolls.get(&lvl).copied().unwrap_or(0);
        hp_max += (roll + con_mod).max(1);
    }
    if character.feats.tough {
        hp_max += TOUGH_HP_PER_LEVEL * i32::from(level);
    }

    Ok(DerivedStats {
        level,
        proficiency_bonus: pb,
        con_mod,
        cha_mod,
        hp_max,
        pact_slots_max: prog.pact_slots,
        pact_slot_level: prog.pact_slot_level,
        cantrips_known_max: prog.cantrips,
        spells_known_max: prog.spells_known,
        invocations_known_max: prog.invocations,
        arcanum_unlock: prog.arcanum,
        spell_save_dc: 8 + pb + cha_mod,
        spell_attack: pb + cha_mod,
    })
}
