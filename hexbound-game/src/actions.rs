//! Resource-spending actions: casting spells and resting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Spell;
use crate::derived::derive;
use crate::progression::{ARCANUM_RANKS, ProgressionError};
use crate::state::Character;

/// How a cast is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastKind {
    /// Level 0, costs nothing.
    Cantrip,
    /// Levels 1..=5, spends one pact slot.
    Pact,
    /// Levels 6..=9, spends the once-per-long-rest arcanum use.
    Arcanum,
}

/// Receipt for a successful cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastReceipt {
    pub kind: CastKind,
    /// Pact slots remaining after the cast, when a slot was spent.
    pub slots_remaining: Option<u8>,
}

/// Why a cast is disallowed. These are ordinary control-flow outcomes a UI
/// surfaces verbatim; `Table` wraps the fatal out-of-range path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CastError {
    #[error("Not your Arcanum spell.")]
    NotYourArcanum { rank: u8 },
    #[error("Arcanum already used (long rest).")]
    ArcanumAlreadyUsed { rank: u8 },
    #[error("Slot level is {cap}.")]
    SlotLevelTooHigh { requested: u8, cap: u8 },
    #[error("No Pact slots remaining.")]
    NoPactSlots,
    #[error(transparent)]
    Table(#[from] ProgressionError),
}

/// Pre-flight a cast without side effects.
///
/// # Errors
///
/// Returns the `CastError` describing the unmet precondition, or
/// `CastError::Table` if the character's level is out of range (fatal).
pub fn can_cast(character: &Character, spell: &Spell) -> Result<CastKind, CastError> {
    let d = derive(character)?;

    if spell.is_arcanum() {
        let rank = spell.level;
        let picked = character.class.arcanum.get(&rank);
        if picked.map(String::as_str) != Some(spell.id.as_str()) {
            return Err(CastError::NotYourArcanum { rank });
        }
        if character.arcanum_used(rank) {
            return Err(CastError::ArcanumAlreadyUsed { rank });
        }
        return Ok(CastKind::Arcanum);
    }

    if spell.is_cantrip() {
        return Ok(CastKind::Cantrip);
    }

    if spell.level > d.pact_slot_level {
        return Err(CastError::SlotLevelTooHigh {
            requested: spell.level,
            cap: d.pact_slot_level,
        });
    }
    if character.resources.pact_slots_current == 0 {
        return Err(CastError::NoPactSlots);
    }
    Ok(CastKind::Pact)
}

/// Cast a spell, spending resources and logging. The precondition check and
/// the mutation are separable: this calls [`can_cast`] first and touches the
/// character only when every precondition holds.
///
/// # Errors
///
/// Same conditions as [`can_cast`]; on error the character is unchanged.
pub fn cast_spell(character: &mut Character, spell: &Spell) -> Result<CastReceipt, CastError> {
    let kind = can_cast(character, spell)?;
    let d = derive(character)?;

    match kind {
        CastKind::Pact => {
            character.resources.pact_slots_current =
                character.resources.pact_slots_current.saturating_sub(1);
            let remaining = character.resources.pact_slots_current;
            character.push_log(format!(
                "Cast {} (spent 1 Pact slot, {}/{}).",
                spell.name, remaining, d.pact_slots_max
            ));
            Ok(CastReceipt {
                kind,
                slots_remaining: Some(remaining),
            })
        }
        CastKind::Arcanum => {
            let rank = spell.level;
            character.resources.arcanum_used.insert(rank, true);
            character.push_log(format!("Cast {} (Mystic Arcanum {rank}th, used).", spell.name));
            Ok(CastReceipt {
                kind,
                slots_remaining: None,
            })
        }
        CastKind::Cantrip => {
            character.push_log(format!("Cast {}.", spell.name));
            Ok(CastReceipt {
                kind,
                slots_remaining: None,
            })
        }
    }
}

/// Short rest: restore the pact-slot pool to its derived maximum.
///
/// # Errors
///
/// Only the fatal table lookup can fail; a well-formed character always rests.
pub fn short_rest(character: &mut Character) -> Result<(), ProgressionError> {
    let d = derive(character)?;
    character.resources.pact_slots_current = d.pact_slots_max;
    character.push_log("Short Rest: Pact slots restored.");
    Ok(())
}

/// Long rest: restore the pool, clear every arcanum use, heal to full.
///
/// # Errors
///
/// Only the fatal table lookup can fail; a well-formed character always rests.
pub fn long_rest(character: &mut Character) -> Result<(), ProgressionError> {
    let d = derive(character)?;
    character.resources.pact_slots_current = d.pact_slots_max;
    for rank in ARCANUM_RANKS {
        character.resources.arcanum_used.insert(rank, false);
    }
    character.hp.current = d.hp_max;
    character.push_log("Long Rest: HP restored, Pact slots restored, Arcanum reset.");
    Ok(())
}
