//! Draft validation: every outstanding problem, collected, never thrown.

use crate::derived::derive;
use crate::progression::{ProgressionError, hit_die};
use crate::state::Character;

/// Level at which the pact boon choice becomes mandatory.
pub const PACT_BOON_LEVEL: u8 = 3;

/// Check a level-up draft against its snapshot.
///
/// Returns every problem as a human-readable string; an empty list means the
/// draft may be committed. Checks are independent and all collected, not
/// short-circuited. Neither argument is mutated.
///
/// # Errors
///
/// Returns `ProgressionError::LevelOutOfRange` if the draft's level falls
/// outside the progression table; that is a programming fault, distinct from
/// the recoverable problem list.
pub fn validate(snapshot: &Character, draft: &Character) -> Result<Vec<String>, ProgressionError> {
    let mut problems = Vec::new();

    let target_level = snapshot.class.level + 1;
    if draft.class.level != target_level {
        problems.push(format!("Target level must be {target_level}."));
    }

    if draft.class.patron.is_none() {
        problems.push("Patron (subclass) must be selected.".to_string());
    }

    if draft.class.level >= PACT_BOON_LEVEL && draft.class.pact_boon.is_none() {
        problems.push(format!(
            "Pact Boon must be selected at level {PACT_BOON_LEVEL} or higher."
        ));
    }

    if draft.class.level >= 2 {
        let level = draft.class.level;
        let die = hit_die();
        match draft.hp.rolls.get(&level) {
            None => problems.push(format!("HP roll missing for level {level}.")),
            Some(&roll) if roll < 1 || roll > die => {
                problems.push(format!("HP roll for level {level} must be between 1 and {die}."));
            }
            Some(_) => {}
        }
    }

    let d = derive(draft)?;

    if draft.spells.cantrips.len() != usize::from(d.cantrips_known_max) {
        problems.push(format!("Cantrips must be exactly {}.", d.cantrips_known_max));
    }
    if draft.spells.known.len() != usize::from(d.spells_known_max) {
        problems.push(format!("Known spells must be exactly {}.", d.spells_known_max));
    }

    if d.invocations_known_max > 0
        && draft.class.invocations.len() != usize::from(d.invocations_known_max)
    {
        problems.push(format!(
            "Invocations must be exactly {}.",
            d.invocations_known_max
        ));
    }

    if let Some(rank) = d.arcanum_unlock {
        if !draft.class.arcanum.contains_key(&rank) {
            problems.push(format!("Mystic Arcanum ({rank}th) must be selected."));
        }
    }

    if draft.hp.current > d.hp_max {
        problems.push("Current HP cannot exceed Max HP.".to_string());
    }
    if draft.hp.current < 0 {
        problems.push("Current HP cannot be negative.".to_string());
    }

    Ok(problems)
}
