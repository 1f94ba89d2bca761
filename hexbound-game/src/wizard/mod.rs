//! Level-up wizard: step planning, draft validation, and the session state
//! machine that makes a multi-step level-up atomic.

pub mod session;
pub mod validate;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::progression::{ProgressionError, fixed_hp_gain, hit_die, row_for};
use crate::state::Character;

pub use session::{CommitRejection, DerivedPreview, SessionError, WizardSession};
pub use validate::validate;

/// Identifier for a wizard step. One variant per kind of mandatory decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Hp,
    Patron,
    PactBoon,
    Spells,
    Invocations,
    Arcanum,
    Asi,
    Summary,
}

impl StepId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Patron => "patron",
            Self::PactBoon => "pact_boon",
            Self::Spells => "spells",
            Self::Invocations => "invocations",
            Self::Arcanum => "arcanum",
            Self::Asi => "asi",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hp" => Ok(Self::Hp),
            "patron" => Ok(Self::Patron),
            "pact_boon" => Ok(Self::PactBoon),
            "spells" => Ok(Self::Spells),
            "invocations" => Ok(Self::Invocations),
            "arcanum" => Ok(Self::Arcanum),
            "asi" => Ok(Self::Asi),
            "summary" => Ok(Self::Summary),
            _ => Err(()),
        }
    }
}

/// Payload a step's rendering collaborator needs, tagged per step so the UI
/// matches exhaustively instead of probing an untyped bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepData {
    Hp {
        hit_die: i32,
        fixed: i32,
        from_level: u8,
        to_level: u8,
    },
    Patron,
    PactBoon,
    Spells {
        to_level: u8,
        cantrips_target: u8,
        spells_target: u8,
        pact_slot_level_cap: u8,
    },
    Invocations {
        to_level: u8,
        invocations_target: u8,
    },
    Arcanum {
        rank: u8,
    },
    Asi,
    Summary {
        from_level: u8,
        to_level: u8,
    },
}

/// One mandatory decision in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpStep {
    pub id: StepId,
    pub title: String,
    /// Every planned step is mandatory; kept explicit for the UI.
    pub required: bool,
    pub data: StepData,
}

impl LevelUpStep {
    fn new(id: StepId, title: impl Into<String>, data: StepData) -> Self {
        Self {
            id,
            title: title.into(),
            required: true,
            data,
        }
    }
}

/// Ordered step list; never more than eight steps.
pub type StepList = SmallVec<[LevelUpStep; 8]>;

/// Plan the mandatory steps for leveling `snapshot` to the next level.
///
/// Empty when the snapshot is already at the maximum level. Ordering is
/// fixed and stable for a given snapshot: HP, then patron / pact boon if
/// still unchosen, spells, invocations, arcanum, ASI as the target level
/// gates them, and a terminal summary.
///
/// # Errors
///
/// Returns `ProgressionError::LevelOutOfRange` only on malformed input; any
/// level in 1..=20 plans cleanly.
pub fn plan_steps(snapshot: &Character) -> Result<StepList, ProgressionError> {
    let from_level = snapshot.class.level;
    if snapshot.at_max_level() {
        return Ok(StepList::new());
    }

    let to_level = from_level + 1;
    let prog = row_for(to_level)?;
    let mut steps = StepList::new();

    steps.push(LevelUpStep::new(
        StepId::Hp,
        "HP Increase",
        StepData::Hp {
            hit_die: hit_die(),
            fixed: fixed_hp_gain(),
            from_level,
            to_level,
        },
    ));

    if snapshot.class.patron.is_none() {
        steps.push(LevelUpStep::new(
            StepId::Patron,
            "Choose Patron",
            StepData::Patron,
        ));
    }

    if to_level >= validate::PACT_BOON_LEVEL && snapshot.class.pact_boon.is_none() {
        steps.push(LevelUpStep::new(
            StepId::PactBoon,
            "Choose Pact Boon",
            StepData::PactBoon,
        ));
    }

    steps.push(LevelUpStep::new(
        StepId::Spells,
        "Spells and Cantrips",
        StepData::Spells {
            to_level,
            cantrips_target: prog.cantrips,
            spells_target: prog.spells_known,
            pact_slot_level_cap: prog.pact_slot_level,
        },
    ));

    if prog.invocations > 0 {
        steps.push(LevelUpStep::new(
            StepId::Invocations,
            "Eldritch Invocations",
            StepData::Invocations {
                to_level,
                invocations_target: prog.invocations,
            },
        ));
    }

    if let Some(rank) = prog.arcanum {
        steps.push(LevelUpStep::new(
            StepId::Arcanum,
            format!("Mystic Arcanum ({rank}th)"),
            StepData::Arcanum { rank },
        ));
    }

    if prog.asi {
        steps.push(LevelUpStep::new(StepId::Asi, "ASI or Feat", StepData::Asi));
    }

    steps.push(LevelUpStep::new(
        StepId::Summary,
        "Summary and Confirm",
        StepData::Summary {
            from_level,
            to_level,
        },
    ));

    Ok(steps)
}
