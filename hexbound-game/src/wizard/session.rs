//! Wizard session: owns the snapshot/draft pair and the atomic commit.

use thiserror::Error;

use crate::derived::{DerivedStats, derive};
use crate::progression::ProgressionError;
use crate::state::Character;
use crate::wizard::{StepId, StepList, plan_steps, validate};

/// Why a session cannot begin.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("already at the maximum level")]
    AlreadyMaxLevel,
    #[error(transparent)]
    Table(#[from] ProgressionError),
}

/// A commit attempt that bounced off outstanding problems.
///
/// Carries the session back to the caller untouched except for the active
/// step, which is moved to the first non-summary step so the UI lands
/// somewhere actionable.
#[derive(Debug)]
pub struct CommitRejection {
    pub session: WizardSession,
    pub problems: Vec<String>,
}

/// Side-by-side derived stats for the UI's live preview pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedPreview {
    pub snapshot: DerivedStats,
    pub draft: DerivedStats,
}

/// One in-flight level-up. The snapshot is read-only for the session's
/// lifetime; the draft is a full deep copy with its level bumped by one.
/// Dropping the session cancels it with no externally visible effect.
#[derive(Debug, Clone)]
pub struct WizardSession {
    snapshot: Character,
    draft: Character,
    steps: StepList,
    active_step: StepId,
}

impl WizardSession {
    /// Start a level-up session for the given character.
    ///
    /// # Errors
    ///
    /// `SessionError::AlreadyMaxLevel` when no further leveling is possible;
    /// `SessionError::Table` on a malformed level (fatal).
    pub fn begin(character: &Character) -> Result<Self, SessionError> {
        let steps = plan_steps(character)?;
        let Some(first) = steps.first() else {
            return Err(SessionError::AlreadyMaxLevel);
        };
        let active_step = first.id;

        let snapshot = character.clone();
        let mut draft = character.clone();
        draft.class.level = snapshot.class.level + 1;

        Ok(Self {
            snapshot,
            draft,
            steps,
            active_step,
        })
    }

    #[must_use]
    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    #[must_use]
    pub const fn active_step(&self) -> StepId {
        self.active_step
    }

    /// Activate a planned step. Returns false (and changes nothing) when the
    /// step was not planned for this session.
    pub fn select_step(&mut self, id: StepId) -> bool {
        if self.steps.iter().any(|s| s.id == id) {
            self.active_step = id;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Character {
        &self.snapshot
    }

    #[must_use]
    pub const fn draft(&self) -> &Character {
        &self.draft
    }

    /// Mutable access to the draft; step collaborators write here and nowhere
    /// else.
    pub const fn draft_mut(&mut self) -> &mut Character {
        &mut self.draft
    }

    /// Outstanding problems blocking commit; empty means committable.
    ///
    /// # Errors
    ///
    /// Propagates the fatal table lookup, which a well-formed draft never hits.
    pub fn problems(&self) -> Result<Vec<String>, ProgressionError> {
        validate(&self.snapshot, &self.draft)
    }

    /// Derived stats for snapshot and draft side by side, for preview panes.
    ///
    /// # Errors
    ///
    /// Propagates the fatal table lookup, which a well-formed pair never hits.
    pub fn derived_preview(&self) -> Result<DerivedPreview, ProgressionError> {
        Ok(DerivedPreview {
            snapshot: derive(&self.snapshot)?,
            draft: derive(&self.draft)?,
        })
    }

    /// Attempt the atomic commit.
    ///
    /// With zero outstanding problems this consumes the session and returns
    /// the new character of record: current HP and pact slots clamped to the
    /// freshly derived maxima (capped, never raised) and one log entry for
    /// the new level. With outstanding problems the session comes back inside
    /// [`CommitRejection`] with the first non-summary step activated and no
    /// other state changed.
    ///
    /// # Errors
    ///
    /// `Err(CommitRejection)` on outstanding problems. The fatal table path
    /// cannot trigger here: `begin` already planned against the same table.
    pub fn try_commit(mut self) -> Result<Character, CommitRejection> {
        let problems = match self.problems() {
            Ok(problems) => problems,
            Err(fatal) => {
                return Err(CommitRejection {
                    problems: vec![fatal.to_string()],
                    session: self,
                });
            }
        };
        if !problems.is_empty() {
            if let Some(step) = self.steps.iter().find(|s| s.id != StepId::Summary) {
                self.active_step = step.id;
            }
            return Err(CommitRejection {
                session: self,
                problems,
            });
        }

        let mut committed = self.draft;
        // A validated draft always derives; validate just did.
        if let Ok(d) = derive(&committed) {
            committed.hp.current = committed.hp.current.min(d.hp_max);
            committed.resources.pact_slots_current =
                committed.resources.pact_slots_current.min(d.pact_slots_max);
        }
        let level = committed.class.level;
        committed.push_log(format!("Leveled up to {level}."));
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::MAX_LEVEL;

    /// Fill a level-1 -> 2 draft so it passes validation.
    fn complete_draft(session: &mut WizardSession) {
        let draft = session.draft_mut();
        draft.class.patron = Some("fiend".to_string());
        draft.hp.rolls.insert(2, 5);
        draft.spells.cantrips = vec!["eldritch_blast".into(), "mage_hand".into()];
        draft.spells.known = vec!["hex".into(), "armor_of_agathys".into(), "hellish_rebuke".into()];
        draft.class.invocations = vec!["agonizing_blast".into(), "devils_sight".into()];
    }

    #[test]
    fn begin_deep_copies_and_bumps_only_the_level() {
        let character = Character::new();
        let session = WizardSession::begin(&character).unwrap();
        assert_eq!(session.snapshot(), &character);
        assert_eq!(session.draft().class.level, 2);

        let mut expected = character.clone();
        expected.class.level = 2;
        assert_eq!(session.draft(), &expected);
    }

    #[test]
    fn begin_refuses_at_max_level() {
        let mut character = Character::new();
        character.class.level = MAX_LEVEL;
        assert!(matches!(
            WizardSession::begin(&character),
            Err(SessionError::AlreadyMaxLevel)
        ));
    }

    #[test]
    fn draft_writes_never_touch_the_snapshot() {
        let character = Character::new();
        let mut session = WizardSession::begin(&character).unwrap();
        session.draft_mut().hp.rolls.insert(2, 5);
        session.draft_mut().spells.cantrips.push("eldritch_blast".into());
        assert_eq!(session.snapshot(), &character);
    }

    #[test]
    fn step_selection_only_accepts_planned_steps() {
        let character = Character::new();
        let mut session = WizardSession::begin(&character).unwrap();
        assert_eq!(session.active_step(), StepId::Hp);
        assert!(session.select_step(StepId::Spells));
        assert_eq!(session.active_step(), StepId::Spells);
        // Level 2 brings no arcanum step.
        assert!(!session.select_step(StepId::Arcanum));
        assert_eq!(session.active_step(), StepId::Spells);
    }

    #[test]
    fn incomplete_commit_bounces_and_activates_first_step() {
        let character = Character::new();
        let mut session = WizardSession::begin(&character).unwrap();
        session.select_step(StepId::Summary);
        let rejection = session.try_commit().unwrap_err();
        assert!(!rejection.problems.is_empty());
        assert_ne!(rejection.session.active_step(), StepId::Summary);
        // No state transition: the draft is still a bare copy.
        assert_eq!(rejection.session.draft().class.level, 2);
    }

    #[test]
    fn complete_commit_clamps_logs_and_returns_the_new_record() {
        let character = Character::new();
        let mut session = WizardSession::begin(&character).unwrap();
        complete_draft(&mut session);
        let committed = session.try_commit().unwrap();

        assert_eq!(committed.class.level, 2);
        assert_eq!(committed.log.last().unwrap(), "Leveled up to 2.");
        let d = derive(&committed).unwrap();
        assert!(committed.hp.current <= d.hp_max);
        assert!(committed.resources.pact_slots_current <= d.pact_slots_max);
    }

    #[test]
    fn preview_pairs_snapshot_and_draft_derivations() {
        let character = Character::new();
        let mut session = WizardSession::begin(&character).unwrap();
        session.draft_mut().hp.rolls.insert(2, 5);
        let preview = session.derived_preview().unwrap();
        assert_eq!(preview.snapshot.level, 1);
        assert_eq!(preview.draft.level, 2);
        assert_eq!(preview.draft.hp_max - preview.snapshot.hp_max, 7);
        assert_eq!(preview.draft.pact_slots_max, 2);
    }

    #[test]
    fn cancel_is_just_a_drop() {
        let character = Character::new();
        let before = character.clone();
        {
            let mut session = WizardSession::begin(&character).unwrap();
            session.draft_mut().hp.current = 1;
        }
        assert_eq!(character, before);
    }

    #[test]
    fn committed_character_validates_against_its_old_self() {
        let character = Character::new();
        let mut session = WizardSession::begin(&character).unwrap();
        complete_draft(&mut session);
        let committed = session.try_commit().unwrap();
        let problems = validate(&character, &committed).unwrap();
        assert!(problems.is_empty(), "{problems:?}");
    }
}
