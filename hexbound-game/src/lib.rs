//! Hexbound Progression Engine
//!
//! Platform-agnostic core for the Hexbound single-character warlock
//! companion. This crate owns progression rules, derived stats, resource
//! spending, and the level-up wizard; rendering and persistence live in
//! platform-specific collaborators behind the traits below.

pub mod actions;
pub mod data;
pub mod derived;
pub mod dice;
pub mod progression;
pub mod state;
pub mod wizard;

// Re-export commonly used types
pub use actions::{
    CastError, CastKind, CastReceipt, can_cast, cast_spell, long_rest, short_rest,
};
pub use data::{
    CastingTime, ChoiceOption, GameData, Invocation, InvocationList, InvocationPrereq, Spell,
    SpellCatalog,
};
pub use derived::{DerivedStats, derive};
pub use dice::HitDieRoller;
pub use progression::{
    ARCANUM_RANKS, MAX_LEVEL, MIN_LEVEL, ProgressionError, ProgressionRow, fixed_hp_gain, hit_die,
    row_for,
};
pub use state::{
    Abilities, Ability, Character, ClassInfo, FeatFlags, HitPoints, Identity, Resources,
    Spellbook, ability_modifier, proficiency_bonus,
};
pub use wizard::{
    CommitRejection, DerivedPreview, LevelUpStep, SessionError, StepData, StepId, StepList,
    WizardSession, plan_steps, validate,
};

/// Trait for abstracting catalog loading.
/// Platform-specific implementations should provide this.
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the spell, invocation, patron, and pact-boon catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog data cannot be loaded.
    fn load_game_data(&self) -> Result<GameData, Self::Error>;
}

/// Trait for abstracting character save/load.
/// Platform-specific implementations should provide this.
pub trait CharacterStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the character of record.
    ///
    /// # Errors
    ///
    /// Returns an error if the character cannot be saved.
    fn save_character(&self, slot: &str, character: &Character) -> Result<(), Self::Error>;

    /// Load a previously saved character.
    ///
    /// # Errors
    ///
    /// Returns an error if the character cannot be loaded.
    fn load_character(&self, slot: &str) -> Result<Option<Character>, Self::Error>;

    /// Delete a saved character.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_character(&self, slot: &str) -> Result<(), Self::Error>;
}

/// Explicit context object owning the character of record.
///
/// Replaces any ambient "current character" global: callers hold one engine,
/// every mutation funnels through it, and a committed level-up replaces the
/// record wholesale.
pub struct CharacterEngine<L, S>
where
    L: DataLoader,
    S: CharacterStorage,
{
    loader: L,
    storage: S,
    data: GameData,
    character: Character,
}

impl<L, S> CharacterEngine<L, S>
where
    L: DataLoader,
    S: CharacterStorage,
{
    /// Create an engine with a fresh character and loaded catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog data cannot be loaded.
    pub fn new(loader: L, storage: S) -> Result<Self, L::Error> {
        let data = loader.load_game_data()?;
        let mut character = Character::new();
        character.push_log("New character created.");
        Ok(Self {
            loader,
            storage,
            data,
            character,
        })
    }

    /// Borrow the loaded catalogs.
    #[must_use]
    pub const fn data(&self) -> &GameData {
        &self.data
    }

    /// Re-fetch the catalogs from the loader.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog data cannot be loaded.
    pub fn reload_data(&mut self) -> Result<(), L::Error> {
        self.data = self.loader.load_game_data()?;
        Ok(())
    }

    /// Borrow the character of record.
    #[must_use]
    pub const fn character(&self) -> &Character {
        &self.character
    }

    /// Replace the character of record with a fresh one.
    pub fn reset_character(&mut self) {
        let mut character = Character::new();
        character.push_log("New character created.");
        self.character = character;
    }

    /// Derived stats for the character of record.
    ///
    /// # Errors
    ///
    /// Propagates the fatal table lookup for a malformed level.
    pub fn derived(&self) -> Result<DerivedStats, ProgressionError> {
        derive(&self.character)
    }

    /// Pre-flight a cast against the character of record.
    ///
    /// # Errors
    ///
    /// See [`can_cast`].
    pub fn can_cast(&self, spell: &Spell) -> Result<CastKind, CastError> {
        can_cast(&self.character, spell)
    }

    /// Cast a spell, spending resources on the character of record.
    ///
    /// # Errors
    ///
    /// See [`cast_spell`]; on error nothing changes.
    pub fn cast(&mut self, spell: &Spell) -> Result<CastReceipt, CastError> {
        cast_spell(&mut self.character, spell)
    }

    /// Resolve a spell id against the catalog and cast it. Returns `None`
    /// for ids the catalog does not know, so the UI can ignore stale buttons.
    pub fn cast_by_id(&mut self, spell_id: &str) -> Option<Result<CastReceipt, CastError>> {
        let spell = self.data.spells.get(spell_id)?.clone();
        Some(cast_spell(&mut self.character, &spell))
    }

    /// Short rest for the character of record.
    ///
    /// # Errors
    ///
    /// Only the fatal table lookup can fail.
    pub fn short_rest(&mut self) -> Result<(), ProgressionError> {
        short_rest(&mut self.character)
    }

    /// Long rest for the character of record.
    ///
    /// # Errors
    ///
    /// Only the fatal table lookup can fail.
    pub fn long_rest(&mut self) -> Result<(), ProgressionError> {
        long_rest(&mut self.character)
    }

    /// Start a level-up session against the character of record.
    ///
    /// # Errors
    ///
    /// See [`WizardSession::begin`].
    pub fn begin_level_up(&self) -> Result<WizardSession, SessionError> {
        WizardSession::begin(&self.character)
    }

    /// Commit a finished session, replacing the character of record.
    ///
    /// # Errors
    ///
    /// Returns the rejection (session included) when problems remain; the
    /// character of record is untouched in that case.
    pub fn commit_level_up(
        &mut self,
        session: WizardSession,
    ) -> Result<&Character, CommitRejection> {
        let committed = session.try_commit()?;
        self.character = committed;
        Ok(&self.character)
    }

    /// Persist the character of record.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage collaborator fails.
    pub fn save(&self, slot: &str) -> Result<(), S::Error> {
        self.storage.save_character(slot, &self.character)
    }

    /// Load a saved character into the engine, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage collaborator fails.
    pub fn load(&mut self, slot: &str) -> Result<bool, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        if let Some(character) = self.storage.load_character(slot).map_err(Into::into)? {
            self.character = character;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
