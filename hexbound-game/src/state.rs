//! The character of record and its sub-records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::derived::derive;
use crate::progression::{ARCANUM_RANKS, MAX_LEVEL, hit_die};

/// Persisted layout version.
pub const CHARACTER_VERSION: u32 = 1;

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Self; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Con => "con",
            Self::Int => "int",
            Self::Wis => "wis",
            Self::Cha => "cha",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" => Ok(Self::Str),
            "dex" => Ok(Self::Dex),
            "con" => Ok(Self::Con),
            "int" => Ok(Self::Int),
            "wis" => Ok(Self::Wis),
            "cha" => Ok(Self::Cha),
            _ => Err(()),
        }
    }
}

/// Standard 5e ability modifier, floored for scores below 10.
#[must_use]
pub const fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Proficiency bonus step function over character level.
#[must_use]
pub const fn proficiency_bonus(level: u8) -> i32 {
    match level {
        0..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        _ => 6,
    }
}

/// Name and race; purely descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub race: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            name: "New Warlock".to_string(),
            race: "Human".to_string(),
        }
    }
}

/// Class-level choices: patron, pact boon, invocations, arcanum picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClassInfo {
    pub level: u8,
    #[serde(default)]
    pub patron: Option<String>,
    #[serde(default)]
    pub pact_boon: Option<String>,
    #[serde(default)]
    pub invocations: Vec<String>,
    /// Chosen Mystic Arcanum spell per rank (6..=9); absent rank = no pick yet.
    #[serde(default)]
    pub arcanum: BTreeMap<u8, String>,
}

/// The six raw ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl Abilities {
    #[must_use]
    pub const fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    #[must_use]
    pub const fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.score(ability))
    }
}

impl Default for Abilities {
    /// Standard-array spread for a new warlock.
    fn default() -> Self {
        Self {
            str: 8,
            dex: 14,
            con: 14,
            int: 10,
            wis: 10,
            cha: 16,
        }
    }
}

/// Feat flags that feed derived stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeatFlags {
    #[serde(default)]
    pub tough: bool,
}

/// Hit point state. Max HP is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HitPoints {
    pub current: i32,
    /// Per-level hit die rolls for levels 2..=N, so max HP recomputes cleanly.
    #[serde(default)]
    pub rolls: BTreeMap<u8, i32>,
}

/// Spendable resource state. Maxima are derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Resources {
    pub pact_slots_current: u8,
    /// Per-rank "used since last long rest" flag for Mystic Arcanum.
    #[serde(default)]
    pub arcanum_used: BTreeMap<u8, bool>,
}

/// Spell selections: cantrip ids and leveled (1..=5) spell ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Spellbook {
    #[serde(default)]
    pub cantrips: Vec<String>,
    #[serde(default)]
    pub known: Vec<String>,
}

/// The sole persistent entity: one warlock.
///
/// Mutation funnels through [`crate::actions`] (casting, resting) or a wizard
/// session commit (leveling); every write path leaves the record internally
/// consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default = "default_version")]
    pub version: u32,
    pub identity: Identity,
    pub class: ClassInfo,
    pub abilities: Abilities,
    #[serde(default)]
    pub feats: FeatFlags,
    pub hp: HitPoints,
    pub resources: Resources,
    pub spells: Spellbook,
    /// Append-only activity log rendered by the UI collaborator.
    #[serde(default)]
    pub log: Vec<String>,
}

const fn default_version() -> u32 {
    CHARACTER_VERSION
}

impl Character {
    /// A fresh level-1 warlock with current HP and slots at their derived
    /// maxima.
    #[must_use]
    pub fn new() -> Self {
        let mut character = Self {
            version: CHARACTER_VERSION,
            identity: Identity::default(),
            class: ClassInfo {
                level: 1,
                ..ClassInfo::default()
            },
            abilities: Abilities::default(),
            feats: FeatFlags::default(),
            hp: HitPoints {
                current: hit_die() + ability_modifier(14),
                rolls: BTreeMap::new(),
            },
            resources: Resources {
                pact_slots_current: 1,
                arcanum_used: ARCANUM_RANKS.iter().map(|&rank| (rank, false)).collect(),
            },
            spells: Spellbook::default(),
            log: Vec::new(),
        };
        // Level 1 is always in the table, so this cannot fail.
        if let Ok(d) = derive(&character) {
            character.hp.current = d.hp_max;
            character.resources.pact_slots_current = d.pact_slots_max;
        }
        character
    }

    /// Whether the character can level no further. Derived, never stored.
    #[must_use]
    pub const fn at_max_level(&self) -> bool {
        self.class.level >= MAX_LEVEL
    }

    #[must_use]
    pub const fn ability_mod(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    #[must_use]
    pub const fn proficiency_bonus(&self) -> i32 {
        proficiency_bonus(self.class.level)
    }

    /// Whether the arcanum pick for `rank` has been spent since the last long
    /// rest. Missing entries read as unspent.
    #[must_use]
    pub fn arcanum_used(&self, rank: u8) -> bool {
        self.resources.arcanum_used.get(&rank).copied().unwrap_or(false)
    }

    /// Set current HP clamped into `0..=max`.
    pub fn set_hp_clamped(&mut self, value: i32, max: i32) {
        self.hp.current = value.clamp(0, max);
    }

    /// Set current pact slots clamped into `0..=max`.
    pub fn set_slots_clamped(&mut self, value: u8, max: u8) {
        self.resources.pact_slots_current = value.min(max);
    }

    /// Append one entry to the activity log.
    pub fn push_log(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}
