//! Static catalogs supplied by external collaborators: spells, invocations,
//! patrons, and pact boons.

use serde::{Deserialize, Serialize};

use crate::state::Character;

/// Normalized action timing for a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastingTime {
    Action,
    BonusAction,
    Reaction,
    Special,
}

impl CastingTime {
    /// Normalize a free-form casting-time string from catalog data.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("bonus") {
            Self::BonusAction
        } else if lower.contains("reaction") {
            Self::Reaction
        } else if lower.contains("action") {
            Self::Action
        } else {
            Self::Special
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::BonusAction => "Bonus Action",
            Self::Reaction => "Reaction",
            Self::Special => "Special",
        }
    }
}

/// One spell in the catalog. `level` 0 is a cantrip; 6..=9 are arcanum-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub level: u8,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub casting_time: String,
}

impl Spell {
    #[must_use]
    pub fn timing(&self) -> CastingTime {
        CastingTime::parse(&self.casting_time)
    }

    #[must_use]
    pub const fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    #[must_use]
    pub const fn is_arcanum(&self) -> bool {
        self.level >= 6
    }
}

/// Container for the spell catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SpellCatalog {
    pub spells: Vec<Spell>,
}

impl SpellCatalog {
    /// Empty catalog, useful for tests.
    #[must_use]
    pub const fn empty() -> Self {
        Self { spells: Vec::new() }
    }

    /// Load a spell catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid spell data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Spell> {
        self.spells.iter().find(|s| s.id == id)
    }

    /// All spells of a given level, catalog order.
    pub fn of_level(&self, level: u8) -> impl Iterator<Item = &Spell> {
        self.spells.iter().filter(move |s| s.level == level)
    }
}

/// Prerequisites an invocation may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvocationPrereq {
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub pact: Option<String>,
    #[serde(default)]
    pub spell: Option<String>,
}

/// One eldritch invocation on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub prerequisites: Option<InvocationPrereq>,
}

impl Invocation {
    /// Whether the character satisfies this invocation's prerequisites.
    #[must_use]
    pub fn meets_prerequisites(&self, character: &Character) -> bool {
        let Some(prereqs) = &self.prerequisites else {
            return true;
        };
        if let Some(level) = prereqs.level {
            if character.class.level < level {
                return false;
            }
        }
        if let Some(pact) = &prereqs.pact {
            if character.class.pact_boon.as_deref() != Some(pact.as_str()) {
                return false;
            }
        }
        if let Some(spell) = &prereqs.spell {
            if !character.spells.known.iter().any(|id| id == spell) {
                return false;
            }
        }
        true
    }
}

/// Container for the invocation roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvocationList {
    pub invocations: Vec<Invocation>,
}

impl InvocationList {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            invocations: Vec::new(),
        }
    }

    /// Load an invocation roster from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Invocation> {
        self.invocations.iter().find(|i| i.id == id)
    }
}

/// A patron or pact-boon option on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// Everything the engine loads once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameData {
    #[serde(default)]
    pub spells: SpellCatalog,
    #[serde(default)]
    pub invocations: InvocationList,
    #[serde(default)]
    pub patrons: Vec<ChoiceOption>,
    #[serde(default)]
    pub pact_boons: Vec<ChoiceOption>,
}

impl GameData {
    /// Empty data set, useful for tests.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            spells: SpellCatalog::empty(),
            invocations: InvocationList::empty(),
            patrons: Vec::new(),
            pact_boons: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casting_time_normalization() {
        assert_eq!(CastingTime::parse("1 action"), CastingTime::Action);
        assert_eq!(CastingTime::parse("1 Bonus Action"), CastingTime::BonusAction);
        assert_eq!(CastingTime::parse("1 reaction"), CastingTime::Reaction);
        assert_eq!(CastingTime::parse("10 minutes"), CastingTime::Special);
        assert_eq!(CastingTime::parse(""), CastingTime::Special);
    }

    #[test]
    fn spell_catalog_parses_and_indexes() {
        let json = r#"{"spells":[
            {"id":"eldritch_blast","name":"Eldritch Blast","level":0,"school":"evocation","casting_time":"1 action"},
            {"id":"hex","name":"Hex","level":1,"school":"enchantment","casting_time":"1 bonus action"},
            {"id":"circle_of_death","name":"Circle of Death","level":6}
        ]}"#;
        let catalog = SpellCatalog::from_json(json).unwrap();
        assert_eq!(catalog.spells.len(), 3);
        let hex = catalog.get("hex").unwrap();
        assert_eq!(hex.timing(), CastingTime::BonusAction);
        assert!(catalog.get("eldritch_blast").unwrap().is_cantrip());
        assert!(catalog.get("circle_of_death").unwrap().is_arcanum());
        assert_eq!(catalog.of_level(1).count(), 1);
    }

    #[test]
    fn invocation_prerequisites_check_level_pact_and_spell() {
        let mut c = Character::new();
        c.class.level = 5;
        c.class.pact_boon = Some("tome".to_string());
        c.spells.known.push("hex".to_string());

        let free = Invocation {
            id: "devils_sight".into(),
            name: "Devil's Sight".into(),
            desc: String::new(),
            prerequisites: None,
        };
        assert!(free.meets_prerequisites(&c));

        let gated = Invocation {
            id: "book_of_ancient_secrets".into(),
            name: "Book of Ancient Secrets".into(),
            desc: String::new(),
            prerequisites: Some(InvocationPrereq {
                level: Some(3),
                pact: Some("tome".into()),
                spell: Some("hex".into()),
            }),
        };
        assert!(gated.meets_prerequisites(&c));

        c.class.pact_boon = Some("blade".to_string());
        assert!(!gated.meets_prerequisites(&c));
    }
}
