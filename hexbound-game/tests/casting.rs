use hexbound_game::{
    CastError, CastKind, Character, Spell, can_cast, cast_spell, derive, long_rest, short_rest,
};

fn spell(id: &str, level: u8) -> Spell {
    Spell {
        id: id.to_string(),
        name: id.to_string(),
        level,
        school: String::new(),
        casting_time: "1 action".to_string(),
    }
}

/// Character at a given level with full pool and all arcanum ranks picked.
fn warlock_at(level: u8) -> Character {
    let mut c = Character::new();
    c.class.level = level;
    let d = derive(&c).unwrap();
    c.resources.pact_slots_current = d.pact_slots_max;
    c.hp.current = d.hp_max;
    for rank in hexbound_game::ARCANUM_RANKS {
        c.class.arcanum.insert(rank, format!("arcanum_{rank}"));
    }
    c
}

#[test]
fn pool_spends_down_one_at_a_time_then_denies() {
    let mut c = warlock_at(5); // 2 slots, cap 3
    assert_eq!(c.resources.pact_slots_current, 2);

    cast_spell(&mut c, &spell("hunger_of_hadar", 3)).unwrap();
    assert_eq!(c.resources.pact_slots_current, 1);
    cast_spell(&mut c, &spell("hex", 1)).unwrap();
    assert_eq!(c.resources.pact_slots_current, 0);

    let before = c.clone();
    assert_eq!(
        cast_spell(&mut c, &spell("hex", 1)).unwrap_err(),
        CastError::NoPactSlots
    );
    assert_eq!(c, before, "denied cast must not mutate");
}

#[test]
fn preflight_matches_perform_for_every_rank() {
    let mut c = warlock_at(17); // cap 5, 4 slots, all arcanum picked
    for rank in 0..=9 {
        let s = spell(&format!("arcanum_{rank}"), rank);
        let check = can_cast(&c, &s);
        let outcome = cast_spell(&mut c, &s);
        assert_eq!(check.is_ok(), outcome.is_ok(), "rank {rank} diverged");
    }
}

#[test]
fn slot_level_cap_follows_the_table() {
    let c = warlock_at(3); // cap 2
    assert_eq!(can_cast(&c, &spell("shatter", 2)).unwrap(), CastKind::Pact);
    assert_eq!(
        can_cast(&c, &spell("fly", 3)).unwrap_err(),
        CastError::SlotLevelTooHigh {
            requested: 3,
            cap: 2
        }
    );
}

#[test]
fn arcanum_once_per_long_rest() {
    let mut c = warlock_at(13); // ranks 6 and 7 reachable
    let finger = spell("arcanum_7", 7);

    cast_spell(&mut c, &finger).unwrap();
    assert_eq!(
        cast_spell(&mut c, &finger).unwrap_err(),
        CastError::ArcanumAlreadyUsed { rank: 7 }
    );

    long_rest(&mut c).unwrap();
    assert_eq!(cast_spell(&mut c, &finger).unwrap().kind, CastKind::Arcanum);
}

#[test]
fn wrong_arcanum_pick_is_denied() {
    let mut c = warlock_at(11);
    c.class.arcanum.insert(6, "circle_of_death".to_string());
    assert_eq!(
        can_cast(&c, &spell("create_undead", 6)).unwrap_err(),
        CastError::NotYourArcanum { rank: 6 }
    );
}

#[test]
fn long_rest_resets_regardless_of_prior_state() {
    let mut c = warlock_at(17);
    for rank in hexbound_game::ARCANUM_RANKS {
        c.resources.arcanum_used.insert(rank, true);
    }
    c.resources.pact_slots_current = 0;
    c.hp.current = 3;

    long_rest(&mut c).unwrap();

    let d = derive(&c).unwrap();
    assert_eq!(c.resources.pact_slots_current, d.pact_slots_max);
    assert_eq!(c.hp.current, d.hp_max);
    for rank in hexbound_game::ARCANUM_RANKS {
        assert!(!c.arcanum_used(rank));
    }
}

#[test]
fn short_rest_restores_the_pool_but_not_arcanum() {
    let mut c = warlock_at(11);
    cast_spell(&mut c, &spell("arcanum_6", 6)).unwrap();
    c.resources.pact_slots_current = 0;

    short_rest(&mut c).unwrap();

    let d = derive(&c).unwrap();
    assert_eq!(c.resources.pact_slots_current, d.pact_slots_max);
    assert!(c.arcanum_used(6), "short rest must not reset arcanum");
}

#[test]
fn casts_append_to_the_activity_log() {
    let mut c = warlock_at(5);
    let before = c.log.len();
    cast_spell(&mut c, &spell("eldritch_blast", 0)).unwrap();
    cast_spell(&mut c, &spell("hex", 1)).unwrap();
    assert_eq!(c.log.len(), before + 2);
    assert!(c.log.last().unwrap().contains("1/2"), "{:?}", c.log.last());
}
