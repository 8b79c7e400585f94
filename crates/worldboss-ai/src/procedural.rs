//! Seeded generation of boss modifiers and names.
//!
//! The same archetype and seed always produce the same modifiers.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use worldboss_core::catalog::get_profile;
use worldboss_core::constants::*;
use worldboss_core::enums::BossArchetype;
use worldboss_core::modifiers::{BossModifiers, BossTrait, ProceduralName};

const TITLES: [&str; 12] = [
    "the Elder", "the Grim", "the Undying", "the Accursed", "the Dreaded", "the Merciless",
    "the Fallen", "the Ravenous", "the Hollow", "the Blighted", "the Eternal", "the Forsaken",
];

const ORIGINS: [&str; 12] = [
    "of the Depths", "of the Night", "of the Ashes", "of the Void", "of the Abyss", "of Ruin",
    "of the Wastes", "of the Tomb", "of the Plague", "of the Dusk", "of Chaos", "of Famine",
];

const EPITHETS: [&str; 10] = [
    "the Destroyer", "the Conqueror", "the Annihilator", "the Ravager", "the Reaper",
    "the Devourer", "the Crusher", "the Flayer", "the Tormentor", "the Butcher of Men",
];

const SOULS: [&str; 12] = [
    "Azrael", "Mortis", "Malkor", "Draven", "Scorn", "Blight", "Wraith", "Shade", "Dread",
    "Fang", "Gore", "Decay",
];

const ADJECTIVES: [&str; 10] = [
    "Ancient", "Colossal", "Titanic", "Monstrous", "Nightmarish", "Feral", "Savage",
    "Demonic", "Infernal", "Mythic",
];

const DESIGNATIONS: [&str; 7] = ["Alpha", "Beta", "Gamma", "Delta", "Omega", "Prime", "Apex"];

/// Modifiers for one boss. Reproducible from `seed`.
pub fn generate(archetype: BossArchetype, seed: u64) -> BossModifiers {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let count = rng.gen_range(TRAIT_MIN_COUNT..=TRAIT_MAX_COUNT);
    let traits: Vec<BossTrait> = BossTrait::ALL
        .choose_multiple(&mut rng, count)
        .copied()
        .collect();

    let (mut health, mut damage, mut speed, mut cooldown) = (1.0, 1.0, 1.0, 1.0);
    for t in &traits {
        let p = t.profile();
        health *= p.health_multiplier;
        damage *= p.damage_multiplier;
        speed *= p.speed_multiplier;
        cooldown *= p.cooldown_multiplier;
    }
    let mut vary = |base: f64| base * (1.0 + rng.gen_range(-TRAIT_VARIANCE..=TRAIT_VARIANCE));
    let health_multiplier = vary(health);
    let damage_multiplier = vary(damage);
    let speed_multiplier = vary(speed);
    let cooldown_multiplier = vary(cooldown);
    let scale_multiplier = 1.0 + rng.gen::<f64>();

    let has = |t: BossTrait| traits.contains(&t);
    let regeneration_per_sec = if has(BossTrait::Regenerating) {
        REGEN_MIN_PER_SEC + rng.gen::<f64>() * REGEN_SPREAD_PER_SEC
    } else {
        0.0
    };
    let lifesteal_fraction = if has(BossTrait::Vampiric) {
        LIFESTEAL_MIN + rng.gen::<f64>() * LEECH_SPREAD
    } else {
        0.0
    };
    let thorns_fraction = if has(BossTrait::Thorns) {
        THORNS_MIN + rng.gen::<f64>() * LEECH_SPREAD
    } else {
        0.0
    };

    let name = generate_name(archetype, &traits, &mut rng);

    BossModifiers {
        seed,
        traits,
        name: Some(name),
        health_multiplier,
        damage_multiplier,
        speed_multiplier,
        scale_multiplier,
        cooldown_multiplier,
        regeneration_per_sec,
        lifesteal_fraction,
        thorns_fraction,
    }
}

/// Catalog name without its leading article.
pub fn base_name(archetype: BossArchetype) -> &'static str {
    let name = get_profile(archetype).display_name;
    name.strip_prefix("The ").unwrap_or(name)
}

fn pick<'a>(rng: &mut ChaCha8Rng, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

pub fn generate_name(archetype: BossArchetype, traits: &[BossTrait], rng: &mut ChaCha8Rng) -> ProceduralName {
    let base = base_name(archetype);
    let display_name = match rng.gen_range(0..5) {
        0 => format!("{} {} {}", pick(rng, &ADJECTIVES), base, pick(rng, &ORIGINS)),
        1 => format!("{}, {} {}", pick(rng, &SOULS), pick(rng, &TITLES), base),
        2 => format!("{} {}, {}", base, pick(rng, &TITLES), pick(rng, &EPITHETS)),
        3 => match traits {
            [first, second, ..] => format!(
                "{}, {} and {}",
                base,
                first.profile().name,
                second.profile().name
            ),
            _ => format!("{} {}", base, pick(rng, &ORIGINS)),
        },
        _ => format!(
            "{} {}-{}",
            base,
            pick(rng, &DESIGNATIONS),
            rng.gen_range(1..100)
        ),
    };
    ProceduralName {
        title_name: display_name.to_uppercase(),
        display_name,
    }
}
