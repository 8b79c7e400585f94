#[cfg(test)]
mod tests {
    use worldboss_core::constants::*;
    use worldboss_core::enums::{BossArchetype, StatusEffectKind};
    use worldboss_core::modifiers::{BossModifiers, BossTrait};
    use worldboss_core::types::{PlayerId, Position};

    use crate::procedural;
    use crate::strategy::{
        strategy_for, AbilityEffect, BehaviorState, BossView, DamageTaken, PlayerView,
    };
    use crate::traits;

    fn make_player(x: f64, y: f64) -> PlayerView {
        let position = Position::new(x, y, 64.0);
        PlayerView {
            id: PlayerId::new(),
            position,
            heading: 0.0,
            distance: position.range_to(&Position::new(0.0, 0.0, 64.0)),
            slowed: false,
        }
    }

    fn make_view<'a>(archetype: BossArchetype, tick: u64, players: &'a [PlayerView]) -> BossView<'a> {
        BossView {
            archetype,
            zone: 10,
            tick,
            position: Position::new(0.0, 0.0, 64.0),
            health: 1000.0,
            max_health: 1000.0,
            live_minions: 0,
            players,
            roll: 0.0,
        }
    }

    fn damage_to(effects: &[AbilityEffect], player: PlayerId) -> f64 {
        effects
            .iter()
            .map(|e| match e {
                AbilityEffect::DamagePlayer { player: p, amount } if *p == player => *amount,
                _ => 0.0,
            })
            .sum()
    }

    // ---- Strategy table ----

    #[test]
    fn test_default_hooks_are_noops() {
        let players = [make_player(3.0, 0.0)];
        let view = make_view(BossArchetype::TheButcher, 0, &players);
        let state = BehaviorState::initial(BossArchetype::TheButcher, 0);
        let strategy = strategy_for(BossArchetype::TheButcher);

        let pulse = (strategy.pulse)(&view, &state);
        assert_eq!(pulse.state, state);
        assert!(pulse.effects.is_empty());

        let hit = DamageTaken {
            attacker: players[0].id,
            amount: 50.0,
        };
        let reaction = (strategy.on_damage_received)(&view, &state, &hit);
        assert!(reaction.effects.is_empty());
        assert!((strategy.can_receive_damage)(&state));
    }

    #[test]
    fn test_mismatched_state_is_left_alone() {
        let players = [make_player(3.0, 0.0)];
        let view = make_view(BossArchetype::ShadowUnstable, 0, &players);
        let wrong = BehaviorState::initial(BossArchetype::Pyromancer, 0);
        let update = (strategy_for(BossArchetype::ShadowUnstable).ability)(&view, &wrong);
        assert_eq!(update.state, wrong);
        assert!(update.effects.is_empty());
    }

    // ---- The Butcher ----

    #[test]
    fn test_butcher_hook_pulls_only_players_in_range() {
        let near = make_player(10.0, 0.0);
        let far = make_player(20.0, 0.0);
        let players = [near, far];
        let view = make_view(BossArchetype::TheButcher, 300, &players);
        let state = BehaviorState::initial(BossArchetype::TheButcher, 0);

        let update = (strategy_for(BossArchetype::TheButcher).ability)(&view, &state);

        let launch = update.effects.iter().find_map(|e| match e {
            AbilityEffect::Launch { player, velocity } if *player == near.id => Some(*velocity),
            _ => None,
        });
        let velocity = launch.expect("near player should be hooked");
        assert!(velocity.x < 0.0, "pull should point toward the boss");
        assert!((velocity.x.abs() - BUTCHER_HOOK_STRENGTH).abs() < 1e-9);
        assert!((velocity.z - BUTCHER_HOOK_LIFT).abs() < 1e-9);
        assert!(update.effects.iter().any(|e| matches!(
            e,
            AbilityEffect::ApplyStatus { player, kind: StatusEffectKind::Slowness, .. } if *player == near.id
        )));
        assert!(
            !update.effects.iter().any(|e| matches!(
                e,
                AbilityEffect::Launch { player, .. } if *player == far.id
            )),
            "player outside hook radius must not be pulled"
        );
    }

    #[test]
    fn test_butcher_resistance_every_five_hits_capped() {
        let players = [make_player(2.0, 0.0)];
        let view = make_view(BossArchetype::TheButcher, 0, &players);
        let strategy = strategy_for(BossArchetype::TheButcher);
        let mut state = BehaviorState::initial(BossArchetype::TheButcher, 0);
        let mut levels = Vec::new();

        for _ in 0..30 {
            let update = (strategy.on_attack_landed)(&view, &state, players[0].id);
            for effect in &update.effects {
                if let AbilityEffect::SetResistance { level } = effect {
                    levels.push(*level);
                }
            }
            state = update.state;
        }

        assert_eq!(levels, vec![1, 2, 3, 4]);
        assert_eq!(
            (strategy.bar_status)(&view, &state).as_deref(),
            Some("[Resistance: 4]")
        );
    }

    // ---- The Unstable Shadow ----

    #[test]
    fn test_shadow_vanish_then_strike_from_behind() {
        let mut target = make_player(0.0, 10.0);
        target.heading = 0.0; // facing North
        let players = [target];
        let strategy = strategy_for(BossArchetype::ShadowUnstable);
        let state = BehaviorState::initial(BossArchetype::ShadowUnstable, 0);

        let view = make_view(BossArchetype::ShadowUnstable, 100, &players);
        let vanished = (strategy.ability)(&view, &state);
        assert!(vanished.effects.contains(&AbilityEffect::SetInvisible(true)));
        assert_eq!(
            (strategy.bar_status)(&view, &vanished.state).as_deref(),
            Some("[INVISIBLE]")
        );

        // Firing again while invisible does nothing.
        let again = (strategy.ability)(&view, &vanished.state);
        assert!(again.effects.is_empty());

        // Not yet time to reappear.
        let early = make_view(BossArchetype::ShadowUnstable, 100 + SHADOW_INVISIBLE_TICKS - 1, &players);
        assert!((strategy.pulse)(&early, &vanished.state).effects.is_empty());

        let due = make_view(BossArchetype::ShadowUnstable, 100 + SHADOW_INVISIBLE_TICKS, &players);
        let strike = (strategy.pulse)(&due, &vanished.state);
        assert!(strike.effects.contains(&AbilityEffect::SetInvisible(false)));
        let teleport = strike.effects.iter().find_map(|e| match e {
            AbilityEffect::Teleport { x, y } => Some((*x, *y)),
            _ => None,
        });
        let (x, y) = teleport.expect("should teleport behind the target");
        assert!(x.abs() < 1e-9);
        assert!((y - (10.0 - SHADOW_TELEPORT_DISTANCE)).abs() < 1e-9);
        let expected = SHADOW_SURPRISE_BASE + 10.0 * SHADOW_SURPRISE_PER_ZONE;
        assert!((damage_to(&strike.effects, target.id) - expected).abs() < 1e-9);
        assert_eq!(strike.state, state);
    }

    #[test]
    fn test_shadow_with_no_one_nearby_stays_visible() {
        let players = [make_player(100.0, 0.0)];
        let view = make_view(BossArchetype::ShadowUnstable, 0, &players);
        let state = BehaviorState::initial(BossArchetype::ShadowUnstable, 0);
        let update = (strategy_for(BossArchetype::ShadowUnstable).ability)(&view, &state);
        assert!(update.effects.is_empty());
        assert_eq!(update.state, state);
    }

    #[test]
    fn test_shadow_reappears_in_place_when_target_left() {
        let target = make_player(0.0, 10.0);
        let strategy = strategy_for(BossArchetype::ShadowUnstable);
        let state = BehaviorState::initial(BossArchetype::ShadowUnstable, 0);
        let vanished = (strategy.ability)(
            &make_view(BossArchetype::ShadowUnstable, 0, &[target]),
            &state,
        );

        let due = make_view(BossArchetype::ShadowUnstable, SHADOW_INVISIBLE_TICKS, &[]);
        let update = (strategy.pulse)(&due, &vanished.state);
        assert!(update.effects.contains(&AbilityEffect::SetInvisible(false)));
        assert!(!update
            .effects
            .iter()
            .any(|e| matches!(e, AbilityEffect::Teleport { .. })));
    }

    // ---- The Zombie Pyromancer ----

    #[test]
    fn test_pyromancer_circle_cap() {
        let strategy = strategy_for(BossArchetype::Pyromancer);
        let mut state = BehaviorState::initial(BossArchetype::Pyromancer, 0);
        for tick in 0..5 {
            let view = make_view(BossArchetype::Pyromancer, tick, &[]);
            state = (strategy.ability)(&view, &state).state;
        }
        let BehaviorState::Pyromancer { circles } = &state else {
            panic!("wrong state variant");
        };
        assert_eq!(circles.len(), PYRO_MAX_CIRCLES);
    }

    #[test]
    fn test_pyromancer_circle_burns_and_heals_then_expires() {
        let inside = make_player(2.0, 0.0);
        let outside = make_player(9.0, 0.0);
        let players = [inside, outside];
        let strategy = strategy_for(BossArchetype::Pyromancer);
        let state = BehaviorState::initial(BossArchetype::Pyromancer, 0);

        let mut state = (strategy.ability)(&make_view(BossArchetype::Pyromancer, 0, &players), &state).state;

        let mut pulses = 0;
        let mut healed = 0.0;
        for tick in 1..=PYRO_CIRCLE_TICKS + 5 {
            let update = (strategy.pulse)(&make_view(BossArchetype::Pyromancer, tick, &players), &state);
            if damage_to(&update.effects, inside.id) > 0.0 {
                pulses += 1;
            }
            assert_eq!(damage_to(&update.effects, outside.id), 0.0);
            for effect in &update.effects {
                if let AbilityEffect::HealSelf { amount } = effect {
                    healed += amount;
                }
            }
            state = update.state;
        }

        assert_eq!(pulses, 19, "one pulse every 10 ticks over a 200 tick lifetime");
        assert!((healed - 19.0 * PYRO_HEAL_PER_PLAYER).abs() < 1e-9);
        let BehaviorState::Pyromancer { circles } = &state else {
            panic!("wrong state variant");
        };
        assert!(circles.is_empty(), "circle should have expired");
    }

    // ---- The Horde Queen ----

    #[test]
    fn test_queen_summons_once_per_threshold() {
        let attacker = make_player(3.0, 0.0);
        let players = [attacker];
        let strategy = strategy_for(BossArchetype::HordeQueen);
        let mut state = BehaviorState::initial(BossArchetype::HordeQueen, 0);
        let hit = DamageTaken {
            attacker: attacker.id,
            amount: 10.0,
        };

        let mut view = make_view(BossArchetype::HordeQueen, 0, &players);
        view.health = 800.0;
        let update = (strategy.on_damage_received)(&view, &state, &hit);
        assert!(update.effects.is_empty(), "above 75% nothing happens");
        state = update.state;

        view.health = 740.0;
        let update = (strategy.on_damage_received)(&view, &state, &hit);
        let summon = update.effects.iter().find_map(|e| match e {
            AbilityEffect::SummonMinions { count, health, damage } => Some((*count, *health, *damage)),
            _ => None,
        });
        let (count, health, damage) = summon.expect("crossing 75% should summon");
        assert_eq!(count, QUEEN_MINIONS_PER_WAVE);
        assert!((health - 70.0).abs() < 1e-9);
        assert!((damage - 11.0).abs() < 1e-9);
        state = update.state;
        assert!(!(strategy.can_receive_damage)(&state));

        // While invincible, hits only produce feedback.
        let blocked = (strategy.on_damage_received)(&view, &state, &DamageTaken { attacker: attacker.id, amount: 0.0 });
        assert!(matches!(
            blocked.effects.as_slice(),
            [AbilityEffect::Message { player, .. }] if *player == attacker.id
        ));

        // Minions alive: still invincible.
        view.live_minions = 3;
        state = (strategy.pulse)(&view, &state).state;
        assert!(!(strategy.can_receive_damage)(&state));
        assert_eq!(
            (strategy.bar_status)(&view, &state).as_deref(),
            Some("[INVINCIBLE - 3 minions]")
        );

        view.live_minions = 0;
        state = (strategy.pulse)(&view, &state).state;
        assert!((strategy.can_receive_damage)(&state));

        // Same threshold does not fire twice.
        view.health = 700.0;
        let update = (strategy.on_damage_received)(&view, &state, &hit);
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_queen_one_wave_per_hit_even_if_two_thresholds_crossed() {
        let players = [make_player(3.0, 0.0)];
        let strategy = strategy_for(BossArchetype::HordeQueen);
        let state = BehaviorState::initial(BossArchetype::HordeQueen, 0);
        let mut view = make_view(BossArchetype::HordeQueen, 0, &players);
        view.health = 400.0;

        let update = (strategy.on_damage_received)(
            &view,
            &state,
            &DamageTaken {
                attacker: players[0].id,
                amount: 600.0,
            },
        );
        let BehaviorState::HordeQueen {
            thresholds_triggered,
            invincible,
        } = update.state
        else {
            panic!("wrong state variant");
        };
        assert_eq!(thresholds_triggered, [true, false, false]);
        assert!(invincible);
    }

    #[test]
    fn test_queen_aura_buffs_minions_on_a_low_roll() {
        let strategy = strategy_for(BossArchetype::HordeQueen);
        let state = BehaviorState::HordeQueen {
            thresholds_triggered: [true, false, false],
            invincible: true,
        };
        let mut view = make_view(BossArchetype::HordeQueen, 0, &[]);
        view.live_minions = 2;

        view.roll = 0.05;
        let update = (strategy.pulse)(&view, &state);
        assert_eq!(update.state, state);
        assert_eq!(
            update.effects,
            vec![AbilityEffect::BuffMinions {
                horizontal: QUEEN_AURA_HORIZONTAL,
                vertical: QUEEN_AURA_VERTICAL,
                heal_fraction: QUEEN_AURA_HEAL_FRACTION,
                speed_ticks: QUEEN_AURA_SPEED_TICKS,
            }]
        );

        view.roll = 0.5;
        assert!((strategy.pulse)(&view, &state).effects.is_empty());

        // No minions, no aura; the pulse ends invincibility instead.
        view.roll = 0.05;
        view.live_minions = 0;
        let update = (strategy.pulse)(&view, &state);
        assert!(!update.effects.iter().any(|e| matches!(e, AbilityEffect::BuffMinions { .. })));
        assert!((strategy.can_receive_damage)(&update.state));
    }

    // ---- The Ice Breaker ----

    #[test]
    fn test_ice_breaker_freeze_pulse_hits_freeze_radius() {
        let near = make_player(8.0, 0.0);
        let far = make_player(12.0, 0.0);
        let players = [near, far];
        let view = make_view(BossArchetype::IceBreaker, 160, &players);
        let state = BehaviorState::initial(BossArchetype::IceBreaker, 0);

        let update = (strategy_for(BossArchetype::IceBreaker).ability)(&view, &state);
        assert!(update.effects.contains(&AbilityEffect::ApplyStatus {
            player: near.id,
            kind: StatusEffectKind::Slowness,
            amplifier: ICE_FREEZE_AMPLIFIER,
            duration_ticks: ICE_FREEZE_TICKS,
        }));
        assert!(!update.effects.iter().any(|e| matches!(
            e,
            AbilityEffect::ApplyStatus { player, .. } if *player == far.id
        )));
    }

    #[test]
    fn test_ice_breaker_aura_falls_off_with_distance() {
        let close = make_player(1.0, 0.0);
        let edge = make_player(4.0, 0.0);
        let outer = make_player(7.0, 0.0);
        let mut slowed = make_player(2.0, 0.0);
        slowed.slowed = true;
        let players = [close, edge, outer, slowed];
        let strategy = strategy_for(BossArchetype::IceBreaker);
        let state = BehaviorState::initial(BossArchetype::IceBreaker, 0);

        // Not due yet.
        let early = make_view(BossArchetype::IceBreaker, 5, &players);
        assert!((strategy.pulse)(&early, &state).effects.is_empty());

        let view = make_view(BossArchetype::IceBreaker, ICE_CHILL_PERIOD_TICKS, &players);
        let update = (strategy.pulse)(&view, &state);

        let close_dmg = damage_to(&update.effects, close.id);
        let edge_dmg = damage_to(&update.effects, edge.id);
        assert!((close_dmg - ICE_COLD_DAMAGE * 0.8).abs() < 1e-9);
        assert!(close_dmg > edge_dmg && edge_dmg > 0.0);
        assert_eq!(damage_to(&update.effects, outer.id), 0.0);
        assert!(update.effects.contains(&AbilityEffect::ApplyStatus {
            player: outer.id,
            kind: StatusEffectKind::Slowness,
            amplifier: ICE_OUTER_SLOW_AMPLIFIER,
            duration_ticks: ICE_AURA_SLOW_TICKS,
        }));
        assert!(
            !update.effects.iter().any(|e| matches!(
                e,
                AbilityEffect::ApplyStatus { player, .. } if *player == slowed.id
            )),
            "already slowed players keep their current slowness"
        );

        assert_eq!(
            update.state,
            BehaviorState::IceBreaker {
                next_chill_tick: ICE_CHILL_PERIOD_TICKS * 2
            }
        );
    }

    // ---- Procedural traits ----

    fn with_traits(list: &[BossTrait]) -> BossModifiers {
        BossModifiers {
            traits: list.to_vec(),
            ..BossModifiers::neutral()
        }
    }

    #[test]
    fn test_neutral_modifiers_do_nothing() {
        let players = [make_player(2.0, 0.0)];
        let mut view = make_view(BossArchetype::TheButcher, 0, &players);
        view.health = 10.0;
        let neutral = BossModifiers::neutral();
        assert!(traits::pulse(&neutral, &view).is_empty());
        assert!(traits::on_attack_landed(&neutral, &view, players[0].id, 30.0).is_empty());
        assert!(traits::on_hit_taken(&neutral, players[0].id, 30.0).is_empty());
        assert!((neutral.difficulty_multiplier() - 1.0).abs() < 1e-12);
        assert_eq!(neutral.bar_indicator(), None);
    }

    #[test]
    fn test_regeneration_only_below_max() {
        let modifiers = BossModifiers {
            regeneration_per_sec: 4.0,
            ..with_traits(&[BossTrait::Regenerating])
        };
        let mut view = make_view(BossArchetype::Pyromancer, 0, &[]);
        assert!(traits::pulse(&modifiers, &view).is_empty());

        view.health = 500.0;
        assert_eq!(
            traits::pulse(&modifiers, &view),
            vec![AbilityEffect::HealSelf { amount: 4.0 }]
        );
    }

    #[test]
    fn test_frost_aura_skips_slowed_players() {
        let near = make_player(3.0, 0.0);
        let mut slowed = make_player(0.0, 3.0);
        slowed.slowed = true;
        let far = make_player(9.0, 0.0);
        let players = [near, slowed, far];
        let view = make_view(BossArchetype::TheButcher, 0, &players);

        let effects = traits::pulse(&with_traits(&[BossTrait::Frozen]), &view);
        assert_eq!(
            effects,
            vec![AbilityEffect::ApplyStatus {
                player: near.id,
                kind: StatusEffectKind::Slowness,
                amplifier: 1,
                duration_ticks: 50,
            }]
        );
    }

    #[test]
    fn test_storm_strikes_only_on_low_roll() {
        let target = make_player(10.0, 0.0);
        let players = [target];
        let mut view = make_view(BossArchetype::TheButcher, 0, &players);
        let stormy = with_traits(&[BossTrait::Stormy]);

        view.roll = 0.5;
        assert!(traits::pulse(&stormy, &view).is_empty());

        view.roll = 0.02;
        let effects = traits::pulse(&stormy, &view);
        assert!((damage_to(&effects, target.id) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_lifesteal_doubles_in_blood_frenzy() {
        let victim = make_player(2.0, 0.0);
        let players = [victim];
        let mut view = make_view(BossArchetype::TheButcher, 0, &players);
        let vampire = BossModifiers {
            lifesteal_fraction: 0.2,
            ..with_traits(&[BossTrait::Vampiric, BossTrait::Berserker])
        };

        let heal = |effects: Vec<AbilityEffect>| {
            effects
                .iter()
                .find_map(|e| match e {
                    AbilityEffect::HealSelf { amount } => Some(*amount),
                    _ => None,
                })
                .unwrap_or(0.0)
        };

        assert!((heal(traits::on_attack_landed(&vampire, &view, victim.id, 50.0)) - 10.0).abs() < 1e-9);
        view.health = 200.0;
        assert!((heal(traits::on_attack_landed(&vampire, &view, victim.id, 50.0)) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_venom_and_thorns() {
        let victim = make_player(2.0, 0.0);
        let players = [victim];
        let view = make_view(BossArchetype::TheButcher, 0, &players);

        let effects = traits::on_attack_landed(&with_traits(&[BossTrait::Venomous]), &view, victim.id, 10.0);
        assert!(effects.contains(&AbilityEffect::ApplyStatus {
            player: victim.id,
            kind: StatusEffectKind::Poison,
            amplifier: VENOM_AMPLIFIER,
            duration_ticks: VENOM_TICKS,
        }));

        let thorny = BossModifiers {
            thorns_fraction: 0.25,
            ..with_traits(&[BossTrait::Thorns])
        };
        assert_eq!(
            traits::on_hit_taken(&thorny, victim.id, 40.0),
            vec![AbilityEffect::DamagePlayer {
                player: victim.id,
                amount: 10.0,
            }]
        );
        assert!(traits::on_hit_taken(&thorny, victim.id, 0.0).is_empty());
    }

    #[test]
    fn test_generation_is_seeded() {
        let a = procedural::generate(BossArchetype::TheButcher, 7);
        let b = procedural::generate(BossArchetype::TheButcher, 7);
        assert_eq!(a, b);
        assert_eq!(a.seed, 7);

        for seed in 0..50 {
            let m = procedural::generate(BossArchetype::IceBreaker, seed);
            assert!((TRAIT_MIN_COUNT..=TRAIT_MAX_COUNT).contains(&m.traits.len()));
            let unique: std::collections::HashSet<_> = m.traits.iter().collect();
            assert_eq!(unique.len(), m.traits.len());
            assert!((1.0..2.0).contains(&m.scale_multiplier));
            assert_eq!(m.regeneration_per_sec > 0.0, m.has_trait(BossTrait::Regenerating));
            assert_eq!(m.lifesteal_fraction > 0.0, m.has_trait(BossTrait::Vampiric));
            assert_eq!(m.thorns_fraction > 0.0, m.has_trait(BossTrait::Thorns));

            let name = m.name.expect("generated bosses are named");
            assert!(name.display_name.contains("Ice Breaker"));
            assert_eq!(name.title_name, name.display_name.to_uppercase());
        }
    }

    #[test]
    fn test_bar_indicator_lists_symbols() {
        let m = with_traits(&[BossTrait::Enraged, BossTrait::Frozen]);
        assert_eq!(m.bar_indicator().as_deref(), Some("[⚔❄]"));
        assert_eq!(m.traits_description(), "Enraged | Glacial");
    }
}
