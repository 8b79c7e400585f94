#[cfg(test)]
mod tests {
    use crate::catalog::get_profile;
    use crate::commands::AdminCommand;
    use crate::components::{Health, StatusEffect, StatusEffects};
    use crate::enums::*;
    use crate::error::BossError;
    use crate::events::BossNotification;
    use crate::state::{BossStats, BossSummary, SchedulerInfo};
    use crate::types::{BossId, PlayerId, Position, SimTime};

    // ---- Catalog ----

    #[test]
    fn test_zone_scaling_matches_formulas() {
        let butcher = get_profile(BossArchetype::TheButcher);
        assert!((butcher.health_at(10) - 3500.0).abs() < 1e-9);
        assert!((butcher.damage_at(10) - 26.25).abs() < 1e-9);
        assert!((butcher.health_at(0) - 2000.0).abs() < 1e-9);
        assert!((butcher.damage_at(0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_horde_queen_is_event_driven() {
        for archetype in BossArchetype::ALL {
            let profile = get_profile(archetype);
            assert_eq!(profile.archetype, archetype);
            assert_eq!(
                profile.is_timer_driven(),
                archetype != BossArchetype::HordeQueen,
                "{archetype} cooldown {}",
                profile.ability_cooldown_secs
            );
        }
    }

    #[test]
    fn test_catalog_entries_are_distinct() {
        let names: std::collections::HashSet<_> = BossArchetype::ALL
            .iter()
            .map(|a| get_profile(*a).display_name)
            .collect();
        assert_eq!(names.len(), BossArchetype::ALL.len());
    }

    // ---- Archetype parsing ----

    #[test]
    fn test_archetype_parse_is_case_insensitive() {
        assert_eq!(
            "the_butcher".parse::<BossArchetype>().unwrap(),
            BossArchetype::TheButcher
        );
        assert_eq!(
            " Ice_Breaker ".parse::<BossArchetype>().unwrap(),
            BossArchetype::IceBreaker
        );
        for archetype in BossArchetype::ALL {
            assert_eq!(archetype.id().parse::<BossArchetype>().unwrap(), archetype);
        }
    }

    #[test]
    fn test_archetype_parse_unknown() {
        let err = "dragon".parse::<BossArchetype>().unwrap_err();
        assert_eq!(err, BossError::UnknownArchetype("dragon".into()));
    }

    #[test]
    fn test_archetype_serde_uses_ids() {
        let json = serde_json::to_string(&BossArchetype::HordeQueen).unwrap();
        assert_eq!(json, "\"HORDE_QUEEN\"");
    }

    // ---- Admin command parsing ----

    #[test]
    fn test_parse_spawn_requires_position_and_type() {
        let pos = Position::new(10.0, 20.0, 64.0);

        let cmd = AdminCommand::parse(&["spawn", "pyromancer"], Some(pos)).unwrap();
        assert_eq!(
            cmd,
            AdminCommand::Spawn {
                archetype: BossArchetype::Pyromancer,
                position: pos,
            }
        );

        assert_eq!(
            AdminCommand::parse(&["spawn"], Some(pos)).unwrap_err(),
            BossError::MissingArgument("type")
        );
        assert_eq!(
            AdminCommand::parse(&["spawn", "pyromancer"], None).unwrap_err(),
            BossError::NoSenderPosition
        );
        assert!(matches!(
            AdminCommand::parse(&["spawn", "nope"], Some(pos)),
            Err(BossError::UnknownArchetype(_))
        ));
    }

    #[test]
    fn test_parse_simple_subcommands() {
        assert_eq!(AdminCommand::parse(&["LIST"], None).unwrap(), AdminCommand::List);
        assert_eq!(AdminCommand::parse(&["clear"], None).unwrap(), AdminCommand::Clear);
        assert_eq!(AdminCommand::parse(&["stats"], None).unwrap(), AdminCommand::Stats);
        assert_eq!(AdminCommand::parse(&["force"], None).unwrap(), AdminCommand::Force);
        assert_eq!(AdminCommand::parse(&["toggle"], None).unwrap(), AdminCommand::Toggle);
        assert_eq!(AdminCommand::parse(&["info"], None).unwrap(), AdminCommand::Info);
        assert_eq!(AdminCommand::parse(&[], None).unwrap(), AdminCommand::Help);
        assert_eq!(AdminCommand::parse(&["what"], None).unwrap(), AdminCommand::Help);
    }

    // ---- Snapshots ----

    #[test]
    fn test_summary_line_format() {
        let summary = BossSummary {
            id: BossId::new(),
            archetype: BossArchetype::TheButcher,
            display_name: "The Butcher".into(),
            zone: 10,
            state: LifecycleState::Active,
            health: 3499.6,
            max_health: 3500.0,
            position: Position::new(12.4, -7.6, 65.0),
        };
        assert_eq!(
            summary.to_string(),
            "The Butcher (Zone 10) - 3500/3500 @ [12, -8, 65]"
        );
    }

    #[test]
    fn test_stats_line_format() {
        let stats = BossStats {
            spawned: 5,
            killed: 3,
            despawned: 1,
            active: 1,
            max_concurrent: 2,
        };
        assert_eq!(
            stats.to_string(),
            "Active: 1/2 | Spawned: 5 | Killed: 3 | Despawned: 1"
        );
    }

    #[test]
    fn test_scheduler_info_format() {
        let info = SchedulerInfo {
            until_next_attempt_ms: 125_000,
            since_last_attempt_ms: None,
        };
        assert_eq!(info.to_string(), "Next check: 2m 5s | Last: never");

        let info = SchedulerInfo {
            until_next_attempt_ms: 0,
            since_last_attempt_ms: Some(180_000),
        };
        assert_eq!(info.to_string(), "Next check: 0m 0s | Last: 3m ago");
    }

    // ---- Components and types ----

    #[test]
    fn test_health_fraction_clamps() {
        assert!((Health::full(200.0).fraction() - 1.0).abs() < 1e-12);
        let overkill = Health {
            current: -40.0,
            max: 200.0,
        };
        assert_eq!(overkill.fraction(), 0.0);
        let broken = Health {
            current: 10.0,
            max: 0.0,
        };
        assert_eq!(broken.fraction(), 0.0);
    }

    #[test]
    fn test_status_effect_expiry() {
        let effects = StatusEffects {
            effects: vec![StatusEffect {
                kind: StatusEffectKind::Slowness,
                amplifier: 1,
                expires_at_tick: 100,
            }],
        };
        assert!(effects.has(StatusEffectKind::Slowness, 99));
        assert!(!effects.has(StatusEffectKind::Slowness, 100));
        assert!(!effects.has(StatusEffectKind::Darkness, 0));
    }

    #[test]
    fn test_sim_time_twenty_ticks_one_second() {
        let mut time = SimTime::default();
        for _ in 0..20 {
            time.advance();
        }
        assert_eq!(time.tick, 20);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_lifecycle_terminal_states() {
        assert!(!LifecycleState::Pending.is_terminal());
        assert!(!LifecycleState::Active.is_terminal());
        assert!(LifecycleState::Dead.is_terminal());
        assert!(LifecycleState::Despawned.is_terminal());
    }

    #[test]
    fn test_notification_recipient() {
        let player = PlayerId::new();
        let msg = BossNotification::Message {
            player,
            text: "hi".into(),
        };
        assert_eq!(msg.recipient(), Some(player));
        let cleared = BossNotification::HealthBarCleared {
            boss_id: BossId::new(),
        };
        assert_eq!(cleared.recipient(), None);

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"Message\""), "{json}");
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Legendary > Rarity::Epic);
        assert!(Rarity::Epic > Rarity::Rare);
        assert!(Rarity::Common < Rarity::Uncommon);
    }
}
