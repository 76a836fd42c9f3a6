#[cfg(test)]
mod tests {
    use crate::{
        BattleEvent, EventKind, HpFraction, Player, PokemonDetails, PokemonRef,
        parse_battle_event, parse_server_frame,
    };

    fn pikachu(player: Player) -> PokemonRef {
        PokemonRef {
            player,
            name: "Pikachu".to_string(),
        }
    }

    #[test]
    fn test_parse_player() {
        let event = parse_battle_event("|player|p1|Ash|1|1500").unwrap();
        assert_eq!(
            event,
            Some(BattleEvent::Player {
                player: Player::P1,
                username: "Ash".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_switch_with_hp() {
        let event = parse_battle_event("|switch|p1a: Pikachu|Pikachu, L50|35/35")
            .unwrap()
            .unwrap();

        match event {
            BattleEvent::Switch {
                pokemon,
                details,
                hp,
            } => {
                assert_eq!(pokemon, pikachu(Player::P1));
                assert_eq!(details.species, "Pikachu");
                assert_eq!(hp, Some(HpFraction { current: 35, max: 35 }));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_switch_without_hp_still_switches() {
        let event = parse_battle_event("|switch|p2a: Garchomp|Garchomp, F")
            .unwrap()
            .unwrap();
        assert!(matches!(event, BattleEvent::Switch { hp: None, .. }));
    }

    #[test]
    fn test_details_and_ref_keep_only_keys() {
        assert_eq!(
            PokemonDetails::parse("Garchomp, L50, F, shiny"),
            PokemonDetails {
                species: "Garchomp".to_string(),
            }
        );
        assert_eq!(
            PokemonRef::parse("p2: Garchomp"),
            PokemonRef::parse("p2b: Garchomp")
        );
        assert_eq!(PokemonRef::parse("p5a: Garchomp"), None);
    }

    #[test]
    fn test_parse_move() {
        let event = parse_battle_event("|move|p1a: Pikachu|Thunderbolt|p2a: Gyarados").unwrap();
        assert_eq!(
            event,
            Some(BattleEvent::Move {
                pokemon: pikachu(Player::P1),
                move_name: "Thunderbolt".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_damage_variants() {
        for line in [
            "|damage|p1a: Pikachu|20/35",
            "|-damage|p1a: Pikachu|20/35",
            "|-heal|p1a: Pikachu|20/35 par",
        ] {
            let event = parse_battle_event(line).unwrap();
            assert_eq!(
                event,
                Some(BattleEvent::Damage {
                    pokemon: pikachu(Player::P1),
                    hp: HpFraction { current: 20, max: 35 },
                }),
                "line: {}",
                line
            );
        }
    }

    #[test]
    fn test_parse_damage_malformed_fraction() {
        assert!(parse_battle_event("|damage|p1a: Pikachu|0 fnt").is_err());
        assert!(parse_battle_event("|damage|p1a: Pikachu|abc/35").is_err());
        assert!(parse_battle_event("|damage|p1a: Pikachu").is_err());
    }

    #[test]
    fn test_parse_boosts() {
        let event = parse_battle_event("|-unboost|p2a: Gyarados|atk|1").unwrap();
        assert_eq!(
            event,
            Some(BattleEvent::Unboost {
                pokemon: PokemonRef {
                    player: Player::P2,
                    name: "Gyarados".to_string(),
                },
                stat: "atk".to_string(),
                amount: 1,
            })
        );

        assert!(parse_battle_event("|-boost|p2a: Gyarados|atk|lots").is_err());
        assert!(parse_battle_event("|-setboost|p2a: Gyarados|atk").is_err());
    }

    #[test]
    fn test_parse_team_list() {
        let event = parse_battle_event("|team|p1|Pikachu|Thunderbolt, Quick Attack, ").unwrap();
        assert_eq!(
            event,
            Some(BattleEvent::Team {
                player: Player::P1,
                pokemon: "Pikachu".to_string(),
                moves: vec!["Thunderbolt".to_string(), "Quick Attack".to_string()],
            })
        );
    }

    #[test]
    fn test_parse_weather_none_clears() {
        assert_eq!(
            parse_battle_event("|-weather|none").unwrap(),
            Some(BattleEvent::Weather(None))
        );
        assert_eq!(
            parse_battle_event("|-weather|RainDance|[upkeep]").unwrap(),
            Some(BattleEvent::Weather(Some("RainDance".to_string())))
        );
    }

    #[test]
    fn test_parse_turn_and_end() {
        assert_eq!(parse_battle_event("|turn|7").unwrap(), Some(BattleEvent::Turn(7)));
        assert!(parse_battle_event("|turn|seven").is_err());
        assert_eq!(
            parse_battle_event("|win|Ash").unwrap(),
            Some(BattleEvent::Win("Ash".to_string()))
        );
        assert_eq!(
            parse_battle_event("|lose|Gary").unwrap(),
            Some(BattleEvent::Lose("Gary".to_string()))
        );
    }

    #[test]
    fn test_parse_bad_slot_token() {
        assert!(parse_battle_event("|faint|Pikachu").is_err());
        assert!(parse_battle_event("|faint|x: Pikachu").is_err());
        assert!(parse_battle_event("|faint|p9a: Pikachu").is_err());
    }

    #[test]
    fn test_parse_ignored_lines() {
        assert_eq!(parse_battle_event("").unwrap(), None);
        assert_eq!(parse_battle_event("just chat text").unwrap(), None);
        assert_eq!(parse_battle_event("|someunknown|data").unwrap(), None);
        assert_eq!(parse_battle_event("|").unwrap(), None);
    }

    #[test]
    fn test_event_kind_classification() {
        assert_eq!(EventKind::of_line("|switch|garbage"), Some(EventKind::Switch));
        assert!(EventKind::of_line("|upkeep").unwrap().is_notable());
        assert!(!EventKind::of_line("|-boost|p1a: X|atk|1").unwrap().is_notable());
        assert!(!EventKind::of_line("|-damage|p1a: X|1/2").unwrap().is_notable());
        assert!(EventKind::of_line("|lose|Gary").unwrap().is_terminal());
        assert_eq!(EventKind::of_line("|c|user|hi"), None);
    }

    #[test]
    fn test_parse_server_frame_with_room() {
        let frame = parse_server_frame(">battle-gen9ou-1\n|turn|3\n\n|upkeep\r\n");
        assert_eq!(frame.room_id.as_deref(), Some("battle-gen9ou-1"));
        assert_eq!(frame.lines, vec!["|turn|3".to_string(), "|upkeep".to_string()]);
    }

    #[test]
    fn test_parse_server_frame_without_room() {
        let frame = parse_server_frame("|challstr|4|abc");
        assert!(frame.room_id.is_none());
        assert_eq!(frame.lines.len(), 1);
    }
}
