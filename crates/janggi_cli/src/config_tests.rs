use super::*;

#[test]
fn test_empty_file_is_default() {
    assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
}

#[test]
fn test_full_file() {
    let config = CliConfig::from_toml(
        r#"
player_side = "second"
level = 5
engine = "random"

[formations]
first = 2
second = 3

[rules]
move_limit = 120
komi = 0.5
"#,
    )
    .unwrap();

    assert_eq!(config.player_side, Side::Second);
    assert_eq!(config.level, 5);
    assert_eq!(config.depth(), 5);
    assert_eq!(config.engine, EngineKind::Random);
    assert_eq!(config.formations.first, Formation::ElephantHorseHorseElephant);
    assert_eq!(config.formations.second, Formation::ElephantHorseElephantHorse);
    assert_eq!(config.rules.move_limit, 120);
    assert_eq!(config.rules.komi, 0.5);
    // Missing keys keep their defaults.
    assert_eq!(config.rules.low_material, 10);
}

#[test]
fn test_rejects_bad_values() {
    assert!(CliConfig::from_toml("[formations]\nfirst = 4").is_err());
    assert!(CliConfig::from_toml("engine = \"neural\"").is_err());
    assert!(CliConfig::from_toml("player_side = \"north\"").is_err());
}

#[test]
fn test_overrides_replace_file_values() {
    let mut config = CliConfig::from_toml("level = 7\nengine = \"random\"").unwrap();
    config.apply(&Overrides {
        level: Some(2),
        second_formation: Some(Formation::HorseElephantHorseElephant),
        ..Overrides::default()
    });

    assert_eq!(config.level, 2);
    assert_eq!(config.engine, EngineKind::Random);
    assert_eq!(config.formations.second, Formation::HorseElephantHorseElephant);
    assert_eq!(config.formations.first, Formation::default());
}

#[test]
fn test_level_clamps_to_depth_range() {
    let low = CliConfig {
        level: 0,
        ..CliConfig::default()
    };
    assert_eq!(low.depth(), 1);
    let high = CliConfig {
        level: 12,
        ..CliConfig::default()
    };
    assert_eq!(high.depth(), 9);
}

#[test]
fn test_new_game_uses_rules_and_formations() {
    let config = CliConfig::from_toml("[formations]\nfirst = 3\n[rules]\nmove_limit = 4").unwrap();
    let game = config.new_game();
    assert_eq!(game.state().rules().move_limit, 4);
    assert_eq!(
        game.state().board().to_fen(),
        janggi_core::Board::startpos(Formation::ElephantHorseElephantHorse, Formation::default())
            .to_fen()
    );
}

#[test]
fn test_missing_file_reports_path() {
    let err = CliConfig::load(Path::new("/nonexistent/janggi.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/janggi.toml"));
}
