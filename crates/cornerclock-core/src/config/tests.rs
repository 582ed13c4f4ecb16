use super::*;

#[test]
fn default_config_has_expected_values() {
    // Arrange / Act
    let config = Config::default();

    // Assert
    assert_eq!(config.clock.width, 205.0);
    assert_eq!(config.clock.height, 48.0);
    assert_eq!(config.clock.padding, 15.0);
    assert_eq!(config.clock.tick_ms, 1000);
    assert!(!config.logging.enabled);
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[clock]\npadding = 8\n";

    // Act
    let config = loader::parse(toml_str).unwrap();

    // Assert
    assert_eq!(config.clock.padding, 8.0);
    assert_eq!(config.clock.width, 205.0);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn logging_section_parses() {
    let toml_str = "[logging]\nenabled = true\nlevel = \"debug\"\nmax_file_mb = 2\n";

    let config = loader::parse(toml_str).unwrap();

    assert!(config.logging.enabled);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.max_file_mb, 2);
}

#[test]
fn validate_clamps_out_of_range_values() {
    // Arrange
    let mut config = Config {
        clock: ClockConfig {
            width: 0.0,
            height: 10_000.0,
            padding: -5.0,
            font: "  ".into(),
            font_size: 500.0,
            tick_ms: 0,
        },
        ..Default::default()
    };

    // Act
    config.validate();

    // Assert
    assert_eq!(config.clock.width, 40.0);
    assert_eq!(config.clock.height, 400.0);
    assert_eq!(config.clock.padding, 0.0);
    assert_eq!(config.clock.font, "Segoe UI");
    assert_eq!(config.clock.font_size, 200.0);
    assert_eq!(config.clock.tick_ms, 100);
}

#[test]
fn invalid_toml_is_an_error() {
    assert!(loader::parse("[clock\nwidth = ").is_err());
}

#[test]
fn config_roundtrips_through_toml() {
    // Arrange
    let config = Config::default();

    // Act
    let serialized = toml::to_string(&config).unwrap();
    let deserialized = loader::parse(&serialized).unwrap();

    // Assert
    assert_eq!(deserialized.clock, config.clock);
}

#[test]
fn non_finite_sizes_fall_back_to_defaults() {
    // Arrange
    let toml_str = "[clock]\nwidth = nan\nheight = nan\npadding = inf\nfont_size = -inf\n";

    // Act
    let config = loader::parse(toml_str).unwrap();

    // Assert
    assert_eq!(config.clock.width, 205.0);
    assert_eq!(config.clock.height, 48.0);
    assert_eq!(config.clock.padding, 15.0);
    assert_eq!(config.clock.font_size, 14.0);
}

#[test]
fn nan_width_alone_does_not_poison_dependent_clamps() {
    let toml_str = "[clock]\nwidth = nan\npadding = 500\n";

    let config = loader::parse(toml_str).unwrap();

    assert_eq!(config.clock.width, 205.0);
    assert_eq!(config.clock.padding, 102.5);
}
