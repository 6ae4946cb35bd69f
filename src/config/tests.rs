use super::*;

#[test]
fn defaults_match_the_documented_service() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 3000);
    assert!(settings.server.addr.ip().is_unspecified());
    assert_eq!(settings.server.max_body_bytes.get(), 32 * 1024);
    assert_eq!(settings.server.body_limit(), 32 * 1024);
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.render.default_font, "Standard");
    assert!(settings.render.line_timeout.is_none());
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_port_env(Some("5000"));
    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn port_env_overrides_file_settings() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);

    raw.apply_port_env(Some(" 8080 "));
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.server.addr.port(), 8080);
}

#[test]
fn blank_port_env_is_ignored() {
    let mut raw = RawSettings::default();
    raw.apply_port_env(Some(""));
    raw.apply_port_env(None);
    assert!(raw.server.port.is_none());
}

#[test]
fn unusable_port_env_falls_back_to_the_default() {
    for value in ["http", "0", "70000", "-1"] {
        let mut raw = RawSettings::default();
        raw.apply_port_env(Some(value));
        let settings = Settings::from_raw(raw).expect("valid settings");
        assert_eq!(settings.server.addr.port(), 3000, "PORT={value}");
    }
}

#[test]
fn unusable_port_env_keeps_the_configured_port() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.apply_port_env(Some("not-a-port"));
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.server.addr.port(), 4000);
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn body_limit_can_be_overridden_via_cli() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        max_body_bytes: Some(1_024),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.server.max_body_bytes.get(), 1_024);
}

#[test]
fn zero_body_limit_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.max_body_bytes = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero limit");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "server.max_body_bytes",
            ..
        }
    ));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn render_overrides_apply() {
    let mut raw = RawSettings::default();
    raw.apply_render_overrides(&RenderOverrides {
        default_font: Some(" Slant ".to_string()),
        line_timeout_ms: Some(250),
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.render.default_font, "Slant");
    assert_eq!(
        settings.render.line_timeout,
        Some(Duration::from_millis(250))
    );
}

#[test]
fn blank_default_font_is_rejected() {
    let mut raw = RawSettings::default();
    raw.render.default_font = Some("   ".to_string());
    let err = Settings::from_raw(raw).expect_err("blank font");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "render.default_font",
            ..
        }
    ));
}

#[test]
fn zero_line_timeout_is_rejected() {
    let mut raw = RawSettings::default();
    raw.render.line_timeout_ms = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["asciify"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "asciify",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--server-port",
        "8080",
        "--default-font",
        "Big",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(serve.overrides.server_port, Some(8080));
            assert_eq!(serve.overrides.render.default_font.as_deref(), Some("Big"));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_render_arguments() {
    let args = CliArgs::parse_from(["asciify", "render", "--font", "slant", "Hello\\nWorld"]);

    match args.command.expect("render command") {
        Command::Render(render) => {
            assert_eq!(render.text, "Hello\\nWorld");
            assert_eq!(render.font.as_deref(), Some("slant"));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_fonts_command() {
    let args = CliArgs::parse_from(["asciify", "fonts"]);
    assert!(matches!(args.command, Some(Command::Fonts)));
}
