use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the asciify binary.
#[derive(Debug, Parser)]
#[command(name = "asciify", version, about = "FIGlet text rendering service")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "ASCIIFY_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP API and browser client.
    Serve(Box<ServeArgs>),
    /// Render text once and print the result.
    Render(RenderArgs),
    /// List the available font names.
    Fonts,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the font used when a request names none.
    #[arg(long = "default-font", value_name = "NAME")]
    pub default_font: Option<String>,

    /// Bound each backend render call, in milliseconds.
    #[arg(long = "render-line-timeout-ms", value_name = "MILLISECONDS")]
    pub line_timeout_ms: Option<u64>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub render: RenderOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the maximum accepted request body size in bytes.
    #[arg(long = "max-body-bytes", value_name = "BYTES")]
    pub max_body_bytes: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub render: RenderOverrides,

    /// Text to render; literal `\n` sequences start a new line.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Font name; defaults to the configured default font.
    #[arg(short = 'f', long = "font", value_name = "NAME")]
    pub font: Option<String>,
}
