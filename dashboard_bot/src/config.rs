use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

#[derive(Debug)]
pub struct Config {
    /// Enables verbose logging of errors that occur while loading panels
    pub debug: bool,

    /// The base url of the stats API, without a trailing slash.
    pub base_url: String,

    /// How long to wait for each metric endpoint before failing its panel.
    pub fetch_timeout: Duration,

    /// Either "terminal" or "chartjs", this option selects the render backend.
    pub render_type: String,

    /// Where the "chartjs" backend writes one config file per panel.
    pub output_dir: PathBuf,

    /// The hex colors the charts cycle through.
    pub palette: Vec<String>,
}

impl Config {
    /// Loads configuration from arguments, env and dotenv
    pub fn load() -> Result<Config> {
        // Attempts to find a `.env` file to initialize/extend the environment
        dotenv::dotenv().ok();

        // Load the config from arguments, then environment variables
        let env = Environment::from_args();

        Ok(Config {
            debug: env.debug
                || match dotenv::var("DEBUG").ok() {
                    Some(val) if val == "true" || val == "on" || val == "1" => true,
                    Some(val) if val == "false" || val == "off" || val == "0" || val == "" => false,
                    Some(val) => val.parse::<bool>().context("invalid DEBUG")?,
                    None => false,
                },
            base_url: env.base_url.trim_end_matches('/').to_string(),
            fetch_timeout: Duration::from_secs(env.fetch_timeout),
            render_type: env.render_type,
            output_dir: env.output_dir,
            palette: parse_palette(&env.palette)?,
        })
    }
}

/// Parses the comma separated `PALETTE` value into `#rrggbb` colors.
pub fn parse_palette(raw: &str) -> Result<Vec<String>> {
    let palette = raw
        .split(',')
        .map(|color| {
            let color = color.trim();
            let hex = color.strip_prefix('#').unwrap_or("");
            if hex.len() == 6 && hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
                Ok(color.to_string())
            } else {
                Err(anyhow::format_err!("invalid PALETTE color: {:?}", color))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    if palette.is_empty() {
        return Err(anyhow::format_err!("PALETTE must name at least one color"));
    }
    Ok(palette)
}

#[derive(Debug, StructOpt)]
#[structopt(name = "dashboard-bot")]
struct Environment {
    /// Enables verbose logging of errors that occur while loading panels
    #[structopt(short, long)]
    debug: bool,

    /// The base url of the stats API
    #[structopt(
        short = "u",
        long,
        env = "BASE_URL",
        default_value = "http://localhost:8000/api/estadisticas_landing"
    )]
    base_url: String,

    /// How long (in seconds) to wait for each metric endpoint
    #[structopt(long, env = "FETCH_TIMEOUT", default_value = "10")]
    fetch_timeout: u64,

    /// One of "terminal" or "chartjs".
    #[structopt(short = "r", long = "render", env = "RENDER_TYPE", default_value = "terminal")]
    render_type: String,

    /// The directory where the "chartjs" backend writes panel configs
    #[structopt(
        short = "o",
        long,
        env = "OUTPUT_DIR",
        default_value = "charts",
        parse(from_os_str)
    )]
    output_dir: PathBuf,

    /// A comma separated list of hex colors for the charts
    #[structopt(
        long,
        env = "PALETTE",
        default_value = "#3B82F6,#10B981,#F59E0B,#EF4444,#8B5CF6,#EC4899,#6366F1,#14B8A6,#F97316,#06B6D4"
    )]
    palette: String,
}
