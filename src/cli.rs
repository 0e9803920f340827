//! Command-line and environment configuration.

use clap::Parser;

use crate::infra::darkstat::DEFAULT_BASE_URL;

#[derive(Debug, Parser)]
#[command(name = "trade-route-scanner", version, about)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the Darkstat market data API.
    #[arg(long, env = "DARKSTAT_URL", default_value = DEFAULT_BASE_URL)]
    pub darkstat_url: String,

    /// Directory holding the static frontend assets.
    #[arg(long, env = "STATIC_DIR", default_value = "frontend")]
    pub static_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_arguments() {
        let cli = Cli::parse_from(["trade-route-scanner"]);
        assert_eq!(cli.port, 8000);
        assert_eq!(cli.darkstat_url, DEFAULT_BASE_URL);
        assert_eq!(cli.static_dir, "frontend");
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "trade-route-scanner",
            "--port",
            "9001",
            "--static-dir",
            "public",
        ]);
        assert_eq!(cli.port, 9001);
        assert_eq!(cli.static_dir, "public");
    }
}
