//! Command-line interface definitions.
//!
//! Three optional positional arguments select what to search for. Bad or
//! missing values are not errors; [`crate::query::QueryFilter::build`]
//! replaces them with safe defaults.

use clap::Parser;
use std::path::PathBuf;

/// Fetch GDELT news for a keyword and print the articles ranked by relevance.
///
/// # Examples
///
/// ```sh
/// # Defaults: "earthquake" over the last 24h, any country
/// gdelt_rank
///
/// # A phrase over the last three days, Japanese sources only
/// gdelt_rank "tsunami warning" 3d Japan
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search keyword or phrase [default: earthquake]
    #[arg(allow_hyphen_values = true)]
    pub keyword: Option<String>,

    /// Look-back window: 1h, 6h, 24h, 3d or 7d [default: 24h]
    #[arg(allow_hyphen_values = true)]
    pub timespan: Option<String>,

    /// Restrict to articles from this source country
    #[arg(allow_hyphen_values = true)]
    pub country: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the GDELT DOC API endpoint
    #[arg(long, env = "GDELT_API_URL")]
    pub api_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::parse_from(["gdelt_rank"]);
        assert_eq!(cli.keyword, None);
        assert_eq!(cli.timespan, None);
        assert_eq!(cli.country, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_positionals() {
        let cli = Cli::parse_from(["gdelt_rank", "tsunami warning", "3d", "Japan"]);
        assert_eq!(cli.keyword.as_deref(), Some("tsunami warning"));
        assert_eq!(cli.timespan.as_deref(), Some("3d"));
        assert_eq!(cli.country.as_deref(), Some("Japan"));
    }

    #[test]
    fn test_cli_hyphen_keyword_is_positional() {
        let cli = Cli::parse_from(["gdelt_rank", "-quake", "bogus"]);
        assert_eq!(cli.keyword.as_deref(), Some("-quake"));
        assert_eq!(cli.timespan.as_deref(), Some("bogus"));
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::parse_from(["gdelt_rank", "-c", "/etc/gdelt.yaml", "flood"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/gdelt.yaml")));
        assert_eq!(cli.keyword.as_deref(), Some("flood"));
    }
}
