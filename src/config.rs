use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_COMPLETION_URL: &str =
    "https://hooks.jdoodle.net/proxy?url=https://api.openai.com/v1/chat/completions";

pub const DEFAULT_SITE_URL: &str = "https://www.portfolio-developpeur.com";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "portfolio-gateway")]
#[command(about = "Rate-limited completion and contact gateway for a portfolio site")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Chat completion endpoint (usually a proxy in front of the real API)
    #[arg(long, default_value = DEFAULT_COMPLETION_URL)]
    pub completion_url: String,

    #[arg(long, default_value = "gpt-3.5-turbo")]
    pub model: String,

    // Chat messages allowed per client per window
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub chat_rate_limit: u32,

    // Completion calls allowed per client per window
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub completion_rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub rate_window: u64,

    // Completion request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout: u64,

    // Pending completion jobs before callers wait
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub queue_size: u32,

    // Public origin of the site, for sitemap.xml
    #[arg(long, default_value = DEFAULT_SITE_URL)]
    pub site_url: String,

    // Portfolio content as JSON; built-in profile when absent
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["portfolio-gateway"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.chat_rate_limit, 5);
        assert_eq!(args.completion_rate_limit, 10);
        assert_eq!(args.rate_window, 60);
        assert_eq!(args.completion_url, DEFAULT_COMPLETION_URL);
        assert_eq!(args.site_url, DEFAULT_SITE_URL);
        assert!(args.profile.is_none());
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(Args::try_parse_from(["portfolio-gateway", "--chat-rate-limit", "0"]).is_err());
        assert!(Args::try_parse_from(["portfolio-gateway", "--rate-window", "0"]).is_err());
        assert!(Args::try_parse_from(["portfolio-gateway", "--queue-size", "0"]).is_err());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "portfolio-gateway",
            "-p",
            "9000",
            "--completion-rate-limit",
            "3",
            "--profile",
            "me.json",
        ])
        .unwrap();
        assert_eq!(args.port, 9000);
        assert_eq!(args.completion_rate_limit, 3);
        assert_eq!(args.profile, Some(PathBuf::from("me.json")));
    }
}
