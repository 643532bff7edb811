use clap::Parser;

use crate::config::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "seti-stats",
    about = "Look up an account's statistics by email address",
    version,
    long_about = None
)]
pub struct Args {
    /// Email address the account is registered under
    pub email: String,

    /// Statistics endpoint to query
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Print the summary as JSON
    #[arg(long, conflicts_with = "raw")]
    pub json: bool,

    /// Print the raw response body
    #[arg(long)]
    pub raw: bool,

    /// Mask the email address in output
    #[arg(long)]
    pub redact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_stats_endpoint() {
        let args = Args::try_parse_from(["seti-stats", "jd@example.com"]).unwrap();
        assert_eq!(args.email, "jd@example.com");
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
        assert!(!args.json && !args.raw && !args.redact && !args.verbose);
    }

    #[test]
    fn json_and_raw_conflict() {
        assert!(Args::try_parse_from(["seti-stats", "jd@example.com", "--json", "--raw"]).is_err());
    }

    #[test]
    fn email_is_required() {
        assert!(Args::try_parse_from(["seti-stats"]).is_err());
    }
}
