use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .with_writer(std::io::stderr)
        .init();
}

/// Inserts thousands separators into a plain digit string. Anything else,
/// including decimals, is returned unchanged.
pub fn format_number(value: &str) -> String {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return value.to_string();
    }

    value
        .as_bytes()
        .rchunks(3)
        .rev()
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            let hidden = "*".repeat(local.chars().count().saturating_sub(1));
            format!("{}{}@{}", first, hidden, domain)
        }
        None => "*".repeat(email.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(format_number("670"), "670");
        assert_eq!(format_number("1000"), "1,000");
        assert_eq!(format_number("4785123"), "4,785,123");
    }

    #[test]
    fn leaves_non_integers_alone() {
        assert_eq!(format_number(""), "");
        assert_eq!(format_number("12345.67"), "12345.67");
        assert_eq!(format_number("2.145 years"), "2.145 years");
    }

    #[test]
    fn masks_local_part_only() {
        assert_eq!(redact_email("john@example.com"), "j***@example.com");
        assert_eq!(redact_email("j@example.com"), "j@example.com");
        assert_eq!(redact_email("nodomain"), "********");
    }
}
