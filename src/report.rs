use anyhow::{Context, Result};

use crate::client::StatsSummary;
use crate::utils::{format_number, redact_email};

const UNKNOWN: &str = "unknown";

fn report_lines(summary: &StatsSummary, redact: bool) -> Vec<String> {
    let email = if redact {
        redact_email(&summary.email)
    } else {
        summary.email.clone()
    };
    let show = |value: &Option<String>| value.as_deref().unwrap_or(UNKNOWN).to_string();
    let count = |value: &Option<String>| {
        value
            .as_deref()
            .map(format_number)
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    let mut lines = vec![
        format!("\n--- Statistics for {} ---", email),
        format!("Name: {}", show(&summary.name)),
        format!("Home page: {}", summary.home_page),
        format!("Profile: {}", summary.profile_url),
        format!("Registered: {}", show(&summary.reg_date)),
        format!("\nResults received: {}", count(&summary.num_results)),
        format!("Results per day: {}", show(&summary.results_per_day)),
        format!("Last result: {}", summary.last_result_time),
        format!("Total CPU time: {}", show(&summary.cpu_time)),
        format!("Average CPU time per result: {}", show(&summary.ave_cpu)),
        format!("Time as a user: {}", show(&summary.user_time)),
        format!(
            "\nRank: {} of {}",
            count(&summary.rank),
            count(&summary.total_users)
        ),
    ];

    if let Some(same) = &summary.have_same_rank {
        lines.push(format!("Sharing this rank: {}", format_number(same)));
    }
    if let Some(percent) = summary.rank_percent {
        lines.push(format!("Better than {:.3}% of users", percent));
    }

    if let Some(group) = &summary.group_name {
        match &summary.group_url {
            Some(url) => lines.push(format!("\nGroup: {} ({})", group, url)),
            None => lines.push(format!("\nGroup: {}", group)),
        }
    }

    lines
}

pub fn render_report(summary: &StatsSummary, redact: bool) -> String {
    let mut out = report_lines(summary, redact).join("\n");
    out.push('\n');
    out
}

pub fn print_report(summary: &StatsSummary, redact: bool) {
    for line in report_lines(summary, redact) {
        println!("{}", line);
    }
}

pub fn print_json(summary: &StatsSummary, redact: bool) -> Result<()> {
    let mut summary = summary.clone();
    if redact {
        summary.email = redact_email(&summary.email);
        summary.url = "redacted".to_string();
    }

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> StatsSummary {
        StatsSummary {
            email: "john@example.com".to_string(),
            url: "http://stats.example.com/?cmd=user_xml&email=john%40example.com".to_string(),
            name: Some("John Doe".to_string()),
            home_page: "No Home Page".to_string(),
            profile_url: "No URL".to_string(),
            user_time: None,
            ave_cpu: Some("12 hr 03 min".to_string()),
            num_results: Some("4785".to_string()),
            reg_date: None,
            results_per_day: None,
            last_result_time: "0".to_string(),
            cpu_time: None,
            rank: Some("21410".to_string()),
            total_users: Some("4147985".to_string()),
            have_same_rank: None,
            rank_percent: Some(99.484),
            group_name: Some("Team JD".to_string()),
            group_url: None,
        }
    }

    #[test]
    fn report_formats_counts_and_rank() {
        let report = render_report(&summary(), false);

        assert!(report.contains("Statistics for john@example.com"));
        assert!(report.contains("Name: John Doe"));
        assert!(report.contains("Results received: 4,785"));
        assert!(report.contains("Rank: 21,410 of 4,147,985"));
        assert!(report.contains("Better than 99.484% of users"));
        assert!(report.contains("Registered: unknown"));
        assert!(report.contains("Group: Team JD\n"));
        assert!(!report.contains("Sharing this rank"));
    }

    #[test]
    fn report_lines_follow_section_order() {
        let lines = report_lines(&summary(), false);

        assert_eq!(lines[0], "\n--- Statistics for john@example.com ---");
        assert_eq!(lines[1], "Name: John Doe");
        assert_eq!(lines.last().unwrap(), "\nGroup: Team JD");
        assert_eq!(render_report(&summary(), false), format!("{}\n", lines.join("\n")));
    }

    #[test]
    fn report_redacts_email() {
        let report = render_report(&summary(), true);
        assert!(report.contains("Statistics for j***@example.com"));
        assert!(!report.contains("john@"));
    }
}
