use anyhow::Result;

use crate::workflow::Report;

/// Print a plain-text representation of the report.
pub(crate) fn print_plain(report: &Report) {
    for line in plain_lines(report) {
        println!("{line}");
    }
}

fn plain_lines(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    let outcome = &report.outcome;
    if outcome.location.is_empty() {
        lines.push("Location: (empty)".to_string());
    } else {
        lines.push(format!("Location: {}", outcome.location));
    }

    for notice in &report.notices {
        lines.push(format!("! {notice}"));
    }

    for user in &report.users {
        let marker = if outcome.expanded_login() == Some(user.login.as_str()) {
            '>'
        } else {
            ' '
        };
        lines.push(format!("{marker} {}  {}", user.login, user.html_url));
    }

    if let Some(login) = outcome.expanded_login()
        && !report.repositories.is_empty()
    {
        lines.push(format!("Repositories of {login}:"));
        for repo in &report.repositories {
            let mut line = format!("  ★ {:>6}  {}", repo.stargazers_count, repo.name);
            if repo.fork {
                line.push_str(" (fork)");
            }
            if let Some(language) = &repo.language {
                line.push_str("  ");
                line.push_str(language);
            }
            lines.push(line);
        }
        if report.has_more {
            lines.push("  ...more available".to_string());
        }
    }

    lines
}

/// Format the report as a JSON string.
pub(crate) fn format_report_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Print the JSON representation of the report.
pub(crate) fn print_json(report: &Report) -> Result<()> {
    println!("{}", format_report_json(report)?);
    Ok(())
}
