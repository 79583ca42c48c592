//! Plain-text rendering for handler results.
//!
//! Color is only used when stdout is a terminal, so piped output stays
//! stable for scripts and tests.

use crate::handlers::collect::CollectResult;
use crate::handlers::report::ReportResult;
use confcat_engine::{
    CategoryValue, Paged, ServiceMatch, SessionDetails, SessionSummary, SpeakerCard,
    SpeakerProfile,
};
use confcat_store::EncodingReport;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

fn enable_color() -> bool {
    std::io::stdout().is_terminal()
}

fn heading(text: &str) -> String {
    if enable_color() {
        format!("{}", text.bold())
    } else {
        text.to_string()
    }
}

fn dim(text: &str) -> String {
    if enable_color() {
        format!("{}", text.bright_black())
    } else {
        text.to_string()
    }
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

pub fn print_collect(result: &CollectResult) {
    let q = &result.quality;
    println!("{}", heading("Collected sessions"));
    println!("  Sessions:            {}", q.total_sessions);
    println!("  Missing identity:    {}", q.missing_identity);
    println!("  Replaced duplicates: {}", q.replaced_duplicates);
    println!("  Missing title:       {}", q.missing_title);
    println!("  Missing abstract:    {}", q.missing_abstract);
    println!("  Store:               {}", result.store.display());
    if let Some(encoding) = &result.encoding {
        print_encoding(encoding);
    }
}

pub fn print_encoding(report: &EncodingReport) {
    println!(
        "  MessagePack:         {} bytes ({} bytes JSON, {:.1}% smaller)",
        report.msgpack_bytes, report.json_bytes, report.reduction_percent
    );
}

pub fn print_report(result: &ReportResult) {
    println!(
        "{} ({} sessions) -> {}",
        heading("Reports"),
        result.total_sessions,
        result.reports_dir.display()
    );

    for reported in &result.reported {
        let mark = if enable_color() {
            format!("{}", "✓".green())
        } else {
            "✓".to_string()
        };
        println!(
            "  {} {:<18} {} unique values",
            mark,
            reported.category.as_str(),
            reported.unique_values
        );
    }
    for category in &result.empty {
        println!("  {} {:<18} {}", dim("-"), category.as_str(), dim("no values"));
    }
    for failed in &result.failed {
        let mark = if enable_color() {
            format!("{}", "✗".red())
        } else {
            "✗".to_string()
        };
        println!("  {} {:<18} {}", mark, failed.category.as_str(), failed.error);
    }

    println!("  Files written: {}", result.files_written);
}

fn print_more(has_more: bool, next_cursor: Option<&str>, shown: usize, total: usize) {
    if has_more {
        println!(
            "{}",
            dim(&format!(
                "Showing {} of {} (next: --cursor {})",
                shown,
                total,
                next_cursor.unwrap_or_default()
            ))
        );
    }
}

pub fn print_session_list(page: &Paged<SessionSummary>) {
    if page.items.is_empty() {
        println!("No sessions found.");
        return;
    }

    for session in &page.items {
        println!(
            "{:<10} {}",
            heading(or_dash(session.code.as_deref())),
            or_dash(session.title.as_deref())
        );
    }
    print_more(
        page.has_more,
        page.next_cursor.as_deref(),
        page.items.len(),
        page.total,
    );
}

fn speaker_line(card: &SpeakerCard) -> String {
    let mut line = card.name.clone();
    let detail: Vec<&str> = [card.job_title.as_deref(), card.company.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if !detail.is_empty() {
        line.push_str(&format!(" ({})", detail.join(", ")));
    }
    line
}

pub fn print_session_details(details: &SessionDetails) {
    println!(
        "{} {}",
        heading(or_dash(details.code.as_deref())),
        or_dash(details.title.as_deref())
    );
    println!("Type: {}", or_dash(details.session_type.as_deref()));

    if let Some(text) = details.abstract_text.as_deref()
        && !text.is_empty()
    {
        println!();
        println!("{}", text);
    }

    for category in confcat_types::Category::ALL {
        let values = details.attributes.get(category);
        if !values.is_empty() {
            println!("{}: {}", category.as_str(), values.join(", "));
        }
    }

    if !details.speakers.is_empty() {
        println!();
        println!("{}", heading("Speakers"));
        for card in &details.speakers {
            println!("  {}", speaker_line(card));
        }
    }
}

pub fn print_category_values(values: &[CategoryValue]) {
    if values.is_empty() {
        println!("No values found.");
        return;
    }

    for value in values {
        println!(
            "{:<40} {:>5} {:>7}%",
            truncate(&value.name, 40),
            value.count,
            value.percentage
        );
    }
}

pub fn print_speakers(page: &Paged<SpeakerProfile>) {
    if page.items.is_empty() {
        println!("No speakers found.");
        return;
    }

    for profile in &page.items {
        println!("{}", heading(&speaker_line(&profile.card)));
        for session in &profile.sessions {
            println!(
                "  {:<10} {}",
                or_dash(session.code.as_deref()),
                or_dash(session.title.as_deref())
            );
        }
    }
    print_more(
        page.has_more,
        page.next_cursor.as_deref(),
        page.items.len(),
        page.total,
    );
}

pub fn print_services(page: &Paged<ServiceMatch>) {
    if page.items.is_empty() {
        println!("No services found.");
        return;
    }

    for service in &page.items {
        println!("{:<50} {:>5}", service.name, service.session_count);
    }
    print_more(
        page.has_more,
        page.next_cursor.as_deref(),
        page.items.len(),
        page.total,
    );
}
