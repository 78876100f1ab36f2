use owo_colors::OwoColorize;
use traceit_types::{Report, ReportStatus};

use super::format_relative_time;

/// One line per report: relative time, short id, colored status, title,
/// reporter.
pub fn render_report_list(reports: &[&Report]) -> String {
    if reports.is_empty() {
        return "No reports.\n".to_string();
    }

    let mut out = String::new();
    for report in reports {
        let id_short = short_id(&report.id);
        out.push_str(&format!(
            "{} {} {} {} by {}\n",
            format!("{:>12}", format_relative_time(report.created_at)).bright_black(),
            id_short.yellow(),
            status_label(report.status),
            report.title,
            report.reporter_label().bright_black(),
        ));
    }
    out
}

pub fn render_report_detail(report: &Report, image_url: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", report.title.bold(), status_label(report.status)));
    out.push_str(&format!("Id:       {}\n", report.id));
    out.push_str(&format!("Reporter: {}\n", report.reporter_label()));
    out.push_str(&format!(
        "Created:  {} ({})\n",
        report.created_at.format("%Y-%m-%d %H:%M"),
        format_relative_time(report.created_at)
    ));
    if let Some(url) = image_url {
        out.push_str(&format!("Image:    {}\n", url));
    }
    out.push('\n');
    out.push_str(&report.description);
    out.push('\n');
    out
}

fn status_label(status: ReportStatus) -> String {
    match status {
        ReportStatus::Pending => format!("{}", "pending ".yellow()),
        ReportStatus::Approved => format!("{}", "approved".green()),
    }
}

fn short_id(id: &str) -> &str {
    if id.len() > 8 { &id[..8] } else { id }
}
