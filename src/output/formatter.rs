use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::grading::Report;
use crate::record::StudentRecord;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a GPA with the report's 3-decimal precision
pub fn format_gpa(gpa: f64) -> String {
    format!("{:.3}", gpa)
}

/// Format row points with the report's 2-decimal precision
pub fn format_points(points: f64) -> String {
    format!("{:.2}", points)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Summary line: "{student}  GPA {gpa}  ({credits} credits)"
fn format_header(report: &Report, use_colors: bool) -> String {
    let gpa = format_gpa(report.gpa);
    if use_colors {
        format!(
            "{}  GPA {}  ({} credits)",
            report.student.bold(),
            gpa.green().bold(),
            report.total_credits
        )
    } else {
        format!(
            "{}  GPA {}  ({} credits)",
            report.student, gpa, report.total_credits
        )
    }
}

/// Format a report as a summary line followed by one row per course.
///
/// Columns: Index, Code, Title, Credits, Points. Titles come from `record`,
/// matched by position since report rows mirror input order. Titles are
/// truncated only when writing to a terminal.
pub fn format_report_table(report: &Report, record: &StudentRecord, use_colors: bool) -> String {
    let header = format_header(report, use_colors);
    if report.rows.is_empty() {
        return format!("{}\nNo courses recorded.", header);
    }

    let term_width = get_terminal_width();

    // Index column: 3 chars ("99."), credits 4, points 6 ("4.00")
    let index_width = 3;
    let credits_width = 4;
    let points_width = 6;
    let separator = "  ";
    let code_width = report
        .rows
        .iter()
        .map(|r| r.course.chars().count())
        .max()
        .unwrap_or(0);

    let lines = report
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let code_padded = format!("{:<width$}", row.course, width = code_width);
            let credits_padded = format!("{:>width$}", row.credits, width = credits_width);
            let points_padded = format!(
                "{:>width$}",
                format_points(row.points),
                width = points_width
            );

            let full_title = record
                .courses
                .get(idx)
                .map(|c| c.title.as_str())
                .unwrap_or("");
            let fixed_width =
                index_width + 1 + code_width + credits_width + points_width + separator.len() * 3;
            let title = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_title(full_title, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_title(full_title, 10),
                // No terminal (pipe), don't truncate
                None => full_title.to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    code_padded.cyan(),
                    separator,
                    title,
                    separator,
                    credits_padded,
                    separator,
                    points_padded.bold()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    code_padded,
                    separator,
                    title,
                    separator,
                    credits_padded,
                    separator,
                    points_padded
                )
            }
        })
        .collect::<Vec<_>>();

    format!("{}\n{}", header, lines.join("\n"))
}

/// Format the per-course intermediate values (for verbose mode)
pub fn format_breakdown(report: &Report, use_colors: bool) -> String {
    report
        .breakdown
        .iter()
        .map(|step| {
            let bonus = if step.bonus != 0.0 {
                format!(" {:+}", step.bonus)
            } else {
                String::new()
            };
            let course = if use_colors {
                step.course.bold().to_string()
            } else {
                step.course.clone()
            };
            format!(
                "{}\n  Score: {:.2}\n  Points: {:.1}{}\n  Weighted: {:.2}",
                course, step.normalized_score, step.points, bonus, step.weighted
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format report rows as tab-separated values for scripting
/// Columns: course, credits, points (no headers, no colors)
pub fn format_tsv(report: &Report) -> String {
    report
        .rows
        .iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}",
                row.course,
                row.credits,
                format_points(row.points)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
}

pub fn format_yaml(report: &Report) -> Result<String> {
    serde_saphyr::to_string(report).context("Failed to serialize report as YAML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{calculate_gpa, GradingConfig};
    use crate::record::demo_record;

    fn sample_report() -> (Report, StudentRecord) {
        let record = demo_record();
        let report = calculate_gpa(&record, &GradingConfig::default());
        (report, record)
    }

    #[test]
    fn test_format_gpa() {
        assert_eq!(format_gpa(2.814), "2.814");
        assert_eq!(format_gpa(0.0), "0.000");
        assert_eq!(format_gpa(4.1), "4.100");
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(3.0), "3.00");
    }

    #[test]
    fn test_truncate_title_short() {
        assert_eq!(truncate_title("Physics", 20), "Physics");
    }

    #[test]
    fn test_truncate_title_long() {
        assert_eq!(
            truncate_title("Introduction to Computer Science", 15),
            "Introduction..."
        );
    }

    #[test]
    fn test_truncate_title_very_narrow() {
        assert_eq!(truncate_title("Calculus", 3), "Cal");
    }

    #[test]
    fn test_format_report_table_rows() {
        let (report, record) = sample_report();
        let result = format_report_table(&report, &record, false);
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Oleksandr  GPA 2.814  (14 credits)");
        assert!(lines[1].starts_with(" 1. CS101"));
        assert!(lines[1].ends_with("3.00"));
        assert!(lines[2].contains("MA121"));
        assert!(lines[2].ends_with("4.00"));
        assert!(lines[4].starts_with(" 4. EN201"));
    }

    #[test]
    fn test_format_report_table_empty() {
        let record = StudentRecord::new("nobody", vec![]);
        let report = calculate_gpa(&record, &GradingConfig::default());
        let result = format_report_table(&report, &record, false);
        assert_eq!(result, "nobody  GPA 0.000  (0 credits)\nNo courses recorded.");
    }

    #[test]
    fn test_format_breakdown() {
        let (report, _) = sample_report();
        let result = format_breakdown(&report, false);
        assert!(result.contains("PH110\n  Score: 71.00\n  Points: 2.0\n  Weighted: 6.00"));
        assert!(result.contains("MA121\n  Score: 93.00\n  Points: 4.0 +0.1\n  Weighted: 16.40"));
    }

    #[test]
    fn test_format_tsv() {
        let (report, _) = sample_report();
        let result = format_tsv(&report);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "CS101\t5\t3.00");
        assert_eq!(lines[2], "PH110\t3\t2.00");
    }

    #[test]
    fn test_format_tsv_empty() {
        let record = StudentRecord::new("nobody", vec![]);
        let report = calculate_gpa(&record, &GradingConfig::default());
        assert_eq!(format_tsv(&report), "");
    }

    #[test]
    fn test_format_json_shape() {
        let (report, _) = sample_report();
        let json = format_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["student"], "Oleksandr");
        assert_eq!(value["gpa"], 2.814);
        assert_eq!(value["total_credits"], 14);
        assert_eq!(value["rows"][1]["course"], "MA121");
        assert_eq!(value["rows"][1]["points"], 4.0);
        assert_eq!(value["meta"]["bonus_policy"], "honors+0.1");
        assert!(value.get("breakdown").is_none());
    }

    #[test]
    fn test_format_yaml_contains_fields() {
        let (report, _) = sample_report();
        let yaml = format_yaml(&report).unwrap();
        assert!(yaml.contains("Oleksandr"));
        assert!(yaml.contains("total_credits: 14"));
        assert!(yaml.contains("bonus_policy:"));
    }
}
