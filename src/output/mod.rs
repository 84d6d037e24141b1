pub mod formatter;

pub use formatter::{
    format_breakdown, format_gpa, format_json, format_points, format_report_table, format_tsv,
    format_yaml, should_use_colors,
};
