use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gpa_report::grading::{
    calculate_gpa, validate_grading, validate_record, GpaCalculator, GradingConfig, Report,
};
use gpa_report::output;
use gpa_report::record::{demo_record, Course, StudentRecord};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_MISMATCH: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    #[default]
    Table,
    Tsv,
    Json,
    Yaml,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Engine {
    /// Single pass over the courses
    #[default]
    Flat,
    /// Step-by-step calculator object
    Stepwise,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the GPA report (default if no subcommand)
    Report {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: Format,

        /// Which computation to use
        #[arg(short, long, value_enum, default_value_t)]
        engine: Engine,
    },
    /// Compute the report both ways and check they agree
    Compare,
}

#[derive(Parser, Debug)]
#[command(name = "gpa-report")]
#[command(about = "Curved, credit-weighted GPA report", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-course breakdown
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Student name (defaults to the sample record's name)
    #[arg(short, long, global = true)]
    student: Option<String>,

    /// Course as CODE:CREDITS:SCORE[:ABSENCES[:TITLE]], repeatable.
    /// Without any, a sample record is graded.
    #[arg(long = "course", value_name = "SPEC", global = true)]
    courses: Vec<String>,

    /// Flat amount added to every raw score (default 0)
    #[arg(long, allow_negative_numbers = true, global = true)]
    curve: Option<f64>,

    /// Bonus policy, e.g. "honors+0.1" (default) or "none"
    #[arg(long, global = true)]
    bonus_policy: Option<String>,

    /// Reject non-positive credits, out-of-range scores and malformed policies
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "gpa_report=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_record(student: Option<&str>, specs: &[String]) -> Result<StudentRecord> {
    let mut record = if specs.is_empty() {
        demo_record()
    } else {
        let courses = specs
            .iter()
            .map(|spec| {
                spec.parse::<Course>()
                    .with_context(|| format!("Invalid --course '{}'", spec))
            })
            .collect::<Result<Vec<_>>>()?;
        StudentRecord::new("student", courses)
    };

    if let Some(name) = student {
        record.student = name.to_string();
    }
    Ok(record)
}

fn render(report: &Report, record: &StudentRecord, format: Format, verbose: bool) -> Result<String> {
    let rendered = match format {
        Format::Table => {
            let use_colors = output::should_use_colors();
            let table = output::format_report_table(report, record, use_colors);
            if verbose && !report.breakdown.is_empty() {
                format!("{}\n\n{}", table, output::format_breakdown(report, use_colors))
            } else {
                table
            }
        }
        Format::Tsv => output::format_tsv(report),
        Format::Json => output::format_json(report)?,
        Format::Yaml => output::format_yaml(report)?,
    };
    Ok(rendered)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Report {
        format: Format::default(),
        engine: Engine::default(),
    });

    let record = match build_record(cli.student.as_deref(), &cli.courses) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    let config = GradingConfig {
        curve: cli.curve,
        bonus_policy: cli.bonus_policy,
    };

    info!(
        student = %record.student,
        courses = record.courses.len(),
        "loaded record"
    );
    debug!(?config, "grading config");

    if cli.strict {
        let mut errors = Vec::new();
        if let Err(e) = validate_grading(&config) {
            errors.extend(e);
        }
        if let Err(e) = validate_record(&record) {
            errors.extend(e);
        }
        if !errors.is_empty() {
            eprintln!("Validation errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    }

    match command {
        Commands::Report { format, engine } => {
            let report = match engine {
                Engine::Flat => calculate_gpa(&record, &config),
                Engine::Stepwise => GpaCalculator::new(&record, &config).run(),
            };
            debug!(gpa = report.gpa, total_credits = report.total_credits, ?engine, "computed report");

            match render(&report, &record, format, cli.verbose) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_FAILURE);
                }
            }
        }
        Commands::Compare => {
            let flat = calculate_gpa(&record, &config);
            let stepwise = GpaCalculator::new(&record, &config).run();

            println!("single-pass: GPA {}", output::format_gpa(flat.gpa));
            println!("stepwise:    GPA {}", output::format_gpa(stepwise.gpa));

            let diffs = flat.differences(&stepwise);
            if !diffs.is_empty() {
                eprintln!("Reports differ:");
                for diff in diffs {
                    eprintln!("  - {}", diff);
                }
                std::process::exit(EXIT_MISMATCH);
            }
            println!("OK: reports match ({} courses)", flat.rows.len());
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
