//! Command-line interface for the scraper.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::client::CourseScraper;
use crate::config::{current_term, ScraperConfig};
use crate::error::Result;

/// UVic Course Scraper - course catalog and section data from UVic.
#[derive(Parser)]
#[command(name = "uvic-course-scraper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Write JSON to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every course in the catalog.
    Courses,

    /// Show catalog details of a course.
    Course {
        /// Subject code (e.g., CSC)
        subject: String,

        /// Course number (e.g., 355)
        code: String,
    },

    /// Show catalog details of a course by catalog pid.
    CourseByPid {
        /// Catalog pid (e.g., ByS23Pp7E)
        pid: String,
    },

    /// List the sections of a course offered in a term.
    Sections {
        /// Subject code (e.g., CSC)
        subject: String,

        /// Course number (e.g., 355)
        code: String,

        /// Term in YYYYMM format (default: current term)
        #[arg(short, long)]
        term: Option<String>,
    },

    /// Show seats, waitlist seats and restrictions of a section.
    Seats {
        /// Course reference number (e.g., 10801)
        crn: String,

        /// Term in YYYYMM format (default: current term)
        #[arg(short, long)]
        term: Option<String>,
    },
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    execute(Cli::parse()).await
}

/// Execute a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let scraper = CourseScraper::new(ScraperConfig::from_env())?;
    let output = cli.output.as_deref();

    match cli.command {
        Commands::Courses => {
            let pb = spinner("Fetching catalog...");
            let result = scraper.get_all_courses().await;
            pb.finish_and_clear();
            emit(&result?, output)
        }
        Commands::Course { subject, code } => {
            eprintln!(
                "{} {} {}",
                style("Fetching").bold(),
                style(&subject).cyan(),
                style(&code).cyan()
            );
            let pb = spinner("Resolving catalog id...");
            let result = scraper.get_course_details(&subject, &code).await;
            pb.finish_and_clear();
            emit(&result?, output)
        }
        Commands::CourseByPid { pid } => {
            let pb = spinner("Fetching course...");
            let result = scraper.get_course_details_by_pid(&pid).await;
            pb.finish_and_clear();
            emit(&result?, output)
        }
        Commands::Sections {
            subject,
            code,
            term,
        } => {
            let term = term.unwrap_or_else(current_term);
            eprintln!(
                "{} {} {} for term {}",
                style("Fetching sections of").bold(),
                style(&subject).cyan(),
                style(&code).cyan(),
                style(&term).green()
            );
            let pb = spinner("Fetching class schedule listing...");
            let result = scraper.get_course_sections(&term, &subject, &code).await;
            pb.finish_and_clear();
            let sections = result?;
            eprintln!("  Sections: {}", sections.data.len());
            emit(&sections, output)
        }
        Commands::Seats { crn, term } => {
            let term = term.unwrap_or_else(current_term);
            let pb = spinner("Fetching class details...");
            let result = scraper.get_section_seats(&term, &crn).await;
            pb.finish_and_clear();
            emit(&result?, output)
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Write `value` as pretty JSON to `output`, or to stdout when `None`.
pub fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")?;
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
