use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use gradiff::archive::extractor::extract_archive_report;
use gradiff::archive::file_set::FileSet;
use gradiff::archive::submissions::group_submissions;
use gradiff::compare::{ComparisonResult, compare, compare_submissions};
use gradiff::diff::myers::LineTag;
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "gradiff",
    version = "0.1.0",
    about = "Compare a starter code archive against student submissions",
    long_about = "Extracts source files from zip archives and shows how each \
    submission diverges from the starter code, as unified line-level diffs \
    grouped by file and by submitter.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "compare",
        about = "Diff one submission archive against the starter archive"
    )]
    Compare {
        #[arg(index = 1, help = "Path to the starter zip")]
        starter: String,
        #[arg(index = 2, help = "Path to the submission zip")]
        submission: String,
    },
    #[command(
        name = "review",
        about = "Diff every submitter in a bulk download against the starter archive"
    )]
    Review {
        #[arg(index = 1, help = "Path to the starter zip")]
        starter: String,
        #[arg(index = 2, help = "Path to the bulk submissions zip")]
        submissions: String,
        #[arg(short, long, help = "Only show this submitter")]
        submitter: Option<String>,
        #[arg(short, long, help = "List submitter ids and exit")]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compare {
            starter,
            submission,
        } => {
            let baseline = extract(starter)?;
            let candidate = extract(submission)?;

            println!(
                "Starter: {} file(s), submission: {} file(s)",
                baseline.len(),
                candidate.len()
            );
            print_comparison(&compare(&baseline, &candidate));
        }
        Commands::Review {
            starter,
            submissions,
            submitter,
            list,
        } => {
            let baseline = extract(starter)?;
            let bytes = read_archive(submissions)?;
            let table = group_submissions(&bytes)
                .with_context(|| format!("Failed to read submissions archive {submissions}"))?;

            for skipped in table.skipped() {
                eprintln!(
                    "{}",
                    format!("skipped {}: {}", skipped.entry, skipped.reason).yellow()
                );
            }

            if *list {
                for id in table.submitter_ids() {
                    println!("{id}");
                }
                return Ok(());
            }

            if let Some(submitter) = submitter {
                let files = table
                    .get(submitter)
                    .with_context(|| format!("No submission found for `{submitter}`"))?;
                print_comparison(&compare(&baseline, files));
                return Ok(());
            }

            for (submitter, result) in compare_submissions(&baseline, &table).await? {
                println!("{}", format!("=== {submitter} ===").bold());
                print_comparison(&result);
            }
        }
    }

    Ok(())
}

fn read_archive(path: &str) -> Result<Vec<u8>> {
    std::fs::read(Path::new(path)).with_context(|| format!("Failed to read archive {path}"))
}

fn extract(path: &str) -> Result<FileSet> {
    let bytes = read_archive(path)?;
    let outcome = extract_archive_report(&bytes)
        .with_context(|| format!("Failed to extract archive {path}"))?;

    for skipped in &outcome.skipped {
        eprintln!(
            "{}",
            format!("skipped {}: {}", skipped.entry, skipped.reason).yellow()
        );
    }

    Ok(outcome.file_set)
}

fn print_comparison(result: &ComparisonResult) {
    if result.is_empty() {
        println!("No differences");
        return;
    }

    let summary = result.summary();
    println!(
        "{} file(s) differ ({} added, {} removed, {} modified)",
        result.len(),
        summary.added,
        summary.removed,
        summary.modified
    );

    for diff in result.iter() {
        println!("{}", format!("{} ({})", diff.path(), diff.status()).bold());

        for hunk in diff.hunks() {
            println!("{}", hunk.header().cyan());
            for line in hunk.lines() {
                let rendered = line.to_string();
                match line.tag() {
                    LineTag::Added => println!("{}", rendered.green()),
                    LineTag::Removed => println!("{}", rendered.red()),
                    LineTag::Context => println!("{rendered}"),
                }
            }
        }
    }
}
