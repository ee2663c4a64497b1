//! lettercorpus CLI - letter corpus assembly tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use lettercorpus::{
    hocr_files, render, Assembler, AssemblyStats, Collection, FinalizeOptions, HocrParser,
    JsonFormat,
};

#[derive(Parser)]
#[command(name = "lettercorpus")]
#[command(version)]
#[command(about = "Assemble letter corpora from annotated hOCR scans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a collection and write the finalized JSON corpus
    Build {
        /// Directory of annotated .hocr documents
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Which collection convention the documents follow
        #[arg(short, long, value_enum)]
        collection: CollectionName,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "corpus")]
        output: PathBuf,

        /// Output file name (defaults to corpus_<collection>.json)
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Drop records with no populated fields
        #[arg(long)]
        drop_empty: bool,
    },

    /// Assemble a collection and report the defect counters only
    Stats {
        /// Directory of annotated .hocr documents
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Which collection convention the documents follow
        #[arg(short, long, value_enum)]
        collection: CollectionName,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CollectionName {
    /// The Jeake family correspondence
    Jeake,
    /// The Marescoe-David merchant correspondence
    MarescoeDavid,
}

impl From<CollectionName> for Collection {
    fn from(name: CollectionName) -> Self {
        match name {
            CollectionName::Jeake => Collection::Jeake,
            CollectionName::MarescoeDavid => Collection::MarescoeDavid,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            input,
            collection,
            output,
            file,
            compact,
            drop_empty,
        }) => cmd_build(
            &input,
            collection.into(),
            &output,
            file.as_deref(),
            compact,
            drop_empty,
        ),
        Some(Commands::Stats { input, collection }) => cmd_stats(&input, collection.into()),
        None => {
            println!(
                "{}",
                "Usage: lettercorpus build <INPUT_DIR> --collection <COLLECTION>".yellow()
            );
            println!("       lettercorpus --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn assemble_directory(
    input: &Path,
    collection: Collection,
) -> Result<Assembler, Box<dyn std::error::Error>> {
    let paths = hocr_files(input)?;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut assembler = Assembler::new(collection);
    for path in &paths {
        pb.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        match HocrParser::parse_file(path) {
            Ok(page) => assembler.assemble_page(&page),
            Err(err) => {
                log::warn!("skipping {}: {}", path.display(), err);
                assembler.note_skipped_document();
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    Ok(assembler)
}

fn cmd_build(
    input: &Path,
    collection: Collection,
    output: &Path,
    file: Option<&str>,
    compact: bool,
    drop_empty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let assembler = assemble_directory(input, collection)?;
    let profile = assembler.profile();
    let (letters, stats) = assembler.finish();

    let options = FinalizeOptions::new().drop_empty_records(drop_empty);
    let records = lettercorpus::finalize(&letters, profile, &options);

    let file_name = file
        .map(str::to_string)
        .unwrap_or_else(|| format!("corpus_{}.json", profile.name));
    let output_path = output.join(&file_name);
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    render::write_json(&records, &output_path, format)?;

    println!(
        "\n{} {} letters from {} documents",
        "Assembled".green().bold(),
        records.len(),
        stats.documents
    );
    println!("{} {}", "Saved to".green(), output_path.display());
    print_defects(&stats);

    Ok(())
}

fn cmd_stats(input: &Path, collection: Collection) -> Result<(), Box<dyn std::error::Error>> {
    let assembler = assemble_directory(input, collection)?;
    let (_, stats) = assembler.finish();

    println!();
    println!("{}", "Assembly Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Documents".bold(), stats.documents);
    println!("{}: {}", "Lines".bold(), stats.lines);
    println!("{}: {}", "Letters".bold(), stats.letters);
    println!("{}: {}", "Skipped documents".bold(), stats.skipped_documents);
    println!("{}: {}", "Discarded lines".bold(), stats.discarded_lines);
    println!("{}: {}", "Unmatched MULTI lines".bold(), stats.unmatched_multi);
    println!("{}: {}", "Ambiguous MULTI lines".bold(), stats.ambiguous_multi);
    println!("{}: {}", "Unknown-tag lines".bold(), stats.unknown_tag_lines);

    Ok(())
}

fn print_defects(stats: &AssemblyStats) {
    let defects = stats.skipped_documents
        + stats.discarded_lines
        + stats.unmatched_multi
        + stats.ambiguous_multi
        + stats.unknown_tag_lines;
    if defects > 0 {
        println!(
            "{} {} defects tolerated (run `lettercorpus stats` or RUST_LOG=warn for details)",
            "Note:".yellow().bold(),
            defects
        );
    }
}
