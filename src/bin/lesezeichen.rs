//! CLI binary for lesezeichen.
//!
//! A thin shim over the library crate: one conversion per invocation,
//! a summary line on success, a single-line cause and non-zero exit on
//! failure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lesezeichen::core::{Bookmark, total_count};
use lesezeichen::{pdf, xml};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lesezeichen", version, about = "PDF outline (bookmark) toolkit")]
struct Cli {
    /// Debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a PDF's bookmarks into an XML file
    Extract {
        /// Input PDF
        pdf: PathBuf,
        /// Output XML file
        xml: PathBuf,
    },
    /// Add bookmarks from an XML file to a PDF
    Add {
        /// Input PDF
        pdf: PathBuf,
        /// Bookmark XML file
        xml: PathBuf,
        /// Output PDF (the input is never modified)
        output_pdf: PathBuf,
    },
    /// Print a PDF's bookmarks as an indented tree
    List {
        /// Input PDF
        pdf: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("lesezeichen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Extract { pdf, xml } => extract(&pdf, &xml),
        Command::Add {
            pdf,
            xml,
            output_pdf,
        } => add(&pdf, &xml, &output_pdf),
        Command::List { pdf } => list(&pdf),
    }
}

fn extract(pdf_path: &Path, xml_path: &Path) -> Result<()> {
    let forest = pdf::extract_outline(pdf_path)
        .with_context(|| format!("extracting bookmarks from {}", pdf_path.display()))?;
    if forest.is_empty() {
        bail!("{} contains no bookmarks", pdf_path.display());
    }

    xml::write_xml_file(&forest, xml_path)
        .with_context(|| format!("writing {}", xml_path.display()))?;

    println!(
        "exported {} top-level bookmarks ({} total) to {}",
        forest.len(),
        total_count(&forest),
        xml_path.display()
    );
    Ok(())
}

fn add(pdf_path: &Path, xml_path: &Path, output_path: &Path) -> Result<()> {
    let forest = xml::read_xml_file(xml_path)
        .with_context(|| format!("reading bookmarks from {}", xml_path.display()))?;
    if forest.is_empty() {
        bail!("{} contains no bookmarks", xml_path.display());
    }

    pdf::write_with_outline(pdf_path, &forest, output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "added {} top-level bookmarks ({} total) to {}",
        forest.len(),
        total_count(&forest),
        output_path.display()
    );
    Ok(())
}

fn list(pdf_path: &Path) -> Result<()> {
    let forest = pdf::extract_outline(pdf_path)
        .with_context(|| format!("extracting bookmarks from {}", pdf_path.display()))?;
    if forest.is_empty() {
        println!("{} contains no bookmarks", pdf_path.display());
        return Ok(());
    }

    println!(
        "{} top-level bookmarks ({} total)",
        forest.len(),
        total_count(&forest)
    );
    for bookmark in &forest {
        print_tree(bookmark, 0);
    }
    Ok(())
}

fn print_tree(bookmark: &Bookmark, depth: usize) {
    let indent = "  ".repeat(depth);
    match bookmark.page {
        Some(page) => println!("{indent}+- {} (page {page})", bookmark.title),
        None => println!("{indent}+- {} (page unresolved)", bookmark.title),
    }
    for child in &bookmark.children {
        print_tree(child, depth + 1);
    }
}
