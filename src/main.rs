//! Shape-packing feasibility checker.
//!
//! Reads surface lines of the form `<W>x<H>: <n0> .. <n5>`, attempts to
//! place the required shape instances onto each surface, and prints how
//! many surfaces could be filled.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use gridfit::render::format_surface;
use gridfit::{Catalog, FeasibilityOracle, SearchConfig, Surface};

/// Counts how many input surfaces can hold their required shapes.
#[derive(Parser)]
#[command(name = "gridfit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file with one `<W>x<H>: <n0> .. <n5>` line per surface.
    input: PathBuf,

    /// File with six 3x3 shape patterns separated by blank lines;
    /// defaults to the built-in catalog.
    #[arg(long)]
    shapes: Option<PathBuf>,

    /// Seed for the randomized search.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Anchor-search restarts allowed per shape before giving up.
    #[arg(long, default_value_t = 256)]
    max_restarts: usize,

    /// Verify with exhaustive backtracking instead of the randomized
    /// heuristic.
    #[arg(long)]
    exhaustive: bool,

    /// Render each filled surface's packing.
    #[arg(long)]
    show: bool,

    /// Abort on a malformed surface line instead of skipping it.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match &cli.shapes {
        Some(path) => load_catalog(path)?,
        None => Catalog::standard(),
    };

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let mut surfaces = parse_surfaces(&text, cli.strict)?;

    let config = SearchConfig {
        seed: cli.seed,
        max_restarts: cli.max_restarts,
        exhaustive: cli.exhaustive,
    };
    let feasible = FeasibilityOracle::new(config).evaluate_batch(&mut surfaces, &catalog);

    if cli.show {
        for surface in surfaces.iter().filter(|s| s.is_filled()) {
            println!("{}x{}", surface.width(), surface.height());
            print!("{}", format_surface(surface));
            println!();
        }
    }

    println!("{feasible}");
    Ok(())
}

/// Parses every surface line in the input.
///
/// Lines without an `x` token (blank lines, shape blocks, headers) are
/// not surface lines and are ignored. Malformed surface lines are
/// skipped with a warning, or abort the run in strict mode.
fn parse_surfaces(text: &str, strict: bool) -> Result<Vec<Surface>> {
    let mut surfaces = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if !line.contains('x') {
            continue;
        }
        match Surface::parse(line) {
            Ok(surface) => surfaces.push(surface),
            Err(err) if strict => {
                return Err(anyhow::Error::from(err).context(format!("line {}", number + 1)));
            }
            Err(err) => warn!("skipping line {}: {err}", number + 1),
        }
    }
    Ok(surfaces)
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let patterns: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();
    Catalog::from_patterns(&patterns).context("parsing shape catalog")
}
