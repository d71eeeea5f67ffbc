// SPDX-License-Identifier: MIT
//
// codeage — paint every line of a file by how long ago it last changed.
//
// This is the main binary that wires together all the crates:
//
//   codeage-blame → git blame / git diff, parsed into the two lookups
//   codeage-core  → date resolution, normalization, color mapping, toggle
//   codeage-term  → HSB colors and ANSI output
//
// Each run flows through:
//
//   path → Repository::line_map + Repository::annotate
//        → compute_line_colors → HighlightTracker::toggle → Painter
//        → painted_line per source line → stdout
//
// If blame fails the file is still printed, just without colors, and the
// exit status is 1.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use codeage_blame::{BlameError, Repository};
use codeage_core::{
    AgingError, ColorMapper, HighlightTracker, LineHighlighter, Normalizer, compute_line_colors,
};
use codeage_term::{CellColor, Hsb, ansi};

// ─── Options ────────────────────────────────────────────────────────────────

/// Show how old every line of a file is.
#[derive(Debug, Parser)]
#[command(name = "codeage", version, about)]
struct Args {
    /// File to annotate.
    path: PathBuf,

    /// How dates become coefficients: `age` (elapsed time) or `generation`
    /// (revision rank).
    #[arg(
        long,
        env = "CODEAGE_NORMALIZER",
        default_value_t = Normalizer::Generation,
        value_parser = PossibleValuesParser::new(Normalizer::ALL.map(Normalizer::name))
            .try_map(|name| name.parse::<Normalizer>()),
    )]
    normalizer: Normalizer,

    /// Which palette paints the lines.
    #[arg(long, env = "CODEAGE_PALETTE", value_enum, default_value_t = Palette::Adaptive)]
    palette: Palette,

    /// Terminal background color the adaptive palette blends with.
    #[arg(long, env = "CODEAGE_BACKGROUND", default_value = "#1e1e1e")]
    background: Hsb,

    /// Revision to blame against.
    #[arg(long, env = "CODEAGE_REV", default_value = "HEAD")]
    rev: String,

    /// Prefix each line with its line number.
    #[arg(short, long)]
    number: bool,

    /// Print the file without colors.
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Palette {
    /// Follow the terminal background.
    Adaptive,
    /// Warm gray, independent of the background.
    Fixed,
}

impl Args {
    const fn mapper(&self) -> ColorMapper {
        match self.palette {
            Palette::Adaptive => ColorMapper::Adaptive {
                background: self.background,
            },
            Palette::Fixed => ColorMapper::Fixed,
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Blame(#[from] BlameError),

    #[error(transparent)]
    Aging(#[from] AgingError),
}

// ─── Painter ────────────────────────────────────────────────────────────────

/// A line-indexed background color table. Unpainted lines stay
/// [`CellColor::Default`].
#[derive(Debug, Default)]
struct Painter {
    colors: Vec<CellColor>,
}

impl Painter {
    fn color(&self, line: usize) -> CellColor {
        self.colors.get(line).copied().unwrap_or_default()
    }
}

impl LineHighlighter for Painter {
    type Handle = usize;

    fn add_line_color(&mut self, line: usize, color: Hsb) -> usize {
        if self.colors.len() <= line {
            self.colors.resize(line + 1, CellColor::Default);
        }
        self.colors[line] = color.into();
        line
    }

    fn remove_highlight(&mut self, line: usize) {
        if let Some(slot) = self.colors.get_mut(line) {
            *slot = CellColor::Default;
        }
    }
}

// ─── Pipeline ───────────────────────────────────────────────────────────────

/// One color per line of `path` as it is in the working tree.
fn age_colors(path: &Path, num_lines: usize, args: &Args) -> Result<Vec<Hsb>, Error> {
    let repo = Repository::for_file(path)?;
    let mapping = repo.line_map(&args.rev)?;
    let annotation = repo.annotate(&args.rev)?;
    tracing::debug!(
        hunks = mapping.hunks().len(),
        annotated = annotation.len(),
        "collected blame"
    );
    let colors = compute_line_colors(num_lines, &mapping, &annotation, args.normalizer, args.mapper())?;
    Ok(colors)
}

fn render(out: &mut impl Write, lines: &[&str], painter: &Painter, number: bool) -> io::Result<()> {
    let width = lines.len().to_string().len();
    for (idx, line) in lines.iter().enumerate() {
        let color = painter.color(idx);
        if number {
            let numbered = format!("{:>width$} {line}", idx + 1);
            ansi::painted_line(out, &numbered, color)?;
        } else {
            ansi::painted_line(out, line, color)?;
        }
    }
    out.flush()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ─── Run ────────────────────────────────────────────────────────────────────

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Every line was written, painted unless `--no-color`.
    Success,
    /// Something failed. Lines may still have been written, unpainted.
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Failure => Self::FAILURE,
        }
    }
}

/// Print `args.path` to `out`, painted by line age.
///
/// Colors are all-or-nothing: if any line cannot be dated the whole file
/// is printed unpainted and the outcome is [`Outcome::Failure`].
fn run(args: &Args, out: &mut impl Write) -> Outcome {
    let source = match fs::read_to_string(&args.path) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(path = %args.path.display(), error = %e, "cannot read file");
            return Outcome::Failure;
        }
    };
    let lines: Vec<&str> = source.lines().collect();

    let mut painter = Painter::default();
    let mut outcome = Outcome::Success;

    if !args.no_color {
        let mut tracker = HighlightTracker::new();
        let toggled = tracker.toggle(args.path.clone(), &mut painter, || {
            age_colors(&args.path, lines.len(), args)
        });
        match toggled {
            Ok(toggled) => tracing::debug!(?toggled, "painted"),
            Err(e) => {
                tracing::error!(path = %args.path.display(), error = %e, "cannot date lines");
                outcome = Outcome::Failure;
            }
        }
    }

    if let Err(e) = render(out, &lines, &painter, args.number) {
        // A closed pipe (`codeage file | head`) is not worth a message.
        if e.kind() != io::ErrorKind::BrokenPipe {
            tracing::error!(error = %e, "cannot write output");
            return Outcome::Failure;
        }
    }

    outcome
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&args, &mut out).into()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
