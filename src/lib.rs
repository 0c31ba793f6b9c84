//! bboxeval: bounding-box evaluation and perturbation.
//!
//! bboxeval scores object-detection output against ground truth and
//! synthesizes noisy variants of known-good boxes for robustness testing.
//! Every operation works on in-memory values; random draws come from a
//! caller-supplied generator so runs can be reproduced from a seed.
//!
//! # Modules
//!
//! - [`geometry`]: the `(top, left, bottom, right)` box type, image extents, and IoU
//! - [`metrics`]: precision, recall, and average precision at k
//! - [`perturb`]: batch-shared jitter clamped to an image extent
//! - [`sample`]: random box dropout
//! - [`io_json`]: JSON staging of box lists for the CLI
//! - [`error`]: Error types for bboxeval operations

pub mod error;
pub mod geometry;
pub mod io_json;
pub mod logging;
pub mod metrics;
pub mod perturb;
pub mod sample;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};

pub use error::BboxEvalError;
use geometry::{BBox, ImageExtent};
use perturb::{FactorMapping, PerturbOptions};

/// The bboxeval CLI application.
#[derive(Parser)]
#[command(name = "bboxeval")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Print diagnostics to stderr (-v for debug, -vv for trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Intersection over union of two boxes.
    Iou(IouArgs),
    /// Precision from true and false positive counts.
    Precision(PrecisionArgs),
    /// Recall from true positive and false negative counts.
    Recall(RecallArgs),
    /// Average precision at k of one ranked prediction list.
    Apk(ApkArgs),
    /// Mean average precision at k over paired lists from a JSON file.
    Mapk(MapkArgs),
    /// Jitter the position and size of a box list.
    Perturb(PerturbArgs),
    /// Randomly drop boxes from a box list.
    Sample(SampleArgs),
}

#[derive(clap::Args)]
struct IouArgs {
    /// First box as top,left,bottom,right.
    a: BBox,

    /// Second box as top,left,bottom,right.
    b: BBox,
}

#[derive(clap::Args)]
struct PrecisionArgs {
    /// True positives.
    #[arg(long)]
    tp: usize,

    /// False positives.
    #[arg(long)]
    fp: usize,
}

#[derive(clap::Args)]
struct RecallArgs {
    /// True positives.
    #[arg(long)]
    tp: usize,

    /// False negatives.
    #[arg(long = "fn")]
    false_negatives: usize,
}

#[derive(clap::Args)]
struct ApkArgs {
    /// Comma-separated ground-truth labels (order does not matter).
    #[arg(long, value_delimiter = ',', required = true)]
    actual: Vec<String>,

    /// Comma-separated predicted labels, best first.
    #[arg(long, value_delimiter = ',', required = true)]
    predicted: Vec<String>,

    /// Number of predictions to consider.
    #[arg(short, default_value_t = metrics::DEFAULT_K)]
    k: usize,
}

#[derive(clap::Args)]
struct MapkArgs {
    /// JSON file with "actual" and "predicted" lists of label lists.
    input: PathBuf,

    /// Number of predictions to consider per list.
    #[arg(short, default_value_t = metrics::DEFAULT_K)]
    k: usize,
}

#[derive(clap::Args)]
struct PerturbArgs {
    /// JSON file with a list of [top, left, bottom, right] boxes.
    input: PathBuf,

    /// Image extent as HEIGHTxWIDTH.
    #[arg(long)]
    extent: ImageExtent,

    /// Do not shift box positions.
    #[arg(long)]
    no_position: bool,

    /// Position offsets are drawn from [-factor, factor).
    #[arg(long, default_value_t = 5.0)]
    position_factor: f64,

    /// Do not change box sizes.
    #[arg(long)]
    no_size: bool,

    /// Size offsets are drawn from [-factor, factor).
    #[arg(long, default_value_t = 5.0)]
    size_factor: f64,

    /// Bound the position draw by --size-factor and the size draw by
    /// --position-factor, as the legacy tooling did.
    #[arg(long)]
    swapped_factors: bool,

    /// Seed for reproducible output.
    #[arg(long, env = "BBOXEVAL_SEED")]
    seed: Option<u64>,

    /// Write boxes here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SampleArgs {
    /// JSON file with a list of [top, left, bottom, right] boxes.
    input: PathBuf,

    /// Probability of dropping each box.
    #[arg(long, default_value_t = sample::DEFAULT_DROP_PROBABILITY)]
    drop_prob: f64,

    /// Seed for reproducible output.
    #[arg(long, env = "BBOXEVAL_SEED")]
    seed: Option<u64>,

    /// Write boxes here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Run the bboxeval CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BboxEvalError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Some(Commands::Iou(args)) => {
            println!("{}", geometry::iou(&args.a, &args.b)?);
            Ok(())
        }
        Some(Commands::Precision(args)) => {
            println!("{}", metrics::precision(args.tp, args.fp)?);
            Ok(())
        }
        Some(Commands::Recall(args)) => {
            println!("{}", metrics::recall(args.tp, args.false_negatives)?);
            Ok(())
        }
        Some(Commands::Apk(args)) => {
            let ap = metrics::average_precision_at_k(&args.actual, &args.predicted, args.k)?;
            println!("{}", ap);
            Ok(())
        }
        Some(Commands::Mapk(args)) => run_mapk(args),
        Some(Commands::Perturb(args)) => run_perturb(args),
        Some(Commands::Sample(args)) => run_sample(args),
        None => {
            println!("bboxeval {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Bounding-box evaluation and perturbation.");
            println!();
            println!("Run 'bboxeval --help' for usage information.");
            Ok(())
        }
    }
}

fn run_mapk(args: MapkArgs) -> Result<(), BboxEvalError> {
    let input = io_json::read_ranking_json(&args.input)?;
    if input.actual.len() != input.predicted.len() {
        tracing::warn!(
            actual = input.actual.len(),
            predicted = input.predicted.len(),
            "list counts differ, extra lists are ignored"
        );
    }

    let map = metrics::mean_average_precision_at_k(&input.actual, &input.predicted, args.k)?;
    println!("{}", map);
    Ok(())
}

fn run_perturb(args: PerturbArgs) -> Result<(), BboxEvalError> {
    let mut boxes = io_json::read_boxes_json(&args.input)?;

    let opts = PerturbOptions {
        noise_position: !args.no_position,
        position_factor: args.position_factor,
        noise_size: !args.no_size,
        size_factor: args.size_factor,
        factor_mapping: if args.swapped_factors {
            FactorMapping::Swapped
        } else {
            FactorMapping::Direct
        },
    };

    let offsets = if let Some(seed) = args.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        perturb::perturb_boxes(&mut boxes, &args.extent, &opts, &mut rng)?
    } else {
        let mut rng = rand::rng();
        perturb::perturb_boxes(&mut boxes, &args.extent, &opts, &mut rng)?
    };

    emit_boxes(&boxes, args.output.as_deref())?;
    if args.output.is_some() {
        println!(
            "Perturbed {} box(es): position offset ({}, {}), size offset ({}, {})",
            boxes.len(),
            offsets.position.dy,
            offsets.position.dx,
            offsets.size.dy,
            offsets.size.dx
        );
    }
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<(), BboxEvalError> {
    let boxes = io_json::read_boxes_json(&args.input)?;

    let kept = if let Some(seed) = args.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        sample::sample_keep(&boxes, args.drop_prob, &mut rng)?
    } else {
        let mut rng = rand::rng();
        sample::sample_keep(&boxes, args.drop_prob, &mut rng)?
    };

    emit_boxes(&kept, args.output.as_deref())?;
    if args.output.is_some() {
        println!("Kept {} of {} box(es)", kept.len(), boxes.len());
    }
    Ok(())
}

fn emit_boxes(boxes: &[BBox], output: Option<&Path>) -> Result<(), BboxEvalError> {
    match output {
        Some(path) => io_json::write_boxes_json(path, boxes),
        None => {
            let json = io_json::to_json_string(boxes).map_err(|source| {
                BboxEvalError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", json);
            Ok(())
        }
    }
}
