//! Framelabel: frame-indexed annotation collections with track merging.
//!
//! A [`Collection`](collection::Collection) holds the shapes, tracks and
//! tags of one annotation job, answers "what is visible on frame N", and
//! folds several independently drawn objects into a single track.
//!
//! # Modules
//!
//! - [`model`]: Labels and the import/export payload types
//! - [`objects`]: Shapes, tracks, tags and their per-frame states
//! - [`collection`]: The collection, its object factory, and merging
//! - [`validation`]: Session validation and error reporting
//! - [`error`]: Error types for framelabel operations

pub mod collection;
pub mod error;
pub mod model;
pub mod objects;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use collection::Collection;
use model::{ClientId, Session};
use objects::{AnnotationObject, ObjectState};

pub use error::FramelabelError;

/// The framelabel CLI application.
#[derive(Parser)]
#[command(name = "framelabel")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a session file for errors and warnings.
    Validate(ValidateArgs),
    /// Import a session and summarize its contents.
    Inspect(InspectArgs),
    /// Print the objects visible on one frame.
    Frame(FrameArgs),
    /// Merge shapes and tracks into a single track.
    Merge(MergeArgs),
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Session file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, env = "FRAMELABEL_OUTPUT", default_value = "text")]
    output: String,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Session file to inspect.
    input: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, env = "FRAMELABEL_OUTPUT", default_value = "text")]
    output: String,
}

/// Arguments for the frame subcommand.
#[derive(clap::Args)]
struct FrameArgs {
    /// Session file to query.
    input: PathBuf,

    /// Frame number.
    #[arg(long)]
    frame: u64,

    /// Output format ('text' or 'json').
    #[arg(long, env = "FRAMELABEL_OUTPUT", default_value = "text")]
    output: String,
}

/// Arguments for the merge subcommand.
#[derive(clap::Args)]
struct MergeArgs {
    /// Session file to read.
    input: PathBuf,

    /// Client ids to merge, in merge order (as listed by 'inspect' or 'frame').
    #[arg(long, value_delimiter = ',', required = true)]
    ids: Vec<u64>,

    /// Where to write the resulting session.
    #[arg(short = 'o', long = "out")]
    out: PathBuf,
}

/// Run the framelabel CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FramelabelError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Frame(args)) => run_frame(args),
        Some(Commands::Merge(args)) => run_merge(args),
        None => {
            println!("framelabel {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Frame-indexed annotation collections with track merging.");
            println!();
            println!("Run 'framelabel --help' for usage information.");
            Ok(())
        }
    }
}

fn check_output_format(output: &str) -> Result<(), FramelabelError> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(FramelabelError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn load_collection(session: &Session) -> Result<Collection, FramelabelError> {
    let mut collection = Collection::new(session.labels.iter().cloned());
    collection.import(&session.annotations)?;
    Ok(collection)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, FramelabelError> {
    serde_json::to_string_pretty(value).map_err(|source| FramelabelError::SessionJsonWrite {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), FramelabelError> {
    check_output_format(&args.output)?;
    let session = model::io_json::read_session_json(&args.input)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_session(&session, &opts);

    if args.output == "json" {
        let json = report
            .to_json()
            .map_err(|source| FramelabelError::SessionJsonWrite {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        println!("{}", json);
    } else {
        print!("{}", report);
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(FramelabelError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), FramelabelError> {
    check_output_format(&args.output)?;
    let session = model::io_json::read_session_json(&args.input)?;
    let collection = load_collection(&session)?;
    let exported = collection.export();

    let keyframes: usize = exported.tracks.iter().map(|t| t.shapes.len()).sum();
    let frames: Vec<u64> = exported
        .tags
        .iter()
        .map(|t| t.frame)
        .chain(exported.shapes.iter().map(|s| s.frame))
        .chain(exported.tracks.iter().flat_map(|t| t.shapes.iter().map(|s| s.frame)))
        .collect();
    let first_frame = frames.iter().min();
    let last_frame = frames.iter().max();

    if args.output == "json" {
        let summary = serde_json::json!({
            "labels": collection.labels().len(),
            "tags": exported.tags.len(),
            "shapes": exported.shapes.len(),
            "tracks": exported.tracks.len(),
            "keyframes": keyframes,
            "first_frame": first_frame,
            "last_frame": last_frame,
        });
        println!("{}", to_json(&summary)?);
        return Ok(());
    }

    println!("Labels:    {}", collection.labels().len());
    println!("Tags:      {}", exported.tags.len());
    println!("Shapes:    {}", exported.shapes.len());
    println!(
        "Tracks:    {} ({} keyframe(s))",
        exported.tracks.len(),
        keyframes
    );
    if let (Some(first), Some(last)) = (first_frame, last_frame) {
        println!("Frames:    {}..={}", first, last);
    }
    println!();
    for object in collection.objects() {
        let label = collection
            .labels()
            .get(object.label_id())
            .map_or("?", |l| l.name.as_str());
        let kind = match object.shape_type() {
            Some(shape_type) => format!("{} {}", object.object_type(), shape_type),
            None => object.object_type().to_string(),
        };
        println!(
            "  #{:<5} {:<18} frame {:<6} label \"{}\"",
            object.client_id(),
            kind,
            object.frame(),
            label
        );
    }
    Ok(())
}

/// Execute the frame subcommand.
fn run_frame(args: FrameArgs) -> Result<(), FramelabelError> {
    check_output_format(&args.output)?;
    let session = model::io_json::read_session_json(&args.input)?;
    let collection = load_collection(&session)?;
    let states = collection.get(args.frame);

    if args.output == "json" {
        println!("{}", to_json(&states)?);
        return Ok(());
    }

    println!("Frame {}: {} object(s)", args.frame, states.len());
    for state in &states {
        let kind = match state.shape_type {
            Some(shape_type) => format!("{} {}", state.object_type, shape_type),
            None => state.object_type.to_string(),
        };
        let mut flags = Vec::new();
        if state.keyframe {
            flags.push("keyframe");
        }
        if state.outside {
            flags.push("outside");
        }
        if state.occluded {
            flags.push("occluded");
        }
        println!(
            "  #{:<5} {:<18} label \"{}\" z {} [{}]",
            state.client_id,
            kind,
            state.label.name,
            state.z_order,
            flags.join(", ")
        );
    }
    Ok(())
}

/// Execute the merge subcommand.
fn run_merge(args: MergeArgs) -> Result<(), FramelabelError> {
    let session = model::io_json::read_session_json(&args.input)?;
    let mut collection = load_collection(&session)?;

    let states = args
        .ids
        .iter()
        .map(|&id| state_at_start(&collection, ClientId(id)))
        .collect::<Result<Vec<_>, _>>()?;

    let merged = collection.merge(&states)?;

    let output = Session {
        labels: session.labels,
        annotations: collection.export(),
    };
    model::io_json::write_session_json(&args.out, &output)?;

    if let Some(client_id) = merged {
        println!(
            "Merged {} object(s) into track #{} ({} written to {})",
            states.len(),
            client_id,
            output.annotations.len(),
            args.out.display()
        );
    }
    Ok(())
}

/// The state of an object at its first frame (first keyframe for tracks),
/// as reported by `get`.
fn state_at_start(
    collection: &Collection,
    client_id: ClientId,
) -> Result<ObjectState, FramelabelError> {
    let object = collection.object(client_id).ok_or_else(|| {
        FramelabelError::Argument(format!("no object with client id {}", client_id))
    })?;
    let frame = match object {
        AnnotationObject::Track(track) => track.span().map_or(track.frame, |(first, _)| first),
        other => other.frame(),
    };

    collection
        .get(frame)
        .into_iter()
        .find(|s| s.client_id == client_id)
        .ok_or_else(|| {
            FramelabelError::Argument(format!(
                "object {} is not visible at frame {}",
                client_id, frame
            ))
        })
}
