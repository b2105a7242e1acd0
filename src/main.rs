#![deny(missing_docs)]

//! # REST OpenAPI CLI
//!
//! Reads a resource-tree definition file and writes the OpenAPI document
//! derived from it.

use clap::{Args, Parser, Subcommand};
use rest_openapi::{
    generate, render, write_document, AncestorSegments, ApiDefinition, AppResult, ItemResponses,
    OutputFormat, UnsupportedFields,
};
use std::path::PathBuf;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate OpenAPI documents from REST resource trees")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an OpenAPI document from a resource definition file.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Resource definition file (YAML or JSON).
    #[arg(short, long, env = "REST_OPENAPI_INPUT")]
    input: PathBuf,

    /// Output file. Prints to stdout when omitted.
    #[arg(short, long, env = "REST_OPENAPI_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format. Inferred from the output extension when omitted.
    #[arg(short, long, value_enum, env = "REST_OPENAPI_FORMAT")]
    format: Option<OutputFormat>,

    /// Overrides the API title.
    #[arg(long)]
    title: Option<String>,

    /// Overrides the API version.
    #[arg(long)]
    api_version: Option<String>,

    /// Path segment form of ancestor resources.
    #[arg(long, value_enum, env = "REST_OPENAPI_ANCESTOR_SEGMENTS")]
    ancestor_segments: Option<AncestorSegments>,

    /// Body shape of single-item responses.
    #[arg(long, value_enum, env = "REST_OPENAPI_ITEM_RESPONSES")]
    item_responses: Option<ItemResponses>,

    /// What to do with fields that have no OpenAPI mapping.
    #[arg(long, value_enum, env = "REST_OPENAPI_UNSUPPORTED_FIELDS")]
    unsupported_fields: Option<UnsupportedFields>,
}

fn execute(args: &GenerateArgs) -> AppResult<()> {
    let mut definition = ApiDefinition::load(&args.input)?;
    if let Some(title) = &args.title {
        definition.info.title = title.clone();
    }
    if let Some(version) = &args.api_version {
        definition.info.version = version.clone();
    }

    let mut config = definition.settings.clone().unwrap_or_default();
    if let Some(segments) = args.ancestor_segments {
        config.ancestor_segments = segments;
    }
    if let Some(shape) = args.item_responses {
        config.item_responses = shape;
    }
    if let Some(policy) = args.unsupported_fields {
        config.unsupported_fields = policy;
    }
    tracing::debug!(?config, input = %args.input.display(), "loaded definition");

    let index = definition.to_index()?;
    let generation = generate(&index, definition.info(), &config)?;
    for diagnostic in &generation.diagnostics {
        tracing::warn!(%diagnostic, "property omitted");
    }

    let format = args
        .format
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or_default();

    match &args.output {
        Some(path) => write_document(path, &generation.document, format),
        None => {
            print!("{}", render(&generation.document, format)?);
            Ok(())
        }
    }
}

fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(&logging::LoggingConfig::from_verbosity(cli.verbose))?;

    match &cli.command {
        Commands::Generate(args) => execute(args)?,
    }

    Ok(())
}
