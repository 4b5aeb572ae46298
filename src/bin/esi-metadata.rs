//! ESI Metadata CLI
//!
//! Command-line interface for inspecting swagger metadata and resolving
//! endpoint keys into request descriptors.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use esi_metadata::{
    load_document_auto, scan_parameters, ParamFilter, ParameterLocation, SpecStore,
};

#[derive(Parser)]
#[command(name = "esi-metadata")]
#[command(about = "Resolve swagger metadata into request descriptors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an endpoint key into a request descriptor
    Resolve {
        /// Metadata source: file path or URL (http:// or https://)
        spec: String,

        /// Endpoint key, e.g. "/markets/{region_id}/orders/"
        #[arg(long, short)]
        key: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Cache file for a URL source: read it when present, write it after fetching
        #[arg(long)]
        cache: Option<PathBuf>,
    },

    /// List the endpoint keys in a metadata document
    Endpoints {
        /// Metadata source: file path or URL
        spec: String,

        /// Cache file for a URL source
        #[arg(long)]
        cache: Option<PathBuf>,
    },

    /// Survey parameter names across all endpoints
    Params {
        /// Metadata source: file path or URL
        spec: String,

        /// Filter by location: path, query, header, body, or formData
        #[arg(long)]
        location: Option<String>,

        /// Filter by required flag
        #[arg(long, action = clap::ArgAction::Set)]
        required: Option<bool>,

        /// Only parameters that carry a default value
        #[arg(long)]
        with_default: bool,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Treat endpoints that fail to resolve as an error
        #[arg(long)]
        strict: bool,

        /// Cache file for a URL source
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve {
            spec,
            key,
            output,
            pretty,
            cache,
        } => run_resolve(&spec, &key, output, pretty, cache),

        Commands::Endpoints { spec, cache } => run_endpoints(&spec, cache),

        Commands::Params {
            spec,
            location,
            required,
            with_default,
            format,
            strict,
            cache,
        } => run_params(ParamsArgs {
            spec,
            location,
            required,
            with_default,
            format,
            strict,
            cache,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Load the metadata document and build the store, honoring `--cache`.
fn load_store(source: &str, cache: Option<PathBuf>) -> Result<SpecStore, u8> {
    let document = match cache {
        #[cfg(feature = "remote")]
        Some(path) if esi_metadata::is_url(source) => {
            esi_metadata::load_or_fetch(&path, source).map_err(|e| {
                eprintln!("Error: {}", e);
                e.exit_code() as u8
            })?
        }
        _ => load_document_auto(source).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?,
    };

    SpecStore::from_document(document).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })
}

fn run_resolve(
    source: &str,
    key: &str,
    output: Option<PathBuf>,
    pretty: bool,
    cache: Option<PathBuf>,
) -> Result<(), u8> {
    let store = load_store(source, cache)?;

    let request = store.resolve(key).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&request)
    } else {
        serde_json::to_string(&request)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_endpoints(source: &str, cache: Option<PathBuf>) -> Result<(), u8> {
    let store = load_store(source, cache)?;

    for key in store.endpoints() {
        println!("{}", key);
    }

    Ok(())
}

struct ParamsArgs {
    spec: String,
    location: Option<String>,
    required: Option<bool>,
    with_default: bool,
    format: String,
    strict: bool,
    cache: Option<PathBuf>,
}

fn run_params(args: ParamsArgs) -> Result<(), u8> {
    let location = match args.location.as_deref() {
        None => None,
        Some(value) => Some(ParameterLocation::parse(value).ok_or_else(|| {
            eprintln!(
                "Error: unknown location \"{}\": expected path, query, header, body, or formData",
                value
            );
            2u8
        })?),
    };

    let store = load_store(&args.spec, args.cache)?;

    let filter = ParamFilter {
        location,
        required: args.required,
        with_default: args.with_default,
    };
    let scan = scan_parameters(&store, &filter);

    if args.format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&scan).map_err(|e| {
                eprintln!("Error serializing output: {}", e);
                2u8
            })?
        );
    } else {
        for name in &scan.names {
            println!("{}", name);
        }

        if !scan.is_clean() {
            eprintln!("Endpoints that failed to resolve:");
            for failure in &scan.failures {
                eprintln!("  {}: {}", failure.key, failure.message);
            }
        }
    }

    if args.strict && !scan.is_clean() {
        return Err(1);
    }

    Ok(())
}
