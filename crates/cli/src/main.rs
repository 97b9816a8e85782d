use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crtgen::{load_params, sha256_file};
use serde::Serialize;

use tagger_core::builder::{self, BuildOptions, Summary};
use tagger_core::output;
use tagger_core::params::GeometryParams;

/// Cosmic-ray-tagger geometry generator CLI.
///
/// This CLI is a thin wrapper around `tagger-core` (exposed in code as
/// `tagger_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "crtgen",
    version,
    about = "Cosmic-ray-tagger geometry generator",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the CRT geometry document and the FEB channel map.
    ///
    /// This will:
    /// - Build every tagger, module, and strip volume.
    /// - Write the geometry as a GDML fragment (or a standalone document
    ///   with `--test-mode`).
    /// - Write the module-to-FEB channel map as CSV.
    Generate {
        /// Output path for the geometry document.
        #[arg(long, default_value = "crt.gdml")]
        out: PathBuf,

        /// Output path for the FEB channel map.
        #[arg(long, default_value = "feb_map.txt")]
        feb_map: PathBuf,

        /// Emit a standalone document: materials table, world volume, setup.
        #[arg(long, default_value_t = false)]
        test_mode: bool,

        /// Print per-tagger module and FEB id ranges while building.
        #[arg(long, default_value_t = false)]
        print_mod_ids: bool,

        /// JSON file with geometry parameter overrides. Only the fields
        /// present in the file are overridden.
        #[arg(long)]
        params: Option<PathBuf>,

        /// Emit a JSON generation report instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the geometry parameter set and derived module envelopes.
    Params {
        /// JSON file with geometry parameter overrides to apply first.
        #[arg(long)]
        params: Option<PathBuf>,

        /// Emit the full parameter set as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to a plain generation run if no command is provided.
    match cli.command.unwrap_or(Command::Generate {
        out: PathBuf::from("crt.gdml"),
        feb_map: PathBuf::from("feb_map.txt"),
        test_mode: false,
        print_mod_ids: false,
        params: None,
        json: false,
    }) {
        Command::Generate { out, feb_map, test_mode, print_mod_ids, params, json } => {
            generate_command(&out, &feb_map, test_mode, print_mod_ids, params.as_deref(), json)?
        }
        Command::Params { params, json } => params_command(params.as_deref(), json)?,
    }

    Ok(())
}

/// Generation report emitted with `--json`.
#[derive(Debug, Serialize)]
struct GenerateReport {
    version: &'static str,
    generated_at: String,
    gdml_path: String,
    gdml_sha256: String,
    feb_map_path: String,
    summary: Summary,
}

/// Build the geometry and write both output files.
fn generate_command(
    out: &std::path::Path,
    feb_map: &std::path::Path,
    test_mode: bool,
    print_mod_ids: bool,
    params_path: Option<&std::path::Path>,
    json: bool,
) -> Result<()> {
    let params = match params_path {
        Some(path) => load_params(path)?,
        None => GeometryParams::default(),
    };

    let opts = BuildOptions { test_mode, print_mod_ids };
    let build = builder::build(params, opts);

    build.doc.validate().context("Generated geometry document failed validation")?;

    output::write_gdml(&build.doc, out)
        .with_context(|| format!("Failed to write geometry to {}", out.display()))?;

    if !json {
        println!("{}", build.summary);
        println!("Writing dictionary to file...");
    }

    output::write_feb_map(&build.feb_map, feb_map)
        .with_context(|| format!("Failed to write FEB map to {}", feb_map.display()))?;

    if json {
        let report = GenerateReport {
            version: tagger_core::version(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            gdml_path: out.display().to_string(),
            gdml_sha256: sha256_file(out)?,
            feb_map_path: feb_map.display().to_string(),
            summary: build.summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Show the parameter set: derived envelopes in human mode, the full
/// serialized set with `--json`.
fn params_command(params_path: Option<&std::path::Path>, json: bool) -> Result<()> {
    let params = match params_path {
        Some(path) => load_params(path)?,
        None => GeometryParams::default(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    println!("crtgen v{}", tagger_core::version());
    println!();
    println!("Module envelopes (cm):");
    println!(
        "  MINOS: {} x {} x {}",
        params.minos_mod_height(),
        params.minos_mod_width(),
        params.minos_mod_length()
    );
    println!(
        "  CERN:  {} x {} x {}",
        params.cern_mod_width(),
        params.cern_mod_height(),
        params.cern_mod_width()
    );
    println!(
        "  DC:    {} x {} x {}",
        params.dc_mod_width(),
        params.dc_mod_height(),
        params.dc_strip_length + 2.0 * params.pad_dc + 2.0 * params.pad_strip
    );
    println!();
    println!("Shell (cm):");
    println!(
        "  {} x {} x {}",
        params.wv_width + 2.0 * params.side_crt_roll_offset + 1.1 * params.side_crt_stack_depth(),
        params.shell_y(),
        params.shell_z()
    );
    println!("  shell-WV offset: {}", params.shell_wv_offset());
    println!();
    println!("Strips per module: MINOS {}, CERN {} + {}, DC {} + {}", params.n_strips_minos,
        params.n_strips_cern, params.n_strips_cern, params.n_strips_dc, params.n_strips_dc);
    println!("Use --json for the full parameter set.");

    Ok(())
}
