//! `fatoora pdf-meta` -- Read or replace PDF document metadata.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use fatoora_render::{read_metadata, write_metadata, PdfMetadata};

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::{print_json, print_kv};

#[derive(Args)]
pub struct PdfMetaArgs {
    #[command(subcommand)]
    action: PdfMetaAction,
}

#[derive(Subcommand)]
enum PdfMetaAction {
    /// Print the document info dictionary
    Read {
        /// PDF file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the document info dictionary
    ///
    /// Entries not supplied are removed. Dates may be given as
    /// "dd/mm/YYYY, HH:MM:SS" (stored as UTC) or in PDF form.
    Write {
        /// PDF file to read
        file: PathBuf,
        /// Where to save the result
        #[arg(short, long)]
        out: PathBuf,
        /// JSON object of entries, as printed by `read --json`
        #[arg(long = "from-json")]
        from_json: Option<PathBuf>,
        /// Entry as KEY=VALUE; applied after --from-json
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

pub fn run(args: PdfMetaArgs) -> Result<(), CliError> {
    match args.action {
        PdfMetaAction::Read { file, json } => {
            let metadata = read_metadata(&read_input(&file)?)?;
            if json {
                print_json(&metadata);
            } else if metadata.is_empty() {
                println!("No document info in {}", file.display());
            } else {
                for (key, value) in &metadata {
                    print_kv(&format!("{}:", key), value);
                }
            }
            Ok(())
        }
        PdfMetaAction::Write {
            file,
            out,
            from_json,
            set,
        } => {
            let mut metadata = match &from_json {
                Some(path) => load_json_metadata(path)?,
                None => PdfMetadata::new(),
            };
            apply_assignments(&mut metadata, &set)?;

            let pdf = write_metadata(&read_input(&file)?, &metadata)?;
            write_output(&out, &pdf)?;
            print_kv("Entries:", &metadata.len().to_string());
            print_kv("Saved:", &out.display().to_string());
            Ok(())
        }
    }
}

fn load_json_metadata(path: &Path) -> Result<PdfMetadata, CliError> {
    let bytes = read_input(path)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        CliError::validation(format!(
            "{}: expected a JSON object of strings: {}",
            path.display(),
            e
        ))
    })
}

fn apply_assignments(metadata: &mut PdfMetadata, assignments: &[String]) -> Result<(), CliError> {
    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::validation(format!("'{}' is not KEY=VALUE", assignment)))?;
        let key = key.trim().trim_start_matches('/');
        if key.is_empty() {
            return Err(CliError::validation(format!("'{}' has an empty key", assignment)));
        }
        metadata.insert(key.to_string(), value.to_string());
    }
    Ok(())
}
