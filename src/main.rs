use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use openapi_normalizer::{load_document, write_document, DocumentFormat, TransformPipeline};

#[derive(Parser, Debug)]
#[command(name = "openapi-normalizer")]
#[command(about = "Normalize an OpenAPI document for code-generator compatibility")]
struct Args {
    /// Path to the input OpenAPI document (.json, .yaml, or .yml)
    input: PathBuf,

    /// Where to write the normalized document (defaults to <stem>-normalized
    /// next to the input, preserving the format)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let (spec, format) = match load_document(&args.input) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            process::exit(1);
        }
    };

    println!("\n=== Normalizing {} ===", args.input.display());
    let pipeline = TransformPipeline::standard();
    let spec = pipeline.transform_with_progress(spec, |label| println!("  ✓ {}", label));

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, format));
    if let Err(e) = write_document(&spec, &output, format) {
        eprintln!("\n❌ Error: {}", e);
        process::exit(1);
    }

    println!("\n=== Normalization Complete ===");
    println!("  ✓ Output file: {}", output.display());
}

fn default_output_path(input: &Path, format: DocumentFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("openapi");
    input.with_file_name(format!("{}-normalized.{}", stem, format.extension()))
}
