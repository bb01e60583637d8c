//! rstdoc: render field-list docstrings as structured documentation.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `rstdoc < docstring.rst`
//! - **file mode**: `rstdoc -o docs -f json docstrings/*.rst`
//!
//! Recoverable parse problems are reported as `warning:` lines on stderr
//! and do not fail the run unless `--strict` is given.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use rstdoc::context::ParseContext;
use rstdoc::{parser, render};

#[derive(Parser)]
#[command(
    name = "rstdoc",
    about = "Parse reStructuredText field-list docstrings into structured sections"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Exit non-zero when any docstring produced parse errors
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one docstring from stdin, render to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let renderer = render::create_renderer(&cli.format)?;
    let result = parser::parse(&input, &ParseContext::default());
    for error in &result.errors {
        eprintln!("warning: <stdin>: {error}");
    }
    print!("{}", renderer.render(&result.sections));

    if cli.strict && !result.errors.is_empty() {
        anyhow::bail!("{} parse error(s)", result.errors.len());
    }
    Ok(())
}

/// file mode: parse each input file, write one rendered file per input.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files)?;
    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    let mut error_count = 0;
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let result = parser::parse(&content, &ParseContext::default());
        for error in &result.errors {
            eprintln!("warning: {}: {}", path.display(), error);
        }
        error_count += result.errors.len();

        let name = derive_output_name(&path.to_string_lossy());
        let out_path = output_dir.join(format!("{}.{}", name, ext));
        fs::write(&out_path, renderer.render(&result.sections))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    if cli.strict && error_count > 0 {
        anyhow::bail!("{} parse error(s)", error_count);
    }
    Ok(())
}

/// File extensions recognized as docstring files when scanning directories.
const SUPPORTED_EXTENSIONS: &[&str] = &["rst", "txt"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SUPPORTED_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the output file name (without extension) from a source path.
/// "docs/open.rst" → "open", "docs/open.txt" → "open"
fn derive_output_name(source: &str) -> String {
    let filename = source.rsplit('/').next().unwrap_or(source);
    filename
        .strip_suffix(".rst")
        .or_else(|| filename.strip_suffix(".txt"))
        .unwrap_or(filename)
        .to_string()
}
