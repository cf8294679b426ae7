//! gfxdoc — generate documentation from `(% ... %)` doc-strings in gfx sources.
//!
//! Two modes:
//!
//! - **stdin mode**: `gfxdoc < color.cpp` writes the rendered module to stdout
//! - **file mode**: `gfxdoc -f html -o docs/ Source/*.cpp Source/*.h`
//!
//! The JSON format writes every module into one array (stdout or the file
//! given with `-o`). Page formats write one file per module into the `-o`
//! directory.

use anyhow::{bail, Context, Result};
use clap::Parser;
use gfxdoc::model::ModuleDoc;
use gfxdoc::render::{self, Layout, RenderOptions, Renderer};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gfxdoc",
    about = "Generate documentation from (% ... %) doc-strings in gfx source files"
)]
struct Cli {
    /// Input files, directories, or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output file (json) or directory (html, markdown). Defaults to stdout for json.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), html, markdown
    #[arg(short = 'f', long, alias = "output-type", default_value = "json")]
    format: String,

    /// Emit absent fields as null / empty lists in json output
    #[arg(long)]
    include_empty: bool,

    /// Log progress for every input
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Do not report scan warnings
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

/// One input to extract from.
struct Unit {
    /// File name, `None` for stdin
    name: Option<String>,
    text: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let renderer = render::create_renderer(
        &cli.format,
        RenderOptions {
            include_empty: cli.include_empty,
        },
    )?;

    let from_stdin = cli.files.is_empty();
    let units = if from_stdin {
        vec![read_stdin()?]
    } else {
        read_files(&cli.files)?
    };

    let modules: Vec<ModuleDoc> = units.iter().map(extract_unit).collect();

    match renderer.layout() {
        Layout::Combined => write_combined(renderer.as_ref(), &modules, cli.output.as_deref()),
        Layout::PerModule => match cli.output.as_deref() {
            Some(dir) => write_per_module(renderer.as_ref(), &modules, dir),
            None if from_stdin => {
                print!("{}", renderer.render_all(&modules));
                Ok(())
            }
            None => bail!(
                "--output is required for {} output when files are given",
                cli.format
            ),
        },
    }
}

/// Route `tracing` to stderr so stdout stays clean for the JSON dump.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

fn read_stdin() -> Result<Unit> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(Unit { name: None, text })
}

fn read_files(patterns: &[String]) -> Result<Vec<Unit>> {
    let paths = expand_globs(patterns)?;
    let mut units = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        tracing::info!("Reading {}", name);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        units.push(Unit {
            name: Some(name),
            text,
        });
    }
    Ok(units)
}

/// Extract one unit and report its warnings. Warnings never stop the run.
fn extract_unit(unit: &Unit) -> ModuleDoc {
    let label = unit.name.as_deref().unwrap_or("<stdin>");
    tracing::info!("Analyzing {}", label);
    let result = gfxdoc::extract(&unit.text, unit.name.as_deref());
    for warning in &result.warnings {
        tracing::warn!("{}: {}", label, warning);
    }
    tracing::info!(
        "{}: module {} with {} records",
        label,
        result.module.name(),
        result.module.children.len()
    );
    result.module
}

fn write_combined(
    renderer: &dyn Renderer,
    modules: &[ModuleDoc],
    output: Option<&Path>,
) -> Result<()> {
    let rendered = renderer.render_all(modules);
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory: {}", parent.display())
                })?;
            }
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            io::stdout()
                .write_all(rendered.as_bytes())
                .context("failed to write stdout")
        }
    }
}

fn write_per_module(
    renderer: &dyn Renderer,
    modules: &[ModuleDoc],
    output_dir: &Path,
) -> Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    for module in modules {
        let out_path = output_dir.join(format!(
            "{}.{}",
            output_file_stem(module.name()),
            renderer.file_extension()
        ));
        tracing::info!("Writing {}", out_path.display());
        fs::write(&out_path, renderer.render(module))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(())
}

/// File extensions picked up when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "h", "hh", "hpp", "m", "mm", "gfx",
];

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
                let supported = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
                if p.is_file() && supported {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Module names become file names: keep them inside the output directory.
fn output_file_stem(module_name: &str) -> String {
    let stem: String = module_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    match stem.as_str() {
        "" | "." | ".." => gfxdoc::model::ANONYMOUS_MODULE.to_string(),
        _ => stem,
    }
}
