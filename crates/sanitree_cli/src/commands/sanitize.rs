//! Sanitize command implementation

use std::io::Read;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr};
use sanitree_ast::{DomArena, SafeTree};
use sanitree_core::{CONFIG_FILE_NAME, DomVisitor, SanitizerConfig};
use tracing::debug;

use crate::input::parse_document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    PrettyJson,
    Outline,
}

pub fn run_sanitize(config: Option<&Path>, input: &Path, format: OutputFormat) -> Result<()> {
    let config = load_config(config)?;
    let engine = DomVisitor::from_config(&config).into_diagnostic()?;
    debug!("Sanitizer: {:?}", engine);

    let source = read_input(input)?;
    let arena = DomArena::with_capacity(source.len());
    let root = parse_document(&arena, &source)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load {}", input.display()))?;

    let tree = engine.visit(&root).into_diagnostic()?;
    debug!(
        "Output has {} elements and {} nodes",
        tree.element_count(),
        tree.node_count()
    );

    println!("{}", render(&tree, format)?);
    Ok(())
}

/// Uses `--config` when given, then `.sanitree.json` in the working
/// directory, then the default configuration.
fn load_config(path: Option<&Path>) -> Result<SanitizerConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(CONFIG_FILE_NAME);
            if !default.is_file() {
                debug!("No configuration found, every element will be excluded");
                return Ok(SanitizerConfig::default());
            }
            default
        }
    };

    debug!("Loading configuration from {}", path.display());
    SanitizerConfig::from_file(&path).into_diagnostic()
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .into_diagnostic()?;
        return Ok(source);
    }

    std::fs::read_to_string(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", input.display()))
}

fn render(tree: &SafeTree, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(tree).into_diagnostic(),
        OutputFormat::PrettyJson => serde_json::to_string_pretty(tree).into_diagnostic(),
        OutputFormat::Outline => Ok(tree.to_string().trim_end().to_string()),
    }
}
