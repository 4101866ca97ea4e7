//! Minimal CLI: synthesize → (dart | model)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::ast::AstNode;
use crate::codegen;
use crate::synthesizer;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// derive a null-safe Dart class model from JSON documents and emit either the Dart source or the raw class model
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// synthesize classes and emit Dart null-safety source
    Dart(DartOut),
    /// synthesize classes and print the class-model debug view as JSON
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct DartOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name for the top-level Dart class
    #[arg(long, default_value = "AutoGenerate")]
    root_class: String,

    /// output .dart file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name for the top-level Dart class
    #[arg(long, default_value = "AutoGenerate")]
    root_class: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Load every input document in turn and hand it to `apply`. Documents
    /// stay independent; there is no cross-document inference.
    fn load_process(
        &self,
        mut apply: impl FnMut(serde_json::Value) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {}", source_path.display()))?;
            let json_value = serde_json::from_str::<serde_json::Value>(&source)
                .with_context(|| {
                    format!("failed to parse JSON source file {}", source_path.display())
                })?;
            let json_value = match self.json_pointer.as_deref() {
                None => json_value,
                Some(pointer) => json_value
                    .pointer(pointer)
                    .with_context(|| {
                        format!(
                            "JSON pointer {pointer} selects nothing in {}",
                            source_path.display()
                        )
                    })?
                    .clone(),
            };
            apply(json_value)?;
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Dart(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) per document: value → AST → class forest → Dart text
                let mut rendered = Vec::<String>::new();
                target.input_settings.load_process(|value| {
                    let root = AstNode::from_value(&value);
                    let forest = synthesizer::synthesize(&root, &target.root_class)?;
                    rendered.push(codegen::render_dart(&forest));
                    Ok(())
                })?;

                // 2) join; each document's classes stand on their own
                let dart_src = rendered.join("\n");
                write_output(target.out.as_deref(), &dart_src)
            }
            Command::Model(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let mut dumps = Vec::<String>::new();
                target.input_settings.load_process(|value| {
                    let root = AstNode::from_value(&value);
                    let forest = synthesizer::synthesize(&root, &target.root_class)?;
                    dumps.push(serde_json::to_string_pretty(&forest)?);
                    Ok(())
                })?;

                let model_src = dumps.join("\n");
                write_output(target.out.as_deref(), &model_src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, source: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
            std::fs::write(path, source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} {}", "wrote".green(), path.display());
        }
        None => {
            println!("{source}");
        }
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // an explicit glob that matches nothing is an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
