//! ACC Compiler Driver
//! 
//! Reads a typed AST serialized as JSON, lowers every function to ACIR and
//! writes the result as a textual dump or as JSON.

use acc_common::CompilerError;
use acc_frontend::TranslationUnit;
use acc_ir::lower_translation_unit;
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "acc")]
#[command(about = "ACC compiler - lower a typed AST to ACIR")]
#[command(version = "0.1.0")]
struct Cli {
    /// Typed AST in JSON format; stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to write
    #[arg(long, value_enum, default_value_t = Emit::Acir)]
    emit: Emit,

    /// Log lowering progress (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Textual ACIR dump
    Acir,
    /// ACIR module as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(&cli) {
        eprintln!("{}", report(&e));
        std::process::exit(1);
    }
}

/// Message printed on failure. Coverage gaps are told apart from broken
/// input or compiler bugs.
fn report(err: &CompilerError) -> String {
    if err.is_unsupported() {
        log::warn!("input uses an operator the ACIR lowering does not handle yet");
        format!("Unsupported: {err}")
    } else {
        format!("Error: {err}")
    }
}

fn run(cli: &Cli) -> Result<(), CompilerError> {
    let input = cli.input.as_deref().filter(|path| *path != Path::new("-"));
    let source = read_input(input)?;
    let rendered = compile(&source, &module_name(input), cli.emit)?;
    write_output(cli.output.as_deref(), &rendered)
}

/// Lower a JSON typed AST and render the module.
fn compile(source: &str, module_name: &str, emit: Emit) -> Result<String, CompilerError> {
    let unit = TranslationUnit::from_json(source)?;
    let module = lower_translation_unit(&unit, module_name)?;
    for function in &module.functions {
        function.verify()?;
    }
    log::info!("Lowered {} functions in module '{}'", module.functions.len(), module.name);

    match emit {
        Emit::Acir => Ok(module.to_string()),
        Emit::Json => serde_json::to_string_pretty(&module)
            .map(|json| json + "\n")
            .map_err(|e| CompilerError::internal(format!("cannot serialize ACIR: {e}"))),
    }
}

fn module_name(input: Option<&Path>) -> String {
    input
        .and_then(|path| path.file_stem())
        .and_then(|stem| stem.to_str())
        .unwrap_or("stdin")
        .to_string()
}

fn read_input(path: Option<&Path>) -> Result<String, CompilerError> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), CompilerError> {
    match path {
        Some(path) => fs::write(path, text)?,
        None => io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}
