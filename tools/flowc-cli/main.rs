use clap::{Parser, Subcommand};
use flowc::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// A compiler CLI for the workflow description language
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Model a single document and print its diagnostics
    Precompile {
        /// Path to the source document
        source_path: String,
    },
    /// Compile a document against its dependencies and save the artifact
    Compile {
        /// Path to the root source document
        source_path: String,
        /// Paths to dependency documents
        #[arg(short, long)]
        deps: Vec<String>,
        /// Where to write the compiled artifact
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Precompile { source_path } => run_precompile(&source_path),
        Command::Compile {
            source_path,
            deps,
            out,
        } => run_compile(&source_path, &deps, out.as_deref()),
    }
}

fn run_precompile(source_path: &str) {
    let source = load_source(source_path);
    let result = pre_compile(&source);

    match &result.executable {
        Some(executable) => println!(
            "Modelled {} '{}'",
            match executable {
                Executable::Operation(_) => "operation",
                Executable::Flow(_) => "flow",
            },
            executable.qualified_name()
        ),
        None => println!("No executable could be modelled."),
    }

    if result.errors.is_empty() {
        println!("No errors.");
    } else {
        println!("{} error(s):", result.errors.len());
        for error in &result.errors {
            println!("  [{:?}] {}", error.kind(), error);
        }
        std::process::exit(1);
    }
}

fn run_compile(source_path: &str, dep_paths: &[String], out: Option<&str>) {
    let source = load_source(source_path);
    let dependencies: Vec<Source> = dep_paths.iter().map(|p| load_source(p)).collect();

    let compile_start = Instant::now();
    let artifact = compile(&source, &dependencies)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed:\n{}", e)));
    println!(
        "Compiled plan '{}' ({} steps) in {:?}",
        artifact.execution_plan.name,
        artifact.execution_plan.steps.len(),
        compile_start.elapsed()
    );

    if let Some(path) = out {
        artifact
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save artifact: {}", e)));
        println!("Artifact written to {}", path);
    }
}

fn load_source(path: &str) -> Source {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    Source::from_file_name(file_name, content)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
