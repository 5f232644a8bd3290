use clap::{Parser, Subcommand};
use keiro::prelude::*;
use serde::Deserialize;
use std::fs;

// --- JSON Deserialization Structs (Input Format Specific) ---
// Matches the `{nodes, edges}` shape the editor serializes.

#[derive(Deserialize)]
struct RawPipeline {
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

/// A graph assembly and validation engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved title, ports and geometry of every node in a
    /// pipeline file
    Inspect {
        /// Path to the pipeline JSON file
        pipeline_path: String,
    },
    /// Submit a pipeline file to an analyzer and print its verdict
    Check {
        /// Path to the pipeline JSON file
        pipeline_path: String,
        /// Analyzer endpoint to submit to
        #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { pipeline_path } => {
            let pipeline = load_pipeline(&pipeline_path);
            inspect(&pipeline);
        }
        Command::Check {
            pipeline_path,
            endpoint,
        } => {
            let pipeline = load_pipeline(&pipeline_path);
            check(&pipeline, &endpoint).await;
        }
    }
}

fn load_pipeline(path: &str) -> Pipeline {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read pipeline file '{}': {}", path, e))
    });
    let raw: RawPipeline = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse pipeline JSON: {}", e)));
    Pipeline::from_parts(raw.nodes, raw.edges)
}

fn inspect(pipeline: &Pipeline) {
    let mut resolver = PortResolver::new();

    println!(
        "Pipeline: {} node(s), {} edge(s)\n",
        pipeline.nodes().len(),
        pipeline.edges().len()
    );

    for node in pipeline.nodes() {
        let view = resolver.view(node);
        println!(
            "{} [{}] at ({:.0}, {:.0})",
            view.title, node.id, node.position.x, node.position.y
        );
        for handle in &view.inputs {
            println!(
                "  in  {:<30} @ {:>5.1}%{}",
                handle.id,
                handle.offset,
                label_suffix(handle)
            );
        }
        for handle in &view.outputs {
            println!(
                "  out {:<30} @ {:>5.1}%{}",
                handle.id,
                handle.offset,
                label_suffix(handle)
            );
        }
        if let Some(size) = view.size {
            println!(
                "  box {}x{} ({} row(s))",
                size.width, size.height, size.rows
            );
        }
        println!();
    }
}

fn label_suffix(handle: &HandleView) -> String {
    handle
        .label
        .as_ref()
        .map_or(String::new(), |label| format!("  ({})", label))
}

async fn check(pipeline: &Pipeline, endpoint: &str) {
    let analyzer = HttpAnalyzer::new(endpoint)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to build analyzer client: {}", e)));
    let mut submitter = Submitter::new(analyzer);

    println!("Submitting pipeline to {}...", endpoint);
    let report = submitter
        .submit(pipeline)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Submission failed: {}", e)));

    println!("\n--- Analyzer Verdict ---");
    println!("Nodes: {}", report.num_nodes);
    println!("Edges: {}", report.num_edges);
    println!(
        "DAG:   {}",
        if report.is_dag { "yes" } else { "no (cycle detected)" }
    );
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
