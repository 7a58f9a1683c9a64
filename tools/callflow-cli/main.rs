use callflow::prelude::*;
use clap::{Parser, Subcommand};
use std::fs;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Inspect and canonicalize stored call flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Fail instead of dropping dial targets with an unknown dialType
    #[arg(long, global = true)]
    strict_targets: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a flow and summarize its nodes and steps
    Check {
        /// Path to the stored flow JSON file
        path: String,
    },
    /// Print the canonical stored form of a flow
    Canonical {
        /// Path to the stored JSON file
        path: String,
        /// The file holds a single step instead of a whole flow
        #[arg(long)]
        step: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "callflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let policy = if cli.strict_targets {
        UnknownTargetPolicy::Fail
    } else {
        UnknownTargetPolicy::Drop
    };
    let registry = StepRegistry::builder()
        .with_unknown_target_policy(policy)
        .build();

    match cli.command {
        Command::Check { path } => run_check(&registry, &path),
        Command::Canonical { path, step } => run_canonical(&registry, &path, step),
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)))
}

fn run_check(registry: &StepRegistry, path: &str) {
    let start = Instant::now();
    let json = read_file(path);
    let flow = FlowDocument::from_json(&json, registry)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)));
    let duration = start.elapsed();

    println!("Flow '{}' loaded in {:?}", path, duration);
    if let Some(start_node) = &flow.header.start_node_name {
        println!("Start node: {}", start_node);
    }
    println!("Last step id: {}", flow.identifiers().current());

    let mut warnings = Vec::new();
    for node in flow.nodes() {
        println!("\n[{}] {}", node.name, node.label);
        for step in &node.steps {
            println!("  {:<10} {:<16} {}", step.name(), step.kind(), step.header().label);
            if let Step::ExternalService(service) = step {
                for assignment in &service.assignments {
                    println!(
                        "             {} <- {}",
                        assignment.destination_variable,
                        assignment.value_extractor.render_expression()
                    );
                }
                if let Err(e) = service.check_routing() {
                    warnings.push(e.to_string());
                }
            }
        }
    }

    println!("\n--- Summary ---");
    println!("Nodes: {}", flow.nodes().len());
    println!("Steps: {}", flow.steps().count());
    println!("Routing warnings: {}", warnings.len());
    for warning in &warnings {
        println!("  -> {}", warning);
    }
}

fn run_canonical(registry: &StepRegistry, path: &str, single_step: bool) {
    let json = read_file(path);
    let canonical = if single_step {
        registry
            .hydrate_str(&json)
            .and_then(|step| step.to_canonical())
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load step: {}", e)))
    } else {
        FlowDocument::from_json(&json, registry)
            .and_then(|flow| flow.to_canonical())
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)))
    };
    let text = serde_json::to_string_pretty(&canonical)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to print JSON: {}", e)));
    println!("{}", text);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
