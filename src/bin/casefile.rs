//! Casefile CLI — contradiction checks over a JSON case directory.
//!
//! Usage:
//!   casefile check testimony <testimony-id> <evidence-id> --category timeline [--data-dir path]
//!   casefile check evidence <evidence-id> <evidence-id> --category identity [--data-dir path]
//!   casefile sweep <suspect-id> [--data-dir path]
//!   casefile resolved <contradiction-id> [--data-dir path]

use casefile::{
    ContradictionQuery, ContradictionResult, ContradictionService, ContradictionType, DetectorSet,
    InvestigationContext, JsonStore, TracingPublisher,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "casefile", version, about = "Fact-contradiction engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory holding the case JSON collections
    #[arg(long, global = true, default_value = "case_data")]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one pair of facts for a contradiction
    Check {
        #[command(subcommand)]
        pair: CheckPair,
    },
    /// Run every testimony of a suspect against all evidence
    Sweep {
        /// Suspect id, e.g. su_assassin_marko
        suspect_id: String,
    },
    /// Report whether a stored contradiction carries a resolution
    Resolved {
        /// Contradiction id, e.g. co_marko_timeline_4f
        contradiction_id: String,
    },
}

#[derive(Subcommand)]
enum CheckPair {
    /// Testimony statement against a piece of evidence
    Testimony {
        /// Testimony statement id
        testimony_id: String,
        /// Evidence id
        evidence_id: String,
        /// Contradiction category to test
        #[arg(long, value_enum)]
        category: Category,
    },
    /// Two pieces of evidence against each other
    Evidence {
        /// Primary evidence id
        primary_id: String,
        /// Secondary evidence id
        secondary_id: String,
        /// Contradiction category to test
        #[arg(long, value_enum)]
        category: Category,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Category {
    Timeline,
    Location,
    Identity,
}

impl From<Category> for ContradictionType {
    fn from(category: Category) -> Self {
        match category {
            Category::Timeline => ContradictionType::Timeline,
            Category::Location => ContradictionType::Location,
            Category::Identity => ContradictionType::Identity,
        }
    }
}

async fn open_service(data_dir: &PathBuf) -> Result<ContradictionService, String> {
    let store = JsonStore::open(data_dir)
        .await
        .map_err(|e| format!("Failed to open case directory: {}", e))?;
    let publisher = Arc::new(TracingPublisher::new());
    let context = InvestigationContext::new(Arc::new(store), publisher.clone());
    Ok(ContradictionService::new(
        DetectorSet::with_defaults(),
        context,
        publisher,
    ))
}

fn print_result(result: &ContradictionResult) {
    if result.is_contradiction {
        println!("CONTRADICTION [{}] {}", result.contradiction_type, result.contradiction_id);
        println!("  {}", result.description);
        if !result.affected_suspects.is_empty() {
            println!("  suspects: {}", result.affected_suspects.join(", "));
        }
        if !result.related_evidence.is_empty() {
            println!("  evidence: {}", result.related_evidence.join(", "));
        }
    } else {
        println!("consistent [{}]: {}", result.contradiction_type, result.description);
    }
}

async fn cmd_check(service: &ContradictionService, pair: CheckPair) -> i32 {
    let query = match pair {
        CheckPair::Testimony {
            testimony_id,
            evidence_id,
            category,
        } => ContradictionQuery::testimony_vs_evidence(testimony_id, evidence_id, category.into()),
        CheckPair::Evidence {
            primary_id,
            secondary_id,
            category,
        } => ContradictionQuery::evidence_vs_evidence(primary_id, secondary_id, category.into()),
    };
    match service.check_contradiction(&query).await {
        Ok(result) => {
            print_result(&result);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_sweep(service: &ContradictionService, suspect_id: &str) -> i32 {
    match service.get_possible_contradictions(suspect_id).await {
        Ok(found) if found.is_empty() => {
            println!("No contradictions found for '{}'", suspect_id);
            0
        }
        Ok(found) => {
            println!("{} contradiction(s) for '{}':", found.len(), suspect_id);
            for result in &found {
                print_result(result);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_resolved(service: &ContradictionService, contradiction_id: &str) -> i32 {
    match service.is_contradiction_resolved(contradiction_id).await {
        Ok(true) => {
            println!("'{}' is resolved", contradiction_id);
            0
        }
        Ok(false) => {
            println!("'{}' is unresolved", contradiction_id);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let service = match open_service(&cli.data_dir).await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Check { pair } => cmd_check(&service, pair).await,
        Commands::Sweep { suspect_id } => cmd_sweep(&service, &suspect_id).await,
        Commands::Resolved { contradiction_id } => cmd_resolved(&service, &contradiction_id).await,
    };
    std::process::exit(code);
}
