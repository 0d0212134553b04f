//! Scan one food photo from the command line and print the report

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scaneat::clients::{ClarifaiClassifier, OpenFoodFactsClient};
use scaneat::config::Config;
use scaneat::models::Goal;
use scaneat::nutrition::NutritionResolver;
use scaneat::scan::{ScanReport, ScanRequest, Scanner};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JPEG/PNG/WebP photo
    image: PathBuf,

    /// Comma-separated plate items (defaults to the recognized food)
    #[arg(short, long, value_delimiter = ',')]
    items: Vec<String>,

    /// Portion factor, 0.25 to 2.0
    #[arg(short, long, default_value_t = 1.0)]
    portion: f64,

    /// lose, maintain or gain
    #[arg(short, long, default_value = "maintain")]
    goal: Goal,

    /// Skip the Open Food Facts fallback
    #[arg(long)]
    offline: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scaneat=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let resolver = if cli.offline {
        NutritionResolver::curated_only()
    } else {
        NutritionResolver::with_lookup(Arc::new(OpenFoodFactsClient::from_config(&config)?))
    };
    let scanner = Scanner::new(Arc::new(ClarifaiClassifier::from_config(&config)?), resolver);

    let bytes = std::fs::read(&cli.image)?;
    let request = ScanRequest {
        selected_items: (!cli.items.is_empty()).then_some(cli.items),
        portion: cli.portion,
        goal: cli.goal,
    };
    let report = scanner.analyze(&bytes, request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ScanReport) {
    println!("{}", report.image_note);
    println!(
        "Recognized: {} ({:.1}%)",
        report.recognition.name,
        report.recognition.confidence * 100.0
    );
    if !report.recognition.alternatives.is_empty() {
        println!("Other guesses: {}", report.recognition.alternatives.join(", "));
    }
    println!("Plate: {} x{}", report.selected.join(", "), report.portion);

    if let Some(plate) = &report.plate {
        let t = &plate.totals;
        println!(
            "Totals: {:.0} kcal, protein {:.1} g, carbs {:.1} g, fat {:.1} g, fiber {:.1} g",
            t.calories, t.protein, t.carbs, t.fat, t.fiber
        );
    }
    for note in &report.notes {
        println!("Note: {}", note);
    }
    for tip in &report.recommendations {
        println!("- {}", tip);
    }
    if !report.alternatives.is_empty() {
        println!("Try instead: {}", report.alternatives.join("; "));
    }
    if let Some(impact) = &report.weight_impact {
        println!("{}", impact.message);
    }
}
