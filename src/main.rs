//! ScanEat
//!
//! An MCP server for food photo recognition, nutrition lookup and meal coaching.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use scaneat::build_info;
use scaneat::clients::{ClarifaiClassifier, OpenFoodFactsClient};
use scaneat::config::Config;
use scaneat::mcp::ScanEatService;
use scaneat::nutrition::NutritionResolver;
use scaneat::scan::Scanner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scaneat=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env()?;
    if config.has_classifier_key() {
        eprintln!("Vision classifier: {}", config.clarifai_url);
    } else {
        eprintln!("Vision classifier: not configured (CLARIFAI_API_KEY unset), scans will report unknown food");
    }
    eprintln!("Nutrition fallback: {}", config.open_food_facts_url);

    let classifier = ClarifaiClassifier::from_config(&config)?;
    let lookup = OpenFoodFactsClient::from_config(&config)?;
    let resolver = NutritionResolver::with_lookup(Arc::new(lookup));
    let scanner = Scanner::new(Arc::new(classifier), resolver);

    // Create the ScanEat service
    let service = ScanEatService::new(scanner, config.has_classifier_key());

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
