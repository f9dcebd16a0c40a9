use clap::{Parser, Subcommand};
use reqwest::{Client, Method};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the payment gateway", long_about = None)]
struct Cli {
    /// Base URL of a running gateway
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// Fetch the upstream data collection
    List,
    /// Fetch one payment
    Get { id: String },
    /// Create a payment from a JSON document
    Create { json: String },
    /// Replace a payment with a JSON document
    Update { id: String, json: String },
    /// Delete a payment
    Delete { id: String },
    /// Check upstream connectivity through the gateway
    TestConnection,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    let (method, path, body) = match cli.command {
        Commands::Health => (Method::GET, "/health".to_string(), None),
        Commands::List => (Method::GET, "/api/show/data".to_string(), None),
        Commands::Get { id } => (Method::GET, format!("/api/show/data/payment/{}", id), None),
        Commands::Create { json } => (Method::POST, "/api/payment".to_string(), Some(parse(&json)?)),
        Commands::Update { id, json } => {
            (Method::PUT, format!("/api/payment/{}", id), Some(parse(&json)?))
        }
        Commands::Delete { id } => (Method::DELETE, format!("/api/payment/{}", id), None),
        Commands::TestConnection => (Method::GET, "/api/test-connection".to_string(), None),
    };

    let mut request = client.request(method, format!("{}{}", cli.url.trim_end_matches('/'), path));
    if let Some(body) = body {
        request = request.json(&body);
    }

    print_response(request.send().await?).await
}

fn parse(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("{}", rendered);
    }
    Ok(())
}
