use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "dashboard-cli")]
#[command(about = "Terminal client for the ledger dashboard API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard state
    State,
    /// Reload the chain view
    Refresh,
    /// Score and submit a transaction
    Submit {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        amount: String,
    },
    /// Mine a block
    Mine,
    /// Deploy a token contract
    Deploy {
        #[arg(long)]
        owner: String,
        #[arg(long, default_value = "1000")]
        initial_supply: u64,
        /// Contract type; the service default applies when omitted
        #[arg(long, default_value = "")]
        contract_type: String,
    },
    /// Select the contract to act on
    Select { address: String },
    /// Execute a method on the selected contract
    Execute {
        method: String,
        /// Method parameters as JSON
        #[arg(default_value = "{}")]
        params: String,
    },
    /// Read the selected contract's state
    ContractState,
    /// Clear the last error
    DismissError,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (method, path, body) = match cli.command {
        Commands::State => (Method::GET, "/api/state", None),
        Commands::Refresh => (Method::POST, "/api/chain/refresh", None),
        Commands::Submit {
            sender,
            recipient,
            amount,
        } => (
            Method::POST,
            "/api/transactions",
            Some(json!({ "sender": sender, "recipient": recipient, "amount": amount })),
        ),
        Commands::Mine => (Method::POST, "/api/mine", None),
        Commands::Deploy {
            owner,
            initial_supply,
            contract_type,
        } => (
            Method::POST,
            "/api/contracts/deploy",
            Some(json!({
                "owner": owner,
                "type": contract_type,
                "params": { "initial_supply": initial_supply },
            })),
        ),
        Commands::Select { address } => (
            Method::PUT,
            "/api/contracts/selected",
            Some(json!({ "address": address })),
        ),
        Commands::Execute { method, params } => (
            Method::POST,
            "/api/contracts/execute",
            Some(json!({ "method": method, "params": params })),
        ),
        Commands::ContractState => (Method::POST, "/api/contracts/state", None),
        Commands::DismissError => (Method::DELETE, "/api/error", None),
    };

    let mut request = client.request(method, format!("{}{}", cli.url.trim_end_matches('/'), path));
    if let Some(body) = body {
        request = request.json(&body);
    }
    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: dashboard API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
