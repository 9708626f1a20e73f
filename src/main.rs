use clap::Parser;

use linesman::cli::{self, output, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(err) = cli::execute(cli).await {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
