#[tokio::main]
async fn main() {
    if let Err(e) = outage_dashboard::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
