#[tokio::main]
async fn main() {
    if let Err(e) = pgdesk_cli::run(std::env::args().collect()).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
