#[tokio::main]
async fn main() {
    if let Err(err) = csv_pgload::run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
