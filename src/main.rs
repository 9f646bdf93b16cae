#[tokio::main]
async fn main() {
    if let Err(e) = energysaver_lib::run().await {
        eprintln!("energysaver: {}", e);
        std::process::exit(1);
    }
}
