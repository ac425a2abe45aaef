#[tokio::main]
async fn main() {
    let code = bagcheck::app::startup::startup().await;
    std::process::exit(code);
}
