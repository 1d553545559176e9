#[tokio::main]
async fn main() -> anyhow::Result<()> {
    inkwell_server::start().await
}
