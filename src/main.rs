#[tokio::main]
async fn main() -> anyhow::Result<()> {
    underwood::run().await
}
