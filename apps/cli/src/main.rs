#[tokio::main]
async fn main() -> anyhow::Result<()> {
    srs_client::run().await
}
