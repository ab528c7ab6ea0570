#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cardsheet_backend::run().await
}
