#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vine_client_lib::run().await
}
