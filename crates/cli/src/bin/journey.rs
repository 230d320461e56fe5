use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    journey_cli::main_entry().await
}
