use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    sift::cli::run().await
}
