use anyhow::Result;
use nps_client::{Client, Filters};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG=nps_client=debug shows each request.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Configure the key via NPS_API_KEY or a `.npsrc` file.
    let client = Client::from_env()?;

    let park_code = std::env::args().nth(1).unwrap_or_else(|| "acad".to_string());
    let body = client.campgrounds(&Filters::new().park_code(&park_code))?;

    println!("Campgrounds in {} ({} total):", park_code, body["total"]);
    for campground in body["data"].as_array().into_iter().flatten() {
        println!("- {}", campground["name"].as_str().unwrap_or("(unnamed)"));
    }
    Ok(())
}
