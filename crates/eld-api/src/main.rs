//! Binary entrypoint for the ELD planner API server.
use eld_api::run;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    // Default listen address can be overridden with ELD_ADDR
    let addr = std::env::var("ELD_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    run(&addr).await;
}
