use std::io::BufWriter;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use fenix_crawler::fetch::{FetchClient, FetchConfig};
use fenix_crawler::output::{open_output, write_records};
use fenix_crawler::pipeline::Crawler;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(output_path) = std::env::args().nth(1) else {
        eprintln!("usage: fenix-crawler <output>   ('-' writes to stdout)");
        return ExitCode::from(2);
    };

    // Open the destination before crawling so a bad path fails up front.
    let destination = match open_output(&output_path) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("cannot open output {output_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match FetchClient::new(FetchConfig::new()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("cannot build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let records = match Crawler::new(client).crawl().await {
        Ok(records) => records,
        Err(e) => {
            eprintln!("crawl failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(records = records.len(), output = %output_path, "writing output");
    if let Err(e) = write_records(BufWriter::new(destination), &records) {
        eprintln!("cannot write output {output_path}: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
