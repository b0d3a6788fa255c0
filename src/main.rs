use clap::Parser;
use page_tree::{DocSite, Result};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut site = DocSite::default();
    if let Some(path) = &args.config {
        site = site.with_config_file(path)?;
    }
    if let Some(start_url) = &args.start_url {
        site = site.with_start_url(start_url);
    }
    if let Some(output) = args.output {
        site = site.with_output_file(output);
    }
    if let Some(summary) = args.summary {
        site = site.with_summary_file(summary);
    }

    // Page failures are logged during the crawl and never end the run.
    let crawled = site.generate_http().await?;
    site.write_outputs(&crawled)?;
    Ok(())
}
