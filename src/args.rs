use clap::Parser;
use std::path::PathBuf;

/// Every flag is optional; without flags the built-in tushare.pro defaults apply.
#[derive(Parser, Debug)]
#[command(name = "page-tree")]
#[command(about = "Crawls a documentation site into one hierarchical Markdown file")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// URL to start crawling from
    #[arg(short, long)]
    pub start_url: Option<String>,

    /// Markdown output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON structure summary file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}
