use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adcopy-crawler")]
#[command(about = "Scrapes an advertiser's website and plans upsell ad content")]
#[command(version)]
pub struct Args {
    /// Website to scrape; https:// is assumed when no scheme is given
    pub url: String,

    /// Ordered ad format (visittkort, banner, tredjedel, halvside, helside, spread)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Maximum number of URLs to visit
    #[arg(short, long)]
    pub max_pages: Option<usize>,

    /// Total timeout in seconds (maximum runtime)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// JSON crawl configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name used to greet the customer in the e-mail drafts
    #[arg(long)]
    pub contact_name: Option<String>,

    /// Personal comment placed in the e-mail drafts
    #[arg(long)]
    pub comment: Option<String>,
}
