use adcopy_crawler::formats::get_format_details;
use adcopy_crawler::proposal::{DraftOptions, EmailDraft, email_drafts};
use adcopy_crawler::sizing::{ContentPlan, plan_content};
use adcopy_crawler::{ScrapeReport, SiteScrape};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;

mod args;
use args::Args;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    report: ScrapeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<ContentPlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    email_drafts: Vec<EmailDraft>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Some(format) = args.format.as_deref() {
        if get_format_details(format).is_none() {
            ::log::error!("Unknown ad format: {}", format);
            return ExitCode::FAILURE;
        }
    }

    let mut scrape = SiteScrape::new(args.url.as_str());
    if let Some(path) = &args.config {
        scrape = match scrape.with_config_file(path) {
            Ok(scrape) => scrape,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
    }
    if let Some(max_pages) = args.max_pages {
        scrape = scrape.with_max_pages(max_pages);
    }
    if let Some(timeout) = args.timeout {
        scrape = scrape.with_total_timeout(timeout);
    }

    ::log::info!("Starting scrape of {}", args.url);
    let report = scrape.run().await;
    ::log::info!(
        "Scrape finished in {:.2} seconds - {} pages scraped",
        report.elapsed_ms as f64 / 1000.0,
        report.data.pages_scraped
    );

    let plan = args
        .format
        .as_deref()
        .and_then(|format| plan_content(&report.data, format));
    let options = DraftOptions {
        contact_name: args.contact_name,
        personal_comment: args.comment,
    };
    let drafts = plan
        .as_ref()
        .map(|plan| email_drafts(plan, &options))
        .unwrap_or_default();

    let output = Output {
        report,
        plan,
        email_drafts: drafts,
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}
