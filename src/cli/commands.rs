use std::path::Path;

use crate::app::{AppContext, Result};
use crate::domain::{BusinessRecord, ScrapeJob};
use crate::orchestrator::{ClassifyReport, DatasetBreakdown};
use crate::scraper::ChromeLauncher;
use crate::store::{write_json, JsonStore, Store};
use crate::supervisor;

const SAMPLE_SIZE: usize = 5;

/// Scrape, merge and classify a dataset, then write records and report.
pub async fn run_pipeline(ctx: &AppContext, input: &Path, output: &Path, report_path: &Path) -> Result<()> {
    let mut records = JsonStore::new(input).load()?;
    println!("Loaded {} businesses from {}", records.len(), input.display());

    let orchestrator = ctx.orchestrator()?;
    let run = &ctx.config.run;
    println!(
        "Scraping in batches of {} (per scrape delay: {}s, batch delay: {}s, timeout: {}s)",
        run.batch_size, run.request_delay_secs, run.batch_delay_secs, run.process_timeout_secs
    );

    let started = std::time::Instant::now();
    let report = orchestrator.run(&mut records).await;
    println!(
        "\nAttempted {} scrapes in {:.2}s ({} without URL, {} already adequate)",
        report.attempted,
        started.elapsed().as_secs_f64(),
        report.skipped_no_url,
        report.skipped_prefilter
    );

    println!("\nFinal good scrapes: {}", report.good().count());
    println!("Final bad scrapes: {}", report.bad().count());

    println!("\n--- Sample of final good scrapes ---");
    for s in report.good().take(SAMPLE_SIZE) {
        println!(
            "ID: {}, Name: {}, Status: {}, Scraped length: {}",
            s.id,
            s.company_name.as_deref().unwrap_or("[N/A]"),
            s.status.map(|st| st.to_string()).unwrap_or_default(),
            s.scraped_length
        );
    }

    println!("\n--- Sample of final bad scrapes ---");
    for s in report.bad().take(SAMPLE_SIZE) {
        println!(
            "ID: {}, Name: {}, Status: {}, Scraped length: {}",
            s.id,
            s.company_name.as_deref().unwrap_or("[N/A]"),
            s.status.map(|st| st.to_string()).unwrap_or_default(),
            s.scraped_length
        );
        if let Some(last) = s.debug_log.last() {
            println!("  Last debug entry: {}", last);
        }
    }

    JsonStore::new(output).save(&records)?;
    println!("\nFull business scrape results saved to {}", output.display());
    write_json(report_path, &report.summaries)?;
    println!("Classification report saved to {}", report_path.display());
    Ok(())
}

/// Score every record's existing text and print good/bad/empty counts.
pub fn classify(ctx: &AppContext, input: &Path, output: Option<&Path>) -> Result<()> {
    let records = JsonStore::new(input).load()?;
    let classifier = ctx.classifier()?;
    let report = ClassifyReport::build(&classifier, &records);

    let scored = report.good.len() + report.bad.len();
    println!("Filtered from {} to {} businesses with content.", records.len(), scored);
    println!("Found {} empty businesses (no text in combined/about/raw).", report.empty);
    println!("Good: {}", report.good.len());
    println!("Bad: {}", report.bad.len());

    for entry in report.bad.iter().take(SAMPLE_SIZE) {
        println!(
            "  bad  {:>6.2}  {}  {}",
            entry.score,
            entry.id,
            entry.company_name.as_deref().unwrap_or("[N/A]")
        );
    }

    if let Some(path) = output {
        write_json(path, &report)?;
        println!("Scores saved to {}", path.display());
    }
    Ok(())
}

/// Print how a dataset splits by URL and content availability.
pub fn analyze(input: &Path, export: Option<&Path>) -> Result<()> {
    let records = JsonStore::new(input).load()?;
    let b = DatasetBreakdown::build(&records);

    println!("Total businesses: {}", b.total);
    println!("\n=== CATEGORY BREAKDOWN ===");
    for (label, count) in [
        ("Has URL + Has Content", b.url_and_content),
        ("Has URL + No Content", b.url_no_content),
        ("No URL + No Content", b.no_url_no_content),
        ("No URL + Has Content", b.no_url_content),
    ] {
        println!("{}: {} ({:.1}%)", label, count, b.percent(count));
    }

    println!("\n=== URL PATTERNS ===");
    println!("full_url: {}", b.full_urls);
    println!("partial_url: {}", b.partial_urls);
    println!("placeholder: {}", b.placeholder_urls);
    println!("other: {}", b.other_urls);

    let candidates: Vec<&BusinessRecord> = records
        .iter()
        .filter(|r| {
            r.url().is_some()
                && r
                    .combined_text
                    .as_deref()
                    .is_none_or(|t| t.trim().is_empty())
        })
        .collect();

    println!("\n=== SAMPLE: Has URL but No Content ===");
    for (i, r) in candidates.iter().take(10).enumerate() {
        println!(
            "{}. {:40} | {}",
            i + 1,
            r.display_name().chars().take(40).collect::<String>(),
            r.url().unwrap_or_default()
        );
    }

    if let Some(path) = export {
        write_json(path, &candidates)?;
        println!(
            "\nSaved {} businesses with URLs but no content to {}",
            candidates.len(),
            path.display()
        );
    }
    Ok(())
}

/// Scrape a single URL under the configured supervisor and print the trail.
pub async fn scrape_url(ctx: &AppContext, id: &str, url: &str) -> Result<()> {
    let supervisor = ctx.supervisor()?;
    let result = supervisor.attempt(&ScrapeJob::new(id, url)).await;

    println!("Status: {}", result.status);
    println!("Final URL: {}", result.final_url);
    println!("Content length: {}", result.content_len());
    println!("\n--- Debug log ---");
    for line in &result.debug_log {
        println!("  {}", line);
    }
    if !result.content.is_empty() {
        println!("\n--- Content ---");
        println!("{}", result.content);
    }
    Ok(())
}

/// Entry point of an isolated worker process. Stdout carries the result only.
pub async fn worker() -> Result<()> {
    supervisor::serve(tokio::io::stdin(), tokio::io::stdout(), |config| {
        ChromeLauncher::new(config.clone())
    })
    .await
}
