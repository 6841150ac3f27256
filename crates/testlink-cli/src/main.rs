use anyhow::{Context, Result};
use std::{env, path::PathBuf, process};
use testlink_config::Config;
use testlink_engine::{LinkReport, TestCaseRecord, link_test_cases, load_records, store_links};

/// Where to read records from and where to write links to
#[derive(Debug, PartialEq)]
struct Job {
    record_files: Vec<PathBuf>,
    links_path: PathBuf,
}

impl Job {
    /// `testlink <links.json> <records.json>...`, or no arguments to use the config file
    fn from_args(args: &[String]) -> Result<Option<Self>> {
        if let [links_path, record_files @ ..] = args
            && !record_files.is_empty()
        {
            return Ok(Some(Self {
                record_files: record_files.iter().map(PathBuf::from).collect(),
                links_path: PathBuf::from(links_path),
            }));
        }
        if !args.is_empty() {
            return Ok(None);
        }

        log::info!("No arguments provided, checking config file");
        let Some(config) = Config::load()? else {
            return Ok(None);
        };
        Ok(Some(Self {
            record_files: config.record_files()?,
            links_path: config.links_path,
        }))
    }

    fn run(&self) -> Result<LinkReport> {
        let mut records: Vec<TestCaseRecord> = Vec::new();
        for file in &self.record_files {
            let loaded = load_records(file)
                .with_context(|| format!("Failed to load test cases from {}", file.display()))?;
            log::info!("Loaded {} test cases from {}", loaded.len(), file.display());
            records.extend(loaded);
        }

        let report = link_test_cases(&records)?;
        store_links(&self.links_path, &report.links)
            .with_context(|| format!("Failed to store links to {}", self.links_path.display()))?;
        Ok(report)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(job) = Job::from_args(&args)? else {
        let program_name = env::args().next().unwrap_or_else(|| "testlink".to_string());
        eprintln!("Usage: {program_name} <links.json> <test_cases.json>...");
        eprintln!(
            "Or create a config file at {}",
            Config::config_path().display()
        );
        process::exit(1);
    };

    if job.record_files.is_empty() {
        log::warn!("No test case record files matched");
    }

    let report = job.run()?;
    log::info!(
        "Wrote {} verification links to {} ({} test cases skipped)",
        report.links.len(),
        job.links_path.display(),
        report.skipped
    );
    Ok(())
}
