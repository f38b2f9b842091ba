use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use futures::future::join_all;
use tokio::io::AsyncReadExt;

use shoplocal_search::{
    SearchPipeline, VariantSelector, Wishlist,
    cli::CliArgs,
    config::load_config,
    search::request::validate_query,
};

struct Job {
    query: String,
    wishlist: Option<Wishlist>,
    pretty: bool,
    pipeline: SearchPipeline,
}

impl Job {
    fn run(&self, source: &str, raw: &str) -> Result<String> {
        let (encoded, report) = self
            .pipeline
            .process_json(&self.query, raw, self.wishlist.as_ref(), self.pretty)
            .with_context(|| format!("Failed to process {}", source))?;

        if report.rejected > 0 {
            log::warn!("{}: {} hits left without a variant", source, report.rejected);
        }

        Ok(encoded)
    }
}

async fn process_file(job: Arc<Job>, path: PathBuf) -> Result<String> {
    log::debug!("Reading {}", path.display());
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    job.run(&path.display().to_string(), &raw)
}

async fn process_stdin(job: &Job) -> Result<String> {
    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("Failed to read stdin")?;

    job.run("stdin", &raw)
}

async fn run() -> Result<()> {
    log::debug!("Parsing CLI args...");
    let args = CliArgs::parse();
    let query = validate_query(Some(args.query.as_str())).context("Invalid --query")?;
    let config = load_config(args.config.as_deref(), args.overrides())?;

    let wishlist = match args.wishlist.as_deref() {
        Some(raw) => match Wishlist::parse(raw, config.wishlist.format) {
            Ok(wishlist) => Some(wishlist),
            Err(e) => {
                // Results are still useful without wishlist marks
                log::warn!("Failed to retrieve wishlist: {}", e);
                None
            }
        },
        None => None,
    };

    let job = Arc::new(Job {
        query,
        wishlist,
        pretty: config.output.pretty,
        pipeline: SearchPipeline::new(VariantSelector::from_config(&config.selector)),
    });

    if args.inputs.is_empty() {
        println!("{}", process_stdin(&job).await?);
        return Ok(());
    }

    let handles = args.inputs.into_iter().map(|path| {
        let job = Arc::clone(&job);
        tokio::spawn(process_file(job, path))
    });

    let mut failed = 0;
    for result in join_all(handles).await {
        match result {
            Ok(Ok(encoded)) => println!("{}", encoded),
            Ok(Err(e)) => {
                log::error!("{:#}", e);
                failed += 1;
            }
            Err(j) => {
                log::error!("Task join failed: {:?}", j);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} input(s) failed", failed));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(e) = run().await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
