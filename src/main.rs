use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slide_aligner::align::{self, assemble::attach_texts};
use slide_aligner::cli::{Cli, Commands};
use slide_aligner::config::Config;
use slide_aligner::input::SourceRegistry;
use slide_aligner::output::{self, AlignmentReport};
use slide_aligner::{segments, utils};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json_logs);

    let config = match cli.command {
        Commands::Config { show: false } => {
            Config::load_or_default(cli.config_file.as_deref()).await?
        }
        _ => Config::load(cli.config_file.as_deref()).await?,
    };

    match cli.command {
        Commands::Align {
            scores,
            segments: segments_file,
            output: output_path,
            format,
            no_spans,
            no_header,
            tuning,
        } => {
            let alignment_config = tuning.apply(config.alignment.clone());

            tracing::info!("Loading scores from: {}", scores.display());
            let csv_headers = config.app.csv_has_headers && !no_header;
            let input = SourceRegistry::with_csv_headers(csv_headers)
                .load(&scores)
                .await?;
            let matrix = input
                .matrix()
                .with_context(|| format!("Invalid score matrix in {}", scores.display()))?;

            let texts = match segments_file {
                Some(path) => Some(segments::load_segments(&path).await?),
                None => input.segments,
            };
            if let Some(texts) = &texts {
                if texts.len() != matrix.rows() {
                    anyhow::bail!(
                        "Got {} segment texts for {} score rows",
                        texts.len(),
                        matrix.rows()
                    );
                }
            }

            let progress = spinner(cli.quiet)?;
            progress.set_message(format!(
                "Aligning {} segments to {} pages...",
                matrix.rows(),
                matrix.cols()
            ));

            let started = Instant::now();
            let mut assignment = align::align(matrix, &alignment_config)?;
            progress.finish_and_clear();

            tracing::info!(
                "Aligned {} segments to {} pages in {} (path score {:.3})",
                assignment.segments(),
                assignment.pages,
                utils::format_elapsed(started.elapsed()),
                assignment.path_score
            );

            if let Some(texts) = texts {
                attach_texts(&mut assignment.records, &texts);
            }

            let include_spans = config.app.include_page_spans && !no_spans;
            let report = AlignmentReport::new(assignment, &alignment_config, include_spans);
            let format = format.unwrap_or(config.app.default_output_format);

            match output_path {
                Some(path) => {
                    output::save_to_file(&report, &path, &format).await?;
                    println!("Alignment saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&report, &format)?;
                }
            }
        }
        Commands::Split {
            transcript,
            output: output_path,
            json,
        } => {
            utils::check_file_accessible(&transcript)?;
            let text = tokio::fs::read_to_string(&transcript)
                .await
                .with_context(|| format!("Failed to read transcript {}", transcript.display()))?;

            let sentences = segments::split_sentences(&text);
            tracing::info!("Split transcript into {} sentences", sentences.len());

            let content = if json {
                serde_json::to_string_pretty(&sentences)?
            } else {
                sentences.join("\n")
            };

            match output_path {
                Some(path) => {
                    tokio::fs::write(&path, format!("{}\n", content))
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Sentences saved to: {}", path.display());
                }
                None => println!("{}", content),
            }
        }
        Commands::Config { show } => {
            if show {
                println!("{}", config.display());
            } else {
                let path = config.save(cli.config_file.as_deref()).await?;
                println!("Configuration written to: {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "slide_aligner=debug,slidealign=debug"
    } else {
        "slide_aligner=info,slidealign=info"
    };
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()),
    );

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn spinner(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?,
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    Ok(progress)
}
