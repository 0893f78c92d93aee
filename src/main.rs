//! rm-stats: analyse a repeated-measures study CSV and write a JSON report

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use rm_effect::{EffectKind, EffectSize};
use rm_io::{load_csv, write_report_file, LoaderConfig};
use rm_study::{StudyConfig, StudyReport, StudyRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Report location, relative to the working directory
const OUTPUT_FILE: &str = "results_data.json";

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    info!("rm-stats v{}", env!("CARGO_PKG_VERSION"));

    let config = StudyConfig::default();
    let dataset = load_csv(&args.input, &config, &LoaderConfig::default())
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let report = StudyRunner::with_detected_capabilities(config)
        .run(&dataset)
        .context("study analysis failed")?;

    write_report_file(OUTPUT_FILE, &report)
        .with_context(|| format!("failed to write {OUTPUT_FILE}"))?;

    print_summary(&report);
    println!("\nResults written to {OUTPUT_FILE}");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_summary(report: &StudyReport) {
    let info = &report.study_info;
    println!(
        "{}: {} participants, {} observations",
        info.design, info.n_participants, info.n_observations
    );
    if !info.inference_available {
        println!("Inferential statistics unavailable; only descriptives were computed");
        return;
    }
    if report.summary.is_empty() {
        println!("No significant effects");
        return;
    }
    println!("Significant effects (p < {}):", rm_core::ALPHA);
    for effect in &report.summary.significant_effects {
        let eta = EffectSize::new(EffectKind::GeneralizedEtaSquared, effect.eta_sq, None);
        println!(
            "  {} / {}: F = {:.3}, p = {:.4}, {}",
            effect.dv, effect.effect, effect.f, effect.p, eta
        );
    }
}
