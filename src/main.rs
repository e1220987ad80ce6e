use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tadpole_eval::config::{preset, ExperimentConfig};
use tadpole_eval::models::ModelFactory;
use tadpole_eval::runner;

/// Evaluácia klasifikátorov na TADPOLE datasete.
#[derive(Parser)]
#[command(name = "tadpole-eval", version, about)]
struct Cli {
    /// JSON konfigurácia experimentu; CLI prepínače ju prepisujú.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Adresár s TADPOLE_D1_D2.csv.
    #[arg(long)]
    basepath: Option<PathBuf>,

    /// Preset klasifikátora (tree | forest | logreg | knn).
    #[arg(long)]
    model: Option<String>,

    /// Počet evaluačných behov.
    #[arg(long)]
    n_runs: Option<usize>,

    /// Podiel testovacej časti (0, 1).
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Odstrániť korelované príznaky určené offline analýzou.
    #[arg(long)]
    remove_correlated: bool,

    /// JSON súbor s boolean maskou stĺpcov z externej feature selection.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Cesta pre CSV export výsledkov.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match build_config(&cli).and_then(|config| runner::run(&config)) {
        Ok(scores) => {
            print_summary(&scores);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("chyba: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> tadpole_eval::Result<ExperimentConfig> {
    let mut config = match &cli.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(ref basepath) = cli.basepath {
        config.basepath = basepath.clone();
    }
    if let Some(ref model) = cli.model {
        config.classifier = preset(model).ok_or_else(|| {
            tadpole_eval::TadpoleError::Config(format!(
                "neznámy model '{}', dostupné: {}",
                model,
                ModelFactory::available_models().join(", ")
            ))
        })?;
    }
    if let Some(n_runs) = cli.n_runs {
        config.n_runs = n_runs;
    }
    if let Some(test_fraction) = cli.test_fraction {
        config.test_fraction = test_fraction;
    }
    if cli.remove_correlated {
        config.remove_correlated = true;
    }
    if let Some(ref mask) = cli.mask {
        config.mask_file = Some(mask.clone());
    }
    if let Some(ref output) = cli.output {
        config.output = Some(output.clone());
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(scores: &[tadpole_eval::TrialScores]) {
    let n = scores.len() as f64;
    let mean = |f: fn(&tadpole_eval::TrialScores) -> f64| scores.iter().map(f).sum::<f64>() / n;

    println!("=== Výsledky ({} behov) ===", scores.len());
    println!("BCA_train:  {:.4}", mean(|s| s.bca_train));
    println!("BCA_test:   {:.4}", mean(|s| s.bca_test));
    println!("mAUC_train: {:.4}", mean(|s| s.m_auc_train));
    println!("mAUC_test:  {:.4}", mean(|s| s.m_auc_test));
}
