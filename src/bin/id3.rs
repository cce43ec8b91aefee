use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rusty_id3::data::dataset::{Party, DEFAULT_TRAIN_RATIO};
use rusty_id3::data::reader::read_file;
use rusty_id3::metrics::confusion::ClassificationMetrics;
use rusty_id3::problem::TrainingProblem;
use rusty_id3::trees::params::Id3Params;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const RULE: &str = "--------------------------------------------------";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Label {
    Democrat,
    Republican,
}

impl From<Label> for Party {
    fn from(label: Label) -> Self {
        match label {
            Label::Democrat => Party::Democrat,
            Label::Republican => Party::Republican,
        }
    }
}

/// Train an ID3 decision tree on voting records and report its test accuracy.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Comma-separated records: 14 `y`/`n` votes followed by `democrat` or `republican`
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Proportion of records used for training
    #[arg(long, default_value_t = DEFAULT_TRAIN_RATIO)]
    ratio: f64,

    /// Seed of the train/test shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Label predicted for branches not covered by the training data
    #[arg(long, value_enum, default_value_t = Label::Democrat)]
    fallback: Label,

    /// Print every loaded record
    #[arg(long)]
    print_records: bool,

    /// Print the built tree
    #[arg(long)]
    print_tree: bool,

    /// Build subtrees on a single thread
    #[arg(long)]
    sequential: bool,
}

impl Cli {
    fn params(&self) -> Result<Id3Params> {
        let mut params = Id3Params::new();
        params.set_train_ratio(self.ratio)?;
        params.set_seed(self.seed);
        params.set_fallback_label(self.fallback.into());
        params.set_parallel(!self.sequential);
        Ok(params)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let dataset = read_file(&cli.input)
        .with_context(|| format!("failed to read records from {}", cli.input.display()))?;
    if cli.print_records {
        print!("{}", dataset);
    }

    let mut problem = TrainingProblem::new(&dataset, cli.params()?)?;
    drop(dataset);

    let tree = problem.train().context("failed to build the decision tree")?;
    if cli.print_tree {
        println!("{}", RULE);
        println!("Tree printing via hierarchical listing\n");
        print!("{}", tree);
        println!("{}", RULE);
    }

    let accuracy = problem.evaluate()?;
    let classifier = problem.classifier();
    let y_true = &problem.testing().y;
    let y_pred = problem.predictions()?;
    tracing::info!(accuracy, "evaluated on the testing set");

    println!("Training records: {}", problem.training().nrows());
    println!("Testing records: {}", problem.testing().nrows());
    println!("Accuracy: {:.2}%", accuracy * 100.0);
    println!("Precision: {:.4}", classifier.precision(y_true, &y_pred)?);
    println!("Recall: {:.4}", classifier.recall(y_true, &y_pred)?);
    println!("F1 score: {:.4}", classifier.f1_score(y_true, &y_pred)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rusty_id3=info,id3=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}
