//! CLI tool for training and running the spam detector
//!
//! # Usage
//!
//! ```bash
//! # Train on an annotated corpus (one "ham|spam<TAB>message" per line)
//! spam-rs train --corpus SMSSpamCollection --output spam_model.json
//!
//! # Classify messages
//! spam-rs predict --model spam_model.json "Free entry to win" "See you at 8"
//!
//! # Show per-word scores for a message
//! spam-rs explain --model spam_model.json "Free entry to win"
//!
//! # Estimate the error rate on a random train/test split
//! spam-rs evaluate --corpus SMSSpamCollection --ratio 0.8 --seed 42
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spam_rs::corpus::{load_corpus, random_split_seeded, Label, LabeledMessage};
use spam_rs::metrics::{misclassification_rate, ConfusionMatrix};
use spam_rs::persistence::{load_from_path, save_to_path};
use spam_rs::{Config, SpamDetector};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Naive Bayes ham/spam message classifier", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "spam-rs.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a detector on an annotated corpus and save it
    Train {
        /// Corpus file
        #[arg(long)]
        corpus: PathBuf,
        /// Additive smoothing constant
        #[arg(long)]
        alpha: Option<f64>,
        /// Where to save the fitted detector
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify one or more messages
    Predict {
        /// Fitted detector file
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Messages to classify
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Show the posterior and per-word scores of a message
    Explain {
        /// Fitted detector file
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Message to explain
        message: String,
    },
    /// Fit on a random part of a corpus and measure errors on the rest
    Evaluate {
        /// Corpus file
        #[arg(long)]
        corpus: PathBuf,
        /// Additive smoothing constant
        #[arg(long)]
        alpha: Option<f64>,
        /// Probability for a message to go to the training set
        #[arg(long)]
        ratio: Option<f64>,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    init_logging(&config, cli.verbose)?;

    match cli.command {
        Commands::Train { corpus, alpha, output } => {
            let alpha = alpha.unwrap_or(config.model.alpha);
            let output = output.unwrap_or_else(|| PathBuf::from(&config.model.model_path));

            let messages = load_corpus(&corpus)?;
            let mut detector = SpamDetector::new(alpha)?;
            detector.fit(&messages)?;
            save_to_path(&detector, &output)?;

            if let Some(state) = detector.state() {
                println!("✓ Trained on {} message(s)", state.n_train_messages);
                println!("   Ham: {}", state.class_counts.ham);
                println!("   Spam: {}", state.class_counts.spam);
                println!("   Vocabulary: {} word(s)", state.model.vocabulary_size());
            }
            println!("✓ Model saved to {}", output.display());
        }
        Commands::Predict { model, messages } => {
            let detector = load_detector(model.as_deref(), &config)?;
            let posteriors = detector.predict_proba_batch(&messages)?;

            for (message, posterior) in messages.iter().zip(&posteriors) {
                println!(
                    "{:<5} ham={:.4} spam={:.4}  {}",
                    posterior.label(),
                    posterior.ham,
                    posterior.spam,
                    message
                );
            }
        }
        Commands::Explain { model, message } => {
            let detector = load_detector(model.as_deref(), &config)?;
            let posterior = detector.predict_proba(&message)?;
            let contributions = detector.word_contributions(&message)?;
            let word_posteriors = detector.word_posteriors(&message)?;

            println!("Prediction: {}", posterior.label());
            println!("   P(ham)  = {:.4}", posterior.ham);
            println!("   P(spam) = {:.4}", posterior.spam);

            if word_posteriors.is_empty() {
                println!("\nNo known words in message.");
            } else {
                let mut words: Vec<_> = word_posteriors.into_iter().collect();
                words.sort_by(|a, b| a.1.spam.total_cmp(&b.1.spam).then_with(|| a.0.cmp(&b.0)));

                println!(
                    "\n{:<20} {:>10} {:>10} {:>12} {:>12}",
                    "Word", "P(ham|w)", "P(spam|w)", "P(w|ham)", "P(w|spam)"
                );
                println!("{:-<68}", "");
                for (word, p) in &words {
                    if let Some(c) = contributions.get(word) {
                        println!(
                            "{:<20} {:>10.4} {:>10.4} {:>12.6} {:>12.6}",
                            word, p.ham, p.spam, c.ham, c.spam
                        );
                    }
                }
            }
        }
        Commands::Evaluate { corpus, alpha, ratio, seed } => {
            let alpha = alpha.unwrap_or(config.model.alpha);
            let ratio = ratio.unwrap_or(config.split.train_ratio);
            let seed = seed.or(config.split.seed);

            let messages = load_corpus(&corpus)?;
            let (train, test) = random_split_seeded(messages, ratio, seed)?;
            info!("Split corpus: {} train, {} test", train.len(), test.len());

            let mut detector = SpamDetector::new(alpha)?;
            detector.fit(&train)?;

            let train_rate = error_rate(&detector, &train)?;
            println!("Train: {} message(s), misclassification rate {:.4}", train.len(), train_rate);

            if test.is_empty() {
                println!("Test: no message(s) held out");
            } else {
                let (y_true, y_pred) = true_and_predicted(&detector, &test)?;
                let rate = misclassification_rate(&y_true, &y_pred)?;
                let matrix = ConfusionMatrix::from_labels(&y_true, &y_pred)?;

                println!("Test:  {} message(s), misclassification rate {:.4}", test.len(), rate);
                println!("\n{:<12} {:>10} {:>10}", "", "pred ham", "pred spam");
                println!("{:<12} {:>10} {:>10}", "true ham", matrix.true_negatives, matrix.false_positives);
                println!("{:<12} {:>10} {:>10}", "true spam", matrix.false_negatives, matrix.true_positives);
                if matrix.other > 0 {
                    println!("{} message(s) with another annotation", matrix.other);
                }
                if let (Some(precision), Some(recall)) = (matrix.precision(), matrix.recall()) {
                    println!("\nSpam precision {:.4}, recall {:.4}", precision, recall);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        config
            .logging
            .level
            .parse::<Level>()
            .with_context(|| format!("Invalid log level: {}", config.logging.level))?
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    match config.logging.format.as_str() {
        "json" => tracing::subscriber::set_global_default(builder.json().finish())?,
        "compact" => tracing::subscriber::set_global_default(builder.compact().finish())?,
        _ => tracing::subscriber::set_global_default(builder.pretty().finish())?,
    }

    Ok(())
}

fn load_detector(path: Option<&Path>, config: &Config) -> Result<SpamDetector> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(&config.model.model_path));
    load_from_path(&path).with_context(|| format!("Failed to load model from {}", path.display()))
}

fn true_and_predicted(detector: &SpamDetector, messages: &[LabeledMessage]) -> Result<(Vec<Label>, Vec<Label>)> {
    let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
    let y_pred = detector.predict_batch(&texts)?;
    let y_true = messages.iter().map(|m| m.label.clone()).collect();
    Ok((y_true, y_pred))
}

fn error_rate(detector: &SpamDetector, messages: &[LabeledMessage]) -> Result<f64> {
    let (y_true, y_pred) = true_and_predicted(detector, messages)?;
    Ok(misclassification_rate(&y_true, &y_pred)?)
}
