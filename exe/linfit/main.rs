mod app_config;

use app_config::{AppConfig, PointConfig, Settings};
use clap::Parser;
use linfit::{
  model::{Dataset, Trainer},
  utils,
};
use std::{
  error::Error,
  io::{self, Write},
  path::PathBuf,
  process::ExitCode,
};

/// Fits `a = w0*x0 + w1*x1 + b` to the built-in dataset by per-sample
/// gradient descent, printing the loss of every epoch and a final prediction.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
  /// YAML file with run settings, overridden by the flags below
  #[arg(short, long, value_name = "PATH")]
  config: Option<PathBuf>,
  #[arg(short, long, value_name = "INT")]
  epochs: Option<usize>,
  #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
  learning_rate: Option<f64>,
  /// First feature of the point predicted after training
  #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
  query_x0: Option<f64>,
  /// Second feature of the point predicted after training
  #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
  query_x1: Option<f64>,
  /// Only print the final prediction
  #[arg(short, long)]
  quiet: bool,
}

impl From<&Cli> for AppConfig {
  fn from(cli: &Cli) -> Self {
    let query = match (cli.query_x0, cli.query_x1) {
      (None, None) => None,
      (x0, x1) => Some(PointConfig { x0, x1 }),
    };
    Self {
      epochs: cli.epochs,
      learning_rate: cli.learning_rate,
      initial: None,
      query,
      quiet: cli.quiet.then_some(true),
    }
  }
}

fn main() -> ExitCode {
  match try_main() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("Error: {e}");
      ExitCode::FAILURE
    }
  }
}

fn try_main() -> Result<(), Box<dyn Error>> {
  utils::init_logging()?;
  let cli = Cli::parse();

  let from_file = match &cli.config {
    Some(path) => AppConfig::from_file(path)?,
    None => AppConfig::default(),
  };
  let settings = from_file.merge(AppConfig::from(&cli)).settings();
  tracing::info!(?settings, "resolved settings");

  let stdout = io::stdout();
  run(&settings, &mut stdout.lock())
}

/// Trains on the built-in dataset, writing `loss = ..` after every epoch
/// (unless quiet) and `Output ..` at the end. Nothing is written when the
/// settings are invalid.
fn run(settings: &Settings, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
  let trainer = Trainer::new(settings.epochs, settings.learning_rate)?;
  settings.initial.validate()?;
  settings.query.validate()?;

  let dataset = Dataset::builtin();
  let mut write_err = None;
  let training = trainer.fit_with(&dataset, settings.initial, |_, loss| {
    if settings.quiet || write_err.is_some() {
      return;
    }
    if let Err(e) = writeln!(out, "loss = {}", loss) {
      write_err = Some(e);
    }
  })?;
  if let Some(e) = write_err {
    return Err(e.into());
  }

  let output = training.predict(settings.query)?;
  writeln!(out, "Output {}", output)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run_to_string(settings: &Settings) -> (Result<(), Box<dyn Error>>, String) {
    let mut out = Vec::new();
    let result = run(settings, &mut out);
    (result, String::from_utf8(out).unwrap())
  }

  fn short_run(epochs: usize) -> Settings {
    AppConfig {
      epochs: Some(epochs),
      ..Default::default()
    }
    .settings()
  }

  #[test]
  fn prints_one_loss_line_per_epoch_then_output() {
    let (result, text) = run_to_string(&short_run(3));
    result.unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
      lines[..3],
      [
        "loss = 11.30035511863633",
        "loss = 1.6927228694932137",
        "loss = 1.6682086173189468",
      ]
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[3].starts_with("Output "));
    assert!(lines[3]["Output ".len()..].parse::<f64>().is_ok());
  }

  #[test]
  fn quiet_keeps_only_the_output_line() {
    let settings = Settings {
      quiet: true,
      ..short_run(3)
    };
    let (result, text) = run_to_string(&settings);
    result.unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("Output "));
  }

  #[test]
  fn default_settings_print_the_pinned_output() {
    let (result, text) = run_to_string(&AppConfig::default().settings());
    result.unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 10_001);
    assert_eq!(lines[1491], "loss = 0.8559414430871607");
    assert_eq!(lines[9_999], "loss = 0.8450549501560897");
    assert_eq!(lines[10_000], "Output 0.3795782264687166");
  }

  #[test]
  fn non_finite_query_fails_before_training() {
    let settings = AppConfig {
      epochs: Some(3),
      query: Some(PointConfig {
        x0: Some(f64::NAN),
        x1: None,
      }),
      ..Default::default()
    }
    .settings();
    let (result, text) = run_to_string(&settings);
    assert_eq!(
      result.unwrap_err().to_string(),
      "`x0` is not a finite number"
    );
    assert!(text.is_empty());
  }

  #[test]
  fn bad_learning_rate_writes_nothing() {
    let settings = Settings {
      learning_rate: 0.0,
      ..short_run(3)
    };
    let (result, text) = run_to_string(&settings);
    assert_eq!(
      result.unwrap_err().to_string(),
      "learning rate must be finite and positive, got 0"
    );
    assert!(text.is_empty());
  }
}
