use std::{error::Error, path::Path};

use linfit::model::{Params, Point, EPOCHS, INITIAL_PARAMS, LEARNING_RATE, QUERY_POINT};
use serde::Deserialize;

/// Run settings as read from a config file or the command line.
/// Also defines the config file format (every field can be omitted).
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
  /// Number of passes over the dataset
  pub epochs: Option<usize>,
  /// Step size of every update
  pub learning_rate: Option<f64>,
  /// Starting weights and bias
  pub initial: Option<ParamsConfig>,
  /// Held-out point predicted after training
  pub query: Option<PointConfig>,
  /// Do not print the per-epoch loss
  pub quiet: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsConfig {
  pub w0: Option<f64>,
  pub w1: Option<f64>,
  pub b: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointConfig {
  pub x0: Option<f64>,
  pub x1: Option<f64>,
}

/// Fully resolved settings, defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub epochs: usize,
  pub learning_rate: f64,
  pub initial: Params,
  pub query: Point,
  pub quiet: bool,
}

impl AppConfig {
  pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)
      .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    Self::from_yaml(&content)
  }

  pub fn from_yaml(content: &str) -> Result<Self, Box<dyn Error>> {
    // an empty file is an empty config
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(content)?)
  }

  // merge configs where the second overwrites the first
  pub fn merge(self, other: Self) -> Self {
    Self {
      epochs: other.epochs.or(self.epochs),
      learning_rate: other.learning_rate.or(self.learning_rate),
      initial: merge_nested(self.initial, other.initial, ParamsConfig::merge),
      query: merge_nested(self.query, other.query, PointConfig::merge),
      quiet: other.quiet.or(self.quiet),
    }
  }

  pub fn settings(&self) -> Settings {
    let initial = self.initial.clone().unwrap_or_default();
    let query = self.query.clone().unwrap_or_default();
    Settings {
      epochs: self.epochs.unwrap_or(EPOCHS),
      learning_rate: self.learning_rate.unwrap_or(LEARNING_RATE),
      initial: Params {
        w0: initial.w0.unwrap_or(INITIAL_PARAMS.w0),
        w1: initial.w1.unwrap_or(INITIAL_PARAMS.w1),
        b: initial.b.unwrap_or(INITIAL_PARAMS.b),
      },
      query: Point {
        x0: query.x0.unwrap_or(QUERY_POINT.x0),
        x1: query.x1.unwrap_or(QUERY_POINT.x1),
      },
      quiet: self.quiet.unwrap_or(false),
    }
  }
}

impl ParamsConfig {
  pub fn merge(self, other: Self) -> Self {
    Self {
      w0: other.w0.or(self.w0),
      w1: other.w1.or(self.w1),
      b: other.b.or(self.b),
    }
  }
}

impl PointConfig {
  pub fn merge(self, other: Self) -> Self {
    Self {
      x0: other.x0.or(self.x0),
      x1: other.x1.or(self.x1),
    }
  }
}

fn merge_nested<T>(first: Option<T>, second: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
  match (first, second) {
    (Some(a), Some(b)) => Some(merge(a, b)),
    (a, b) => b.or(a),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_resolves_to_builtin_run() {
    let settings = AppConfig::default().settings();
    assert_eq!(
      settings,
      Settings {
        epochs: 10_000,
        learning_rate: 0.001,
        initial: Params {
          w0: 0.1,
          w1: -0.23,
          b: 0.22
        },
        query: Point { x0: 2.7, x1: 6.0 },
        quiet: false,
      }
    );
  }

  #[test]
  fn parses_partial_yaml() {
    let config = AppConfig::from_yaml(
      "epochs: 50\n\
       initial:\n  w1: 0.5\n\
       query:\n  x0: 1.0\n",
    )
    .unwrap();
    let settings = config.settings();
    assert_eq!(settings.epochs, 50);
    assert_eq!(settings.learning_rate, 0.001);
    assert_eq!(settings.initial.w0, 0.1);
    assert_eq!(settings.initial.w1, 0.5);
    assert_eq!(settings.query, Point { x0: 1.0, x1: 6.0 });
  }

  #[test]
  fn empty_yaml_is_default() {
    assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
  }

  #[test]
  fn rejects_unknown_keys() {
    assert!(AppConfig::from_yaml("epoch: 3\n").is_err());
  }

  #[test]
  fn later_config_wins_field_by_field() {
    let file = AppConfig {
      epochs: Some(100),
      learning_rate: Some(0.01),
      initial: Some(ParamsConfig {
        w0: Some(1.0),
        w1: Some(2.0),
        b: None,
      }),
      query: None,
      quiet: Some(true),
    };
    let flags = AppConfig {
      epochs: Some(7),
      initial: Some(ParamsConfig {
        w1: Some(-2.0),
        ..Default::default()
      }),
      query: Some(PointConfig {
        x0: None,
        x1: Some(3.0),
      }),
      ..Default::default()
    };

    let merged = file.merge(flags);
    assert_eq!(merged.epochs, Some(7));
    assert_eq!(merged.learning_rate, Some(0.01));
    assert_eq!(
      merged.initial,
      Some(ParamsConfig {
        w0: Some(1.0),
        w1: Some(-2.0),
        b: None
      })
    );
    assert_eq!(
      merged.query,
      Some(PointConfig {
        x0: None,
        x1: Some(3.0)
      })
    );
    assert_eq!(merged.quiet, Some(true));
  }
}
