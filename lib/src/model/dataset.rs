use itertools::izip;

use super::Sample;
use crate::{Error, Result};

pub const BUILTIN_X0: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
pub const BUILTIN_X1: [f64; 10] = [2.2, 4.5, 6.1, 11.2, 10.6, 12.2, 13.8, 16.0, 18.7, 21.0];
pub const BUILTIN_Y: [f64; 10] = [0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0];

/// Three aligned columns: sample `j` is `(x0[j], x1[j], y[j])`.
///
/// Validated once on construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
  x0: Vec<f64>,
  x1: Vec<f64>,
  y: Vec<f64>,
}

impl Dataset {
  /// Rejects columns of unequal length, non-finite features and labels other
  /// than 0 or 1. Empty columns are accepted.
  pub fn new(x0: Vec<f64>, x1: Vec<f64>, y: Vec<f64>) -> Result<Self> {
    let expected = y.len();
    for (name, column) in [("x0", &x0), ("x1", &x1)] {
      if column.len() != expected {
        return Err(Error::LengthMismatch {
          name,
          got: column.len(),
          expected,
        });
      }
      if let Some(index) = column.iter().position(|v| !v.is_finite()) {
        return Err(Error::NonFinite {
          name,
          index: Some(index),
        });
      }
    }
    if let Some((index, &value)) = y
      .iter()
      .enumerate()
      .find(|&(_, &v)| v != 0.0 && v != 1.0)
    {
      return Err(Error::InvalidLabel { index, value });
    }
    Ok(Self { x0, x1, y })
  }

  /// The ten hardcoded points the trainer is run on.
  pub fn builtin() -> Self {
    Self {
      x0: BUILTIN_X0.to_vec(),
      x1: BUILTIN_X1.to_vec(),
      y: BUILTIN_Y.to_vec(),
    }
  }

  pub fn empty() -> Self {
    Self {
      x0: Vec::new(),
      x1: Vec::new(),
      y: Vec::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.y.len()
  }

  pub fn is_empty(&self) -> bool {
    self.y.is_empty()
  }

  pub fn get(&self, j: usize) -> Option<Sample> {
    Some(Sample {
      x0: *self.x0.get(j)?,
      x1: *self.x1.get(j)?,
      y: *self.y.get(j)?,
    })
  }

  /// Samples in dataset order.
  pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
    izip!(&self.x0, &self.x1, &self.y).map(|(&x0, &x1, &y)| Sample { x0, x1, y })
  }
}
