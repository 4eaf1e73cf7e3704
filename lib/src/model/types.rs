use crate::{Error, Result};

pub const EPOCHS: usize = 10_000;
pub const LEARNING_RATE: f64 = 0.001;

pub const INITIAL_PARAMS: Params = Params {
  w0: 0.1,
  w1: -0.23,
  b: 0.22,
};

/// The held-out point predicted once training is over.
pub const QUERY_POINT: Point = Point { x0: 2.7, x1: 6.0 };

/// An unlabelled input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  pub x0: f64,
  pub x1: f64,
}

impl Point {
  pub fn validate(&self) -> Result<()> {
    finite("x0", self.x0)?;
    finite("x1", self.x1)
  }
}

/// One labelled row of the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
  pub x0: f64,
  pub x1: f64,
  pub y: f64,
}

/// Weights and bias of `a = w0*x0 + w1*x1 + b`.
///
/// A plain value: every update produces a new `Params` which the caller
/// re-binds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
  pub w0: f64,
  pub w1: f64,
  pub b: f64,
}

impl Params {
  pub fn predict(&self, x0: f64, x1: f64) -> f64 {
    self.w0 * x0 + self.w1 * x1 + self.b
  }

  /// Moves every parameter against its gradient by `lr`.
  pub fn apply(&self, grads: &Gradients, lr: f64) -> Self {
    Self {
      w0: self.w0 - lr * grads.dw0,
      w1: self.w1 - lr * grads.dw1,
      b: self.b - lr * grads.db,
    }
  }

  pub fn validate(&self) -> Result<()> {
    finite("w0", self.w0)?;
    finite("w1", self.w1)?;
    finite("b", self.b)
  }
}

impl Default for Params {
  fn default() -> Self {
    INITIAL_PARAMS
  }
}

/// Partial derivatives of the half squared error of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradients {
  pub dw0: f64,
  pub dw1: f64,
  pub db: f64,
}

fn finite(name: &'static str, value: f64) -> Result<()> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(Error::NonFinite { name, index: None })
  }
}
