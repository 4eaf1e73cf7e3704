use tracing::{debug, info, trace};

use super::{Dataset, Gradients, Params, Point, Sample, EPOCHS, LEARNING_RATE};
use crate::{Error, Result};

/// Result of a single update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
  pub params: Params,
  /// Half squared error of the sample, measured before the update.
  pub loss: f64,
}

/// Gradients and half squared error of one sample at `params`.
pub fn gradients(params: &Params, sample: &Sample) -> (Gradients, f64) {
  let a = params.predict(sample.x0, sample.x1);
  let err = sample.y - a;
  // libm pow, which does not always round like `err * err`; black_box keeps
  // the call from being folded into a product
  let loss = 0.5 * err.powf(std::hint::black_box(2.0));
  let grads = Gradients {
    dw0: -err * sample.x0,
    dw1: -err * sample.x1,
    db: -err,
  };
  (grads, loss)
}

pub fn step(params: Params, sample: &Sample, lr: f64) -> StepOutcome {
  let (grads, loss) = gradients(&params, sample);
  let params = params.apply(&grads, lr);
  trace!(?sample, loss, ?params, "step");
  StepOutcome { params, loss }
}

/// One pass over `dataset` in order. Returns the updated parameters and the
/// loss summed over every sample of the pass (0 for an empty dataset).
pub fn run_epoch(params: Params, dataset: &Dataset, lr: f64) -> (Params, f64) {
  dataset
    .samples()
    .fold((params, 0.0), |(params, total), sample| {
      let outcome = step(params, &sample, lr);
      (outcome.params, total + outcome.loss)
    })
}

/// Upper bound on `Trainer::epochs`; the loss of every epoch is kept.
pub const MAX_EPOCHS: usize = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trainer {
  epochs: usize,
  learning_rate: f64,
}

impl Trainer {
  pub fn new(epochs: usize, learning_rate: f64) -> Result<Self> {
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
      return Err(Error::InvalidLearningRate(learning_rate));
    }
    if epochs > MAX_EPOCHS {
      return Err(Error::TooManyEpochs {
        got: epochs,
        max: MAX_EPOCHS,
      });
    }
    Ok(Self {
      epochs,
      learning_rate,
    })
  }

  pub fn epochs(&self) -> usize {
    self.epochs
  }

  pub fn learning_rate(&self) -> f64 {
    self.learning_rate
  }

  pub fn fit(&self, dataset: &Dataset, initial: Params) -> Result<Training> {
    self.fit_with(dataset, initial, |_, _| {})
  }

  /// Trains from `initial`, calling `on_epoch(epoch, loss)` after every pass.
  #[tracing::instrument(level = "info", skip(self, dataset, on_epoch), fields(samples = dataset.len(), epochs = self.epochs, lr = self.learning_rate))]
  pub fn fit_with<F>(&self, dataset: &Dataset, initial: Params, mut on_epoch: F) -> Result<Training>
  where
    F: FnMut(usize, f64),
  {
    initial.validate()?;

    let start = std::time::Instant::now();
    let mut params = initial;
    let mut losses = Vec::new();
    for epoch in 0..self.epochs {
      let (next, loss) = run_epoch(params, dataset, self.learning_rate);
      params = next;
      if dataset.is_empty() {
        debug!(epoch, "epoch had no samples, parameters unchanged");
      }
      debug!(epoch, loss, "epoch done");
      on_epoch(epoch, loss);
      losses.push(loss);
    }

    let iters = self.epochs as u128 * dataset.len() as u128;
    if iters > 0 {
      info!("Finished in {iters} iterations");
      info!(
        "Took {:.2}s, {:.2}µs / iter",
        start.elapsed().as_secs_f32(),
        start.elapsed().as_micros() / iters
      );
    }
    info!(?params, "training done");

    Ok(Training { params, losses })
  }
}

impl Default for Trainer {
  fn default() -> Self {
    Self {
      epochs: EPOCHS,
      learning_rate: LEARNING_RATE,
    }
  }
}

/// Final parameters and the loss of every epoch, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Training {
  pub params: Params,
  pub losses: Vec<f64>,
}

impl Training {
  pub fn predict(&self, point: Point) -> Result<f64> {
    point.validate()?;
    Ok(self.params.predict(point.x0, point.x1))
  }

  pub fn last_loss(&self) -> Option<f64> {
    self.losses.last().copied()
  }
}
