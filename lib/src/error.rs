use std::{
  error,
  fmt::{self, Display},
};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can be rejected before training starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
  /// Two parallel sequences of the dataset have different lengths.
  LengthMismatch {
    name: &'static str,
    got: usize,
    expected: usize,
  },
  /// A NaN or infinite value. `index` is the sample position for dataset
  /// columns and `None` for scalars.
  NonFinite {
    name: &'static str,
    index: Option<usize>,
  },
  /// Labels must be exactly 0 or 1.
  InvalidLabel { index: usize, value: f64 },
  InvalidLearningRate(f64),
  /// More epochs than the loss history is allowed to hold.
  TooManyEpochs { got: usize, max: usize },
}

impl Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::LengthMismatch {
        name,
        got,
        expected,
      } => write!(
        f,
        "column `{name}` has {got} values but the dataset has {expected} samples"
      ),
      Error::NonFinite {
        name,
        index: Some(index),
      } => write!(f, "`{name}[{index}]` is not a finite number"),
      Error::NonFinite { name, index: None } => write!(f, "`{name}` is not a finite number"),
      Error::InvalidLabel { index, value } => {
        write!(f, "label y[{index}] = {value} is neither 0 nor 1")
      }
      Error::InvalidLearningRate(lr) => {
        write!(f, "learning rate must be finite and positive, got {lr}")
      }
      Error::TooManyEpochs { got, max } => {
        write!(f, "{got} epochs requested, at most {max} are supported")
      }
    }
  }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
  use super::Error;

  #[test]
  fn messages_name_the_offending_value() {
    let err = Error::LengthMismatch {
      name: "x1",
      got: 9,
      expected: 10,
    };
    assert_eq!(
      err.to_string(),
      "column `x1` has 9 values but the dataset has 10 samples"
    );

    let err = Error::NonFinite {
      name: "x0",
      index: Some(3),
    };
    assert_eq!(err.to_string(), "`x0[3]` is not a finite number");

    let err = Error::NonFinite {
      name: "learning_rate",
      index: None,
    };
    assert_eq!(err.to_string(), "`learning_rate` is not a finite number");

    let err = Error::InvalidLabel {
      index: 2,
      value: 0.5,
    };
    assert_eq!(err.to_string(), "label y[2] = 0.5 is neither 0 nor 1");

    let err = Error::TooManyEpochs { got: 11, max: 10 };
    assert_eq!(err.to_string(), "11 epochs requested, at most 10 are supported");
  }
}
