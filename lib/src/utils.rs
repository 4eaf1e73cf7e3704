#[cfg(not(debug_assertions))]
use human_panic::setup_panic;
use tracing::subscriber::{self, DefaultGuard, SetGlobalDefaultError};

#[cfg(debug_assertions)]
extern crate better_panic;

use tracing_subscriber::{fmt, EnvFilter};

// [NOTE] logging
//
// Events go to stderr so that stdout only carries the `loss = ...` lines and
// the final `Output ...` line. Verbosity comes from RUST_LOG, default `warn`:
//
//   RUST_LOG=linfit=info   start/end of training, wall time
//   RUST_LOG=linfit=debug  one event per epoch
//   RUST_LOG=linfit=trace  one event per sample step

fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn install_logger() -> Result<(), SetGlobalDefaultError> {
  let subscriber = fmt()
    .compact()
    .with_env_filter(env_filter())
    .with_writer(std::io::stderr)
    .finish();
  subscriber::set_global_default(subscriber)
}

pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
  // Human Panic. Only enabled when *not* debugging.
  #[cfg(not(debug_assertions))]
  {
    setup_panic!();
  }

  // Better Panic. Only enabled *when* debugging.
  #[cfg(debug_assertions)]
  {
    better_panic::Settings::debug()
      .most_recent_first(false)
      .lineno_suffix(true)
      .verbosity(better_panic::Verbosity::Full)
      .install();
  }

  install_logger()
}

/// Scoped subscriber for tests, captured by the test harness. Logging stops
/// when the guard is dropped.
pub fn init_logging_tests() -> DefaultGuard {
  let subscriber = fmt()
    .compact()
    .with_env_filter(env_filter())
    .with_test_writer()
    .finish();
  subscriber::set_default(subscriber)
}
