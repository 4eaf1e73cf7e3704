pub mod dataset;
pub mod linear_model;
pub mod types;

pub use dataset::*;
pub use linear_model::*;
pub use types::*;
