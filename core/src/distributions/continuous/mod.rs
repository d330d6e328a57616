//! Distributions over the reals.

mod continuous_uniform;
mod exponential;
mod laplace;
mod log_normal;
mod normal;
mod weibull;

pub use continuous_uniform::{ContinuousUniform, ContinuousUniformParams};
pub use exponential::{Exponential, ExponentialParams};
pub use laplace::{Laplace, LaplaceParams};
pub use log_normal::LogNormal;
pub use normal::{Normal, NormalParams};
pub use weibull::{Weibull, WeibullParams};
