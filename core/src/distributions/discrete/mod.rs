//! Distributions over the integers.

mod bernoulli;
mod binomial;
mod discrete_uniform;
mod geometric;
mod poisson;

pub use bernoulli::{Bernoulli, BernoulliParams};
pub use binomial::{Binomial, BinomialParams, MAX_TRIALS};
pub use discrete_uniform::{DiscreteUniform, DiscreteUniformParams};
pub use geometric::{Geometric, GeometricParams};
pub use poisson::{Poisson, PoissonParams};
