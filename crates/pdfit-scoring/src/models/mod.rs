//! One scoring model per metric

pub(crate) mod edf;
mod histogram;
mod likelihood;
mod parameter_mse;
mod quantile;

pub use edf::{probability_transform, AndersonDarlingModel, CramerVonMisesModel, WatsonModel};
pub use histogram::{fitted_histogram, ChiSquaredModel, SseModel};
pub use likelihood::{AicModel, BicModel};
pub use parameter_mse::{ParameterMseModel, DEFAULT_BOOTSTRAP_SEED};
pub use quantile::{plotting_positions, MallowsL2Model, PpSseModel, QqSseModel};
