//! Normal and lognormal maximum likelihood

use super::{fit, positive_variance, require_count, require_positive, Estimate};
use pdfit_core::{Family, StatisticSummary};

/// Sample mean and sample variance
pub fn estimate_normal(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    let variance = positive_variance(stats)?;
    fit(Family::Normal, &[stats.mean, variance])
}

/// Fit a normal to `ln x` and report the mean and variance of `x`
pub fn estimate_lognormal(data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    require_positive(Family::Lognormal, stats)?;

    let logs: Vec<f64> = data.iter().map(|x| x.ln()).collect();
    let log_stats = StatisticSummary::of(&logs);
    let sigma2 = positive_variance(&log_stats)?;
    let mu = log_stats.mean;

    let mean = (mu + sigma2 / 2.0).exp();
    let variance = (2.0 * mu + sigma2).exp() * sigma2.exp_m1();
    fit(Family::Lognormal, &[mean, variance])
}
