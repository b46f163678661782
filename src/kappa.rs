//! Cohen's kappa over integer rating codes, optionally weighted by rank distance.
//!
//! Codes are shifted so the smallest one is rank 0. With `p` and `q` the two raters' marginal
//! distributions and `w(d)` the weight of a rank distance `d`:
//!
//! ```text
//! k = 1 - sum(w(|a - b|)) / n  /  sum_ij(w(|i - j|) * p_i * q_j)
//! ```
//!
//! When no distance in the observed rank range carries weight, disagreement cannot be
//! penalised and `k = 1.0`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AgreementError;

/// How disagreement between two ranks is penalised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Every disagreement costs the same; values are nominal categories.
    #[default]
    Unweighted,
    /// Cost grows with rank distance.
    Linear,
    /// Cost grows with the square of rank distance.
    Quadratic,
}

impl Weighting {
    pub fn is_weighted(self) -> bool {
        !matches!(self, Weighting::Unweighted)
    }

    fn weight(self, distance: u64) -> f64 {
        let d = distance as f64;
        match self {
            Weighting::Unweighted => {
                if distance == 0 {
                    0.0
                } else {
                    1.0
                }
            }
            Weighting::Linear => d,
            Weighting::Quadratic => d * d,
        }
    }
}

impl FromStr for Weighting {
    type Err = AgreementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "unweighted" => Ok(Weighting::Unweighted),
            "linear" => Ok(Weighting::Linear),
            "quadratic" => Ok(Weighting::Quadratic),
            _ => Err(AgreementError::UnsupportedWeighting(s.to_string())),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Weighting::Unweighted => "unweighted",
            Weighting::Linear => "linear",
            Weighting::Quadratic => "quadratic",
        })
    }
}

/// Parameters of the kappa computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KappaOptions {
    pub weighting: Weighting,
    /// Treat ranks one apart as agreeing: every non-zero distance is reduced by one.
    pub allow_off_by_one: bool,
}

impl KappaOptions {
    pub fn new(weighting: Weighting) -> Self {
        Self {
            weighting,
            allow_off_by_one: false,
        }
    }

    pub fn allow_off_by_one(mut self, allow: bool) -> Self {
        self.allow_off_by_one = allow;
        self
    }

    fn weight(&self, distance: u64) -> f64 {
        let distance = if self.allow_off_by_one {
            distance.saturating_sub(1)
        } else {
            distance
        };
        self.weighting.weight(distance)
    }
}

/// Kappa for paired ratings `(rater1, rater2)`.
///
/// Returns `None` for an empty input, where agreement is undefined.
pub fn kappa(ratings: &[(i64, i64)], options: &KappaOptions) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }

    let lowest = ratings.iter().map(|&(a, b)| a.min(b)).min()?;
    let highest = ratings.iter().map(|&(a, b)| a.max(b)).max()?;
    if options.weight(highest.abs_diff(lowest)) == 0.0 {
        return Some(1.0);
    }

    let n = ratings.len() as f64;
    let mut marginal1: BTreeMap<i64, f64> = BTreeMap::new();
    let mut marginal2: BTreeMap<i64, f64> = BTreeMap::new();
    let mut observed = 0.0;
    for &(a, b) in ratings {
        *marginal1.entry(a).or_insert(0.0) += 1.0 / n;
        *marginal2.entry(b).or_insert(0.0) += 1.0 / n;
        observed += options.weight(a.abs_diff(b)) / n;
    }

    let mut expected = 0.0;
    for (&i, &p) in &marginal1 {
        for (&j, &q) in &marginal2 {
            expected += options.weight(i.abs_diff(j)) * p * q;
        }
    }

    if expected == 0.0 {
        return None;
    }
    Some(1.0 - observed / expected)
}
