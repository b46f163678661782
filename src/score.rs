//! Turning comparison sets into kappa scores.
//!
//! Unweighted scoring treats values as nominal labels and numbers them arbitrarily.
//! Weighted scoring needs ranks, read from the leading digits of each label
//! (`"3-somewhat-agree"` is rank 3).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::align::ComparisonSet;
use crate::error::{AgreementError, AgreementResult};
use crate::kappa::{kappa, KappaOptions, Weighting};

static ORDINAL_RANK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)").expect("ordinal rank pattern is valid"));

/// Agreement on one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeScore {
    pub attribute: String,
    /// Kappa coefficient, `None` when undefined (no compared pairs).
    pub score: Option<f64>,
    /// Number of compared pairs.
    pub length: usize,
}

/// Score a comparison set with the given weighting.
pub fn score(set: &ComparisonSet, weighting: Weighting) -> AgreementResult<AttributeScore> {
    score_with(set, &KappaOptions::new(weighting))
}

/// Score a comparison set with full kappa options.
pub fn score_with(set: &ComparisonSet, options: &KappaOptions) -> AgreementResult<AttributeScore> {
    if set.annotator1.len() != set.annotator2.len() {
        return Err(AgreementError::LengthMismatch {
            attribute: set.attribute.clone(),
            annotator1: set.annotator1.len(),
            annotator2: set.annotator2.len(),
        });
    }

    let ratings = if options.weighting.is_weighted() {
        ordinal_codes(set)?
    } else {
        nominal_codes(set)
    };

    let score = kappa(&ratings, options);
    tracing::debug!(
        attribute = %set.attribute,
        weighting = %options.weighting,
        length = ratings.len(),
        ?score,
        "scored attribute"
    );

    Ok(AttributeScore {
        attribute: set.attribute.clone(),
        score,
        length: ratings.len(),
    })
}

/// Number each distinct value (missing included) in order of first appearance.
fn nominal_codes(set: &ComparisonSet) -> Vec<(i64, i64)> {
    let mut codes: HashMap<Option<&str>, i64> = HashMap::new();
    for value in set.annotator1.iter().chain(&set.annotator2) {
        let next = codes.len() as i64 + 1;
        codes.entry(value.as_deref()).or_insert(next);
    }

    set.annotator1
        .iter()
        .zip(&set.annotator2)
        .map(|(a, b)| (codes[&a.as_deref()], codes[&b.as_deref()]))
        .collect()
}

fn ordinal_codes(set: &ComparisonSet) -> AgreementResult<Vec<(i64, i64)>> {
    set.annotator1
        .iter()
        .zip(&set.annotator2)
        .map(|(a, b)| {
            Ok((
                ordinal_rank(&set.attribute, a.as_deref())?,
                ordinal_rank(&set.attribute, b.as_deref())?,
            ))
        })
        .collect()
}

/// Rank encoded as the leading digit run of a label.
pub fn ordinal_rank(attribute: &str, label: Option<&str>) -> AgreementResult<i64> {
    let malformed = || AgreementError::MalformedOrdinalLabel {
        attribute: attribute.to_string(),
        value: label.map(str::to_string),
    };

    let label = label.ok_or_else(malformed)?;
    let captures = ORDINAL_RANK.captures(label).ok_or_else(malformed)?;
    captures[1].parse().map_err(|_| malformed())
}
