//! Agreement report for one annotation type and annotator pair.

use std::fmt;

use serde::Serialize;

use crate::error::AgreementResult;
use crate::kappa::Weighting;
use crate::score::AttributeScore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementReport {
    pub annotation_type: String,
    pub annotators: [String; 2],
    pub weighting: Weighting,
    /// Aligned annotation pairs.
    pub pairs: usize,
    /// Annotations of each annotator left without a partner.
    pub unmatched: [usize; 2],
    /// `set:id` of continuations with no base annotation.
    pub orphaned_continuations: Vec<String>,
    pub scores: Vec<AttributeScore>,
}

impl AgreementReport {
    pub fn score_for(&self, attribute: &str) -> Option<&AttributeScore> {
        self.scores.iter().find(|s| s.attribute == attribute)
    }

    pub fn to_json(&self) -> AgreementResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for AgreementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} vs {} ({})",
            self.annotation_type, self.annotators[0], self.annotators[1], self.weighting
        )?;
        write!(
            f,
            "pairs: {}, unmatched: {} / {}",
            self.pairs, self.unmatched[0], self.unmatched[1]
        )?;

        let width = self
            .scores
            .iter()
            .map(|s| s.attribute.chars().count())
            .max()
            .unwrap_or(0);
        for score in &self.scores {
            let value = match score.score {
                Some(k) => format!("{:>6.3}", k),
                None => format!("{:>6}", "-"),
            };
            write!(
                f,
                "\n  {:<width$}  {}  n={}",
                score.attribute,
                value,
                score.length,
                width = width
            )?;
        }

        if !self.orphaned_continuations.is_empty() {
            write!(
                f,
                "\norphaned continuations: {}",
                self.orphaned_continuations.join(", ")
            )?;
        }
        Ok(())
    }
}
