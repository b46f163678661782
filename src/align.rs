//! Greedy first-fit alignment of two annotators' annotations.
//!
//! Each annotation of the first annotator, in input order, takes the first still-unclaimed
//! annotation of the second annotator whose span it overlaps (see [`Span::pairs_with`]). There
//! is no search for the best overlap, so the result depends on input order. Annotations left
//! without a partner are dropped from the comparison.
//!
//! [`Span::pairs_with`]: gate_agreement_document::Span::pairs_with

use gate_agreement_document::{Annotation, Schema};

use crate::error::AgreementResult;

/// Two annotations judged to mark the same thing.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationPair<'a> {
    pub first: &'a Annotation,
    pub second: &'a Annotation,
}

/// Values of one attribute across all aligned pairs.
///
/// Index `i` of both columns belongs to the same pair; `None` marks an annotation that does
/// not carry the attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSet {
    pub attribute: String,
    pub annotator1: Vec<Option<String>>,
    pub annotator2: Vec<Option<String>>,
}

impl ComparisonSet {
    pub fn new(
        attribute: impl Into<String>,
        annotator1: Vec<Option<String>>,
        annotator2: Vec<Option<String>>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            annotator1,
            annotator2,
        }
    }

    /// Number of compared pairs.
    pub fn len(&self) -> usize {
        self.annotator1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotator1.is_empty()
    }
}

/// Pairs plus the per-attribute comparison sets projected from them.
#[derive(Debug, Clone)]
pub struct Alignment<'a> {
    pub pairs: Vec<AnnotationPair<'a>>,
    pub comparison_sets: Vec<ComparisonSet>,
}

/// Greedily pair annotations of `set1` with annotations of `set2`.
pub fn pair_annotations<'a, I, J>(set1: I, set2: J) -> Vec<AnnotationPair<'a>>
where
    I: IntoIterator<Item = &'a Annotation>,
    J: IntoIterator<Item = &'a Annotation>,
{
    let pool: Vec<&'a Annotation> = set2.into_iter().collect();
    let mut claimed = vec![false; pool.len()];
    let mut pairs = Vec::new();

    for first in set1 {
        let hit = pool
            .iter()
            .zip(&claimed)
            .position(|(candidate, &taken)| !taken && first.span.pairs_with(&candidate.span));

        if let Some(idx) = hit {
            claimed[idx] = true;
            pairs.push(AnnotationPair {
                first,
                second: pool[idx],
            });
        }
    }

    pairs
}

/// Project each attribute's values out of the pairs, one column per annotator.
pub fn comparison_sets<S: AsRef<str>>(
    pairs: &[AnnotationPair<'_>],
    attributes: &[S],
) -> Vec<ComparisonSet> {
    let flattened: Vec<_> = pairs
        .iter()
        .map(|pair| (pair.first.feature_map(), pair.second.feature_map()))
        .collect();

    attributes
        .iter()
        .map(|attribute| {
            let attribute = attribute.as_ref();
            let (annotator1, annotator2) = flattened
                .iter()
                .map(|(first, second)| {
                    (
                        first.get(attribute).and_then(|v| v.map(str::to_string)),
                        second.get(attribute).and_then(|v| v.map(str::to_string)),
                    )
                })
                .unzip();
            ComparisonSet::new(attribute, annotator1, annotator2)
        })
        .collect()
}

/// Pair two annotation sets and build a comparison set for every attribute `schema`
/// declares for `annotation_type`.
pub fn align<'a, I, J>(
    set1: I,
    set2: J,
    annotation_type: &str,
    schema: &Schema,
) -> AgreementResult<Alignment<'a>>
where
    I: IntoIterator<Item = &'a Annotation>,
    J: IntoIterator<Item = &'a Annotation>,
{
    let attributes = schema.attributes_for(annotation_type)?;
    let pairs = pair_annotations(set1, set2);
    tracing::debug!(
        annotation_type,
        pairs = pairs.len(),
        attributes = attributes.len(),
        "aligned annotation sets"
    );

    let comparison_sets = comparison_sets(&pairs, &attributes);
    Ok(Alignment {
        pairs,
        comparison_sets,
    })
}

/// Comparison sets for two annotation sets; see [`align`].
pub fn pair<'a, I, J>(
    set1: I,
    set2: J,
    annotation_type: &str,
    schema: &Schema,
) -> AgreementResult<Vec<ComparisonSet>>
where
    I: IntoIterator<Item = &'a Annotation>,
    J: IntoIterator<Item = &'a Annotation>,
{
    Ok(align(set1, set2, annotation_type, schema)?.comparison_sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_agreement_document::{AttributeDecl, Feature, Span};

    fn ann(id: &str, start: u64, end: u64, features: &[(&str, &str)]) -> Annotation {
        Annotation::new(
            id,
            "Span",
            "",
            Span::new(start, end).unwrap(),
            features.iter().map(|(n, v)| Feature::new(*n, *v)).collect(),
        )
    }

    fn ids<'a>(pairs: &[AnnotationPair<'a>]) -> Vec<(&'a str, &'a str)> {
        pairs
            .iter()
            .map(|p| (p.first.id.as_str(), p.second.id.as_str()))
            .collect()
    }

    fn values(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn schema(attributes: &[&str]) -> Schema {
        let mut schema = Schema::new();
        schema.declare(
            "Span",
            attributes.iter().map(|a| AttributeDecl::new(*a)).collect(),
        );
        schema
    }

    #[test]
    fn test_first_fit_takes_first_overlap_not_best() {
        let set1 = vec![ann("a", 0, 10, &[])];
        // "x" barely overlaps, "y" matches exactly; "x" comes first and wins
        let set2 = vec![ann("x", 9, 20, &[]), ann("y", 0, 10, &[])];
        let pairs = pair_annotations(&set1, &set2);
        assert_eq!(ids(&pairs), vec![("a", "x")]);
    }

    #[test]
    fn test_claimed_candidate_is_not_reused() {
        let set1 = vec![ann("a", 0, 5, &[]), ann("b", 1, 4, &[])];
        let set2 = vec![ann("x", 0, 5, &[]), ann("y", 2, 6, &[])];
        let pairs = pair_annotations(&set1, &set2);
        assert_eq!(
            ids(&pairs),
            vec![("a", "x"), ("b", "y")]
        );
    }

    #[test]
    fn test_order_changes_result() {
        let set1 = vec![ann("a", 0, 5, &[]), ann("b", 4, 8, &[])];
        let set2 = vec![ann("x", 3, 6, &[])];
        assert_eq!(ids(&pair_annotations(&set1, &set2)), vec![("a", "x")]);

        let reversed: Vec<_> = set1.iter().rev().cloned().collect();
        assert_eq!(ids(&pair_annotations(&reversed, &set2)), vec![("b", "x")]);
    }

    #[test]
    fn test_unmatched_are_dropped() {
        let set1 = vec![ann("a", 0, 2, &[]), ann("b", 20, 22, &[])];
        let set2 = vec![ann("x", 1, 3, &[]), ann("y", 40, 41, &[])];
        assert_eq!(ids(&pair_annotations(&set1, &set2)), vec![("a", "x")]);
    }

    #[test]
    fn test_touching_spans_never_pair() {
        let set1 = vec![ann("a", 0, 5, &[])];
        let set2 = vec![ann("x", 5, 10, &[])];
        assert!(pair_annotations(&set1, &set2).is_empty());
    }

    #[test]
    fn test_comparison_sets_follow_schema_and_pair_order() {
        let set1 = vec![
            ann("a", 0, 3, &[("Polarity", "pos"), ("Source", "me")]),
            ann("b", 5, 8, &[("Polarity", "neg")]),
        ];
        let set2 = vec![
            ann("y", 6, 9, &[("Polarity", "neg"), ("Source", "them")]),
            ann("x", 1, 3, &[("Polarity", "pos")]),
        ];

        let sets = pair(&set1, &set2, "Span", &schema(&["Source", "Polarity", "Missing"])).unwrap();
        assert_eq!(sets.len(), 3);
        assert_eq!(
            sets[0],
            ComparisonSet::new(
                "Source",
                values(&[Some("me"), None]),
                values(&[None, Some("them")]),
            )
        );
        assert_eq!(sets[1].annotator1, values(&[Some("pos"), Some("neg")]));
        assert_eq!(sets[1].annotator2, values(&[Some("pos"), Some("neg")]));
        assert_eq!(sets[2].annotator1, values(&[None, None]));
        for set in &sets {
            assert_eq!(set.annotator1.len(), set.annotator2.len());
        }
    }

    #[test]
    fn test_no_overlap_gives_empty_columns() {
        let set1 = vec![ann("a", 0, 2, &[("Polarity", "pos")])];
        let set2 = vec![ann("x", 4, 6, &[("Polarity", "pos")])];
        let sets = pair(&set1, &set2, "Span", &schema(&["Polarity"])).unwrap();
        assert_eq!(sets.len(), 1);
        assert!(sets[0].is_empty());
        assert!(sets[0].annotator2.is_empty());
    }

    #[test]
    fn test_strict_schema_propagates_lookup_error() {
        let set1 = vec![ann("a", 0, 2, &[])];
        let strict = schema(&["Polarity"]).strict(true);
        let err = pair(&set1, &set1, "Claim", &strict).unwrap_err();
        assert!(matches!(err, crate::AgreementError::SchemaLookup(_)));
    }
}
