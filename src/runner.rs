//! End-to-end comparison of two annotators.

use gate_agreement_document::{load_document, load_schema, AnnotationFilter, Document, Schema};

use crate::align::align;
use crate::config::AgreementConfig;
use crate::error::{AgreementError, AgreementResult};
use crate::report::AgreementReport;
use crate::score::score_with;

/// Load the configured document and schema, then compare the two annotators.
pub fn run(config: &AgreementConfig) -> AgreementResult<AgreementReport> {
    config.validate()?;
    let mut document = load_document(&config.document)?;
    let schema = load_schema(&config.schema)?.strict(config.strict_schema);
    run_on(&mut document, &schema, config)
}

/// Compare the two configured annotators on an already loaded document.
///
/// Continuations of both annotators are resolved in place first. The schema is used as given;
/// `strict_schema` in the config only applies to [`run`].
pub fn run_on(
    document: &mut Document,
    schema: &Schema,
    config: &AgreementConfig,
) -> AgreementResult<AgreementReport> {
    let weighting = config.weighting()?;
    let (first, second) = config.annotators()?;
    let annotation_type = config.annotation_type.as_str();

    let mut orphaned_continuations = Vec::new();
    for set in [first, second] {
        let summary = document.resolve_continuations(set, annotation_type);
        orphaned_continuations.extend(
            summary
                .orphaned
                .iter()
                .map(|id| format!("{}:{}", set, id)),
        );
    }

    let filter1 = AnnotationFilter::sets([first], annotation_type);
    let filter2 = AnnotationFilter::sets([second], annotation_type);
    let alignment = align(
        document.annotations(&filter1),
        document.annotations(&filter2),
        annotation_type,
        schema,
    )?;

    let pairs = alignment.pairs.len();
    if pairs == 0 {
        if config.require_pairs {
            return Err(AgreementError::AlignmentEmpty {
                annotation_type: annotation_type.to_string(),
            });
        }
        tracing::warn!(
            annotation_type,
            first,
            second,
            "no overlapping annotations, agreement is undefined"
        );
    }

    let scores = alignment
        .comparison_sets
        .iter()
        .map(|set| score_with(set, &config.options_for(&set.attribute)?))
        .collect::<AgreementResult<Vec<_>>>()?;
    for score in &scores {
        tracing::info!(
            attribute = %score.attribute,
            score = ?score.score,
            length = score.length,
            "agreement"
        );
    }

    let unmatched = [
        document.annotations(&filter1).count() - pairs,
        document.annotations(&filter2).count() - pairs,
    ];

    Ok(AgreementReport {
        annotation_type: annotation_type.to_string(),
        annotators: [first.to_string(), second.to_string()],
        weighting,
        pairs,
        unmatched,
        orphaned_continuations,
        scores,
    })
}
