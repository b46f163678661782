//! Attaching `*_continuation` annotations to the annotation they continue.
//!
//! A group is sorted by type, then end node, then set name. Each continuation is attached to
//! the nearest earlier annotation of its base type in that order. Because continuation types
//! sort after their base type, this is sort order and not document order: every continuation
//! of a type lands on the base annotation with the greatest end node.

use crate::annotation::Annotation;

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    /// Continuations attached to a base annotation.
    pub attached: usize,
    /// Ids of continuations with no base annotation to attach to.
    pub orphaned: Vec<String>,
}

/// A materialized, sorted collection of annotations with continuations resolved.
#[derive(Debug, Clone, Default)]
pub struct AnnotationGroup {
    annotations: Vec<Annotation>,
    summary: ResolutionSummary,
}

impl AnnotationGroup {
    /// Collect, sort and resolve continuations in one pass.
    pub fn new<I>(annotations: I) -> Self
    where
        I: IntoIterator<Item = Annotation>,
    {
        let mut annotations: Vec<Annotation> = annotations.into_iter().collect();
        let summary = resolve_continuations(&mut annotations);
        Self {
            annotations,
            summary,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn summary(&self) -> &ResolutionSummary {
        &self.summary
    }

    pub fn into_annotations(self) -> Vec<Annotation> {
        self.annotations
    }
}

impl<'a> IntoIterator for &'a AnnotationGroup {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sort `annotations` and attach each continuation to its base annotation.
///
/// Continuations stay in the collection; base annotations receive a copy in their
/// continuation list. Orphans are logged and reported, never an error.
pub fn resolve_continuations(annotations: &mut [Annotation]) -> ResolutionSummary {
    annotations.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then(a.span.end.cmp(&b.span.end))
            .then(a.set.cmp(&b.set))
    });

    let mut summary = ResolutionSummary::default();
    for i in 0..annotations.len() {
        let base_kind = match annotations[i].continued_kind() {
            Some(kind) => kind,
            None => continue,
        };

        match annotations[..i].iter().rposition(|a| a.kind == base_kind) {
            Some(base) => {
                let continuation = annotations[i].clone();
                annotations[base].push_continuation(continuation);
                summary.attached += 1;
            }
            None => {
                tracing::warn!(
                    id = %annotations[i].id,
                    kind = %annotations[i].kind,
                    set = %annotations[i].set,
                    "no {} annotation precedes continuation",
                    base_kind
                );
                summary.orphaned.push(annotations[i].id.clone());
            }
        }
    }

    summary
}
