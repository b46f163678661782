//! The in-memory GATE document: an arena of offset nodes plus named annotation sets.
//!
//! Annotations refer to text only through node ids, so span text is a range lookup over the
//! node arena rather than a walk of the source tree.

use crate::annotation::{Annotation, CONTINUATION_SUFFIX};
use crate::continuation::{AnnotationGroup, ResolutionSummary};
use crate::error::{DocumentError, DocumentResult};
use crate::span::{Span, TextNode};

/// A named group of annotations, usually one per annotator.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSet {
    /// Set name (`""` for the default set).
    pub name: String,
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new(name: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            name: name.into(),
            annotations,
        }
    }
}

/// Selection of annotations to enumerate.
///
/// Set filtering and type filtering are separate variants, so a set filter always carries
/// exactly one annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationFilter {
    /// Every annotation in every set.
    All,
    /// Annotations of the given types across all sets, grouped by type in the order given.
    Types(Vec<String>),
    /// Annotations of one type inside the named sets, grouped by set in the order given.
    Sets {
        sets: Vec<String>,
        annotation_type: String,
    },
}

impl AnnotationFilter {
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnnotationFilter::Types(types.into_iter().map(Into::into).collect())
    }

    pub fn sets<I, S>(sets: I, annotation_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnnotationFilter::Sets {
            sets: sets.into_iter().map(Into::into).collect(),
            annotation_type: annotation_type.into(),
        }
    }
}

/// A loaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Text preceding the first node.
    leading: String,
    /// Offset nodes in ascending id order.
    nodes: Vec<TextNode>,
    sets: Vec<AnnotationSet>,
}

impl Document {
    /// Build a document, checking that node ids are strictly ascending.
    pub fn new(
        leading: impl Into<String>,
        nodes: Vec<TextNode>,
        sets: Vec<AnnotationSet>,
    ) -> DocumentResult<Self> {
        if let Some(pair) = nodes.windows(2).find(|w| w[0].id >= w[1].id) {
            return Err(DocumentError::parse(format!(
                "node ids must be unique and ascending: {} is followed by {}",
                pair[0].id, pair[1].id
            )));
        }

        Ok(Self {
            leading: leading.into(),
            nodes,
            sets,
        })
    }

    pub fn nodes(&self) -> &[TextNode] {
        &self.nodes
    }

    pub fn annotation_sets(&self) -> &[AnnotationSet] {
        &self.sets
    }

    pub fn annotation_set_names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Full document text: the leading text followed by every node fragment in node order.
    pub fn text(&self) -> String {
        let mut text = self.leading.clone();
        for node in &self.nodes {
            text.push_str(&node.fragment);
        }
        text
    }

    /// Concatenated fragments of the nodes whose id lies in `span`.
    pub fn text_span(&self, span: Span) -> String {
        let lo = self.nodes.partition_point(|n| n.id < span.start);
        let hi = self.nodes.partition_point(|n| n.id < span.end);
        self.nodes[lo..hi.max(lo)]
            .iter()
            .map(|n| n.fragment.as_str())
            .collect()
    }

    pub fn text_of(&self, annotation: &Annotation) -> String {
        self.text_span(annotation.span)
    }

    /// Span text of the annotation followed by the text of each attached continuation.
    ///
    /// Annotations read straight from a loaded document carry no continuations until
    /// [`Document::resolve_continuations`] has run for their set and type.
    pub fn full_text_of(&self, annotation: &Annotation) -> String {
        let mut text = self.text_of(annotation);
        for continuation in annotation.continuations() {
            text.push(' ');
            text.push_str(&self.text_of(continuation));
        }
        text
    }

    /// Lazily enumerate annotations matching `filter`.
    ///
    /// Each call starts a fresh pass, so the sequence can be re-read.
    pub fn annotations<'a>(
        &'a self,
        filter: &'a AnnotationFilter,
    ) -> Box<dyn Iterator<Item = &'a Annotation> + 'a> {
        match filter {
            AnnotationFilter::All => Box::new(self.all_annotations()),
            AnnotationFilter::Types(types) => Box::new(
                types
                    .iter()
                    .flat_map(move |t| self.all_annotations().filter(move |a| a.kind == *t)),
            ),
            AnnotationFilter::Sets {
                sets,
                annotation_type,
            } => Box::new(sets.iter().flat_map(move |name| {
                self.sets
                    .iter()
                    .filter(move |s| s.name == *name)
                    .flat_map(|s| s.annotations.iter())
                    .filter(move |a| a.kind == *annotation_type)
            })),
        }
    }

    fn all_annotations(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.sets.iter().flat_map(|s| s.annotations.iter())
    }

    /// Find an annotation by id, preferring the named set.
    pub fn annotation_by_id(&self, set: &str, id: &str) -> Option<&Annotation> {
        self.sets
            .iter()
            .filter(|s| s.name == set)
            .flat_map(|s| s.annotations.iter())
            .find(|a| a.id == id)
            .or_else(|| self.all_annotations().find(|a| a.id == id))
    }

    /// Resolve the causal link of an `Attribution` annotation.
    pub fn caused_event(&self, annotation: &Annotation) -> Option<&Annotation> {
        let id = annotation.caused_event_id()?;
        self.annotation_by_id(&annotation.set, id)
    }

    /// Attach the `<annotation_type>_continuation` annotations of `set` to their base annotations.
    ///
    /// Resolution runs on a sorted copy, so the document order of the set is unchanged.
    /// Running it again replaces earlier results instead of appending to them.
    pub fn resolve_continuations(&mut self, set: &str, annotation_type: &str) -> ResolutionSummary {
        let base = AnnotationFilter::sets([set], annotation_type);
        let continued =
            AnnotationFilter::sets([set], format!("{}{}", annotation_type, CONTINUATION_SUFFIX));
        let group = AnnotationGroup::new(
            self.annotations(&base)
                .chain(self.annotations(&continued))
                .map(|a| {
                    let mut a = a.clone();
                    a.take_continuations();
                    a
                }),
        );
        let summary = group.summary().clone();

        let mut resolved = group.into_annotations();
        for annotation in self
            .sets
            .iter_mut()
            .filter(|s| s.name == set)
            .flat_map(|s| s.annotations.iter_mut())
            .filter(|a| a.kind == annotation_type)
        {
            annotation.take_continuations();
            if let Some(r) = resolved.iter_mut().find(|r| r.id == annotation.id) {
                for continuation in r.take_continuations() {
                    annotation.push_continuation(continuation);
                }
            }
        }

        summary
    }

    /// `"<id> <span text>"` for every annotation of `annotation_type`, in document order.
    ///
    /// These are the choices offered for the `Caused_Event` feature of attributions.
    pub fn id_text_labels(&self, annotation_type: &str) -> Vec<String> {
        self.all_annotations()
            .filter(|a| a.kind == annotation_type)
            .map(|a| format!("{} {}", a.id, self.text_of(a)))
            .collect()
    }
}
