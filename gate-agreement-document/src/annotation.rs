//! Annotations and their features.

use std::collections::HashMap;

use crate::span::Span;

/// Type name whose annotations carry a causal link.
pub const ATTRIBUTION_TYPE: &str = "Attribution";
/// Feature holding the causal link of an [`ATTRIBUTION_TYPE`] annotation.
pub const CAUSED_EVENT_FEATURE: &str = "Caused_Event";
/// Marker appended to a type name for continuation annotations.
pub const CONTINUATION_SUFFIX: &str = "_continuation";

/// A name/value pair attached to an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    /// `None` when the feature has no `<Value>` element; an empty element is `Some("")`.
    pub value: Option<String>,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn without_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A typed span belonging to one annotation set.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    /// Annotation type, e.g. `"Attribution"` or `"Claim_continuation"`.
    pub kind: String,
    /// Name of the owning annotation set (`""` for the default set).
    pub set: String,
    pub span: Span,
    features: Vec<Feature>,
    continuations: Vec<Annotation>,
    caused_event_id: Option<String>,
}

impl Annotation {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        set: impl Into<String>,
        span: Span,
        features: Vec<Feature>,
    ) -> Self {
        let kind = kind.into();
        let caused_event_id = if kind == ATTRIBUTION_TYPE {
            features
                .iter()
                .find(|f| f.name == CAUSED_EVENT_FEATURE)
                .and_then(Feature::value)
                .and_then(|v| v.split_whitespace().next())
                .map(str::to_string)
        } else {
            None
        };

        Self {
            id: id.into(),
            kind,
            set: set.into(),
            span,
            features,
            continuations: Vec::new(),
            caused_event_id,
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Value of the first feature called `name`.
    ///
    /// A feature without a value reads the same as a missing one.
    pub fn feature(&self, name: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .and_then(Feature::value)
    }

    /// Flatten features into a name -> value map. Later duplicates win.
    pub fn feature_map(&self) -> HashMap<&str, Option<&str>> {
        self.features
            .iter()
            .map(|f| (f.name.as_str(), f.value()))
            .collect()
    }

    /// Id of the event this attribution points at.
    ///
    /// Only set for `Attribution` annotations with a `Caused_Event` feature; the id is the first
    /// whitespace-delimited token of the feature value.
    pub fn caused_event_id(&self) -> Option<&str> {
        self.caused_event_id.as_deref()
    }

    pub fn continuations(&self) -> &[Annotation] {
        &self.continuations
    }

    pub fn is_continuation(&self) -> bool {
        self.kind.contains(CONTINUATION_SUFFIX)
    }

    /// Type this continuation continues, e.g. `"Claim"` for `"Claim_continuation"`.
    pub fn continued_kind(&self) -> Option<String> {
        if self.is_continuation() {
            Some(self.kind.replace(CONTINUATION_SUFFIX, ""))
        } else {
            None
        }
    }

    pub(crate) fn push_continuation(&mut self, continuation: Annotation) {
        self.continuations.push(continuation);
    }

    pub(crate) fn take_continuations(&mut self) -> Vec<Annotation> {
        std::mem::take(&mut self.continuations)
    }
}
