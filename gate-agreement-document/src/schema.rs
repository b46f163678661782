//! Annotation schema: which attributes of each annotation type are comparable.

use std::collections::BTreeMap;

use crate::error::SchemaLookupError;

/// One attribute declared for an annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: String,
    /// Enumerated choices from the schema restriction, if any.
    pub allowed_values: Vec<String>,
}

impl AttributeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allowed_values: Vec::new(),
        }
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Mapping from annotation type to its comparable attributes, built once at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    types: BTreeMap<String, Vec<AttributeDecl>>,
    /// When set, looking up an undeclared type is an error instead of an empty list.
    strict: bool,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle strict lookups.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Declare attributes for a type. Repeated declarations merge; a name already declared
    /// for the type keeps its first position.
    pub fn declare(&mut self, annotation_type: impl Into<String>, attributes: Vec<AttributeDecl>) {
        let declared = self.types.entry(annotation_type.into()).or_default();
        for attribute in attributes {
            if !declared.iter().any(|a| a.name == attribute.name) {
                declared.push(attribute);
            }
        }
    }

    pub fn annotation_types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn declares(&self, annotation_type: &str) -> bool {
        self.types.contains_key(annotation_type)
    }

    /// Attribute names declared for `annotation_type`, in declaration order.
    ///
    /// An undeclared type yields an empty list, or [`SchemaLookupError`] in strict mode.
    pub fn attributes_for(&self, annotation_type: &str) -> Result<Vec<&str>, SchemaLookupError> {
        match self.types.get(annotation_type) {
            Some(attributes) => Ok(attributes.iter().map(|a| a.name.as_str()).collect()),
            None if self.strict => Err(SchemaLookupError {
                annotation_type: annotation_type.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    pub fn allowed_values(&self, annotation_type: &str, attribute: &str) -> Option<&[String]> {
        self.types
            .get(annotation_type)?
            .iter()
            .find(|a| a.name == attribute)
            .map(|a| a.allowed_values.as_slice())
    }
}
