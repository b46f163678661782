//! Document, annotation and schema model for comparing GATE annotation sets.
//!
//! A GATE document is an ordered run of offset nodes, each followed by a text fragment, plus
//! named annotation sets whose annotations point at node ids. This crate loads that structure
//! into an arena so span text is a plain range lookup, and loads the annotation schema into a
//! type -> attributes map.
//!
//! ## Core Types
//!
//! - [`Document`] / [`TextNode`] / [`Span`] - node arena and half-open node-id spans
//! - [`Annotation`] / [`Feature`] - typed spans and their name/value pairs
//! - [`AnnotationFilter`] - set or type selection for enumeration
//! - [`AnnotationGroup`] - sorted collection with continuations attached
//! - [`Schema`] - comparable attributes per annotation type
//!
//! ## Example
//!
//! ```
//! use gate_agreement_document::{parse_document, AnnotationFilter};
//!
//! let doc = parse_document(
//!     r#"<GateDocument>
//!     <TextWithNodes><Node id="0"/>Hello <Node id="6"/>world<Node id="11"/></TextWithNodes>
//!     <AnnotationSet Name="Ann1">
//!       <Annotation Id="1" Type="Greeting" StartNode="0" EndNode="6"/>
//!     </AnnotationSet>
//!     </GateDocument>"#,
//! )
//! .unwrap();
//!
//! let filter = AnnotationFilter::sets(["Ann1"], "Greeting");
//! let greeting = doc.annotations(&filter).next().unwrap();
//! assert_eq!(doc.text_of(greeting), "Hello ");
//! ```

mod annotation;
mod continuation;
mod document;
mod error;
mod loader;
mod schema;
mod span;

pub use annotation::{
    Annotation,
    Feature,
    ATTRIBUTION_TYPE,
    CAUSED_EVENT_FEATURE,
    CONTINUATION_SUFFIX,
};

pub use continuation::{
    resolve_continuations,
    AnnotationGroup,
    ResolutionSummary,
};

pub use document::{
    AnnotationFilter,
    AnnotationSet,
    Document,
};

pub use error::{
    DocumentError,
    DocumentResult,
    SchemaLookupError,
};

pub use loader::{
    load_document,
    load_schema,
    parse_document,
    parse_schema,
};

pub use schema::{
    AttributeDecl,
    Schema,
};

pub use span::{
    NodeId,
    Span,
    TextNode,
};
