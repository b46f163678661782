//! Inter-annotator agreement for GATE annotation sets.
//!
//! Two annotators mark the same document in separate annotation sets. This crate aligns their
//! annotations of one type by span overlap and reports, for every attribute the schema
//! declares, how well they agree as a kappa coefficient.
//!
//! ## Modules
//!
//! - [`align`] - greedy span-overlap pairing and per-attribute comparison sets
//! - [`score`] - nominal and ordinal encoding of comparison sets
//! - [`kappa`] - the (weighted) kappa coefficient
//! - [`config`] - TOML run configuration
//! - [`runner`] - load, align and score in one call
//! - [`report`] - per-attribute results
//!
//! ## Example
//!
//! ```
//! use gate_agreement::{pair, score, Weighting};
//! use gate_agreement::document::{parse_document, AnnotationFilter, AttributeDecl, Schema};
//!
//! let doc = parse_document(
//!     r#"<GateDocument>
//!     <TextWithNodes><Node id="0"/>a<Node id="1"/>b<Node id="2"/>c<Node id="3"/>d<Node id="4"/></TextWithNodes>
//!     <AnnotationSet Name="Ann1">
//!       <Annotation Id="1" Type="Span" StartNode="0" EndNode="2">
//!         <Feature><Name>Polarity</Name><Value>pos</Value></Feature>
//!       </Annotation>
//!     </AnnotationSet>
//!     <AnnotationSet Name="Ann2">
//!       <Annotation Id="2" Type="Span" StartNode="1" EndNode="3">
//!         <Feature><Name>Polarity</Name><Value>pos</Value></Feature>
//!       </Annotation>
//!     </AnnotationSet>
//!     </GateDocument>"#,
//! )
//! .unwrap();
//!
//! let mut schema = Schema::new();
//! schema.declare("Span", vec![AttributeDecl::new("Polarity")]);
//!
//! let ann1 = AnnotationFilter::sets(["Ann1"], "Span");
//! let ann2 = AnnotationFilter::sets(["Ann2"], "Span");
//! let sets = pair(doc.annotations(&ann1), doc.annotations(&ann2), "Span", &schema).unwrap();
//!
//! let result = score(&sets[0], Weighting::Unweighted).unwrap();
//! assert_eq!(result.score, Some(1.0));
//! assert_eq!(result.length, 1);
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod kappa;
pub mod report;
pub mod runner;
pub mod score;

/// The document, annotation and schema model.
pub use gate_agreement_document as document;

// Re-exports for convenient access to core types
pub use align::{align, comparison_sets, pair, pair_annotations, Alignment, AnnotationPair, ComparisonSet};
pub use config::AgreementConfig;
pub use error::{AgreementError, AgreementResult};
pub use kappa::{kappa, KappaOptions, Weighting};
pub use report::AgreementReport;
pub use runner::{run, run_on};
pub use score::{ordinal_rank, score, score_with, AttributeScore};
