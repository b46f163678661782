//! Run configuration, read from TOML.
//!
//! ```toml
//! document = "doc.xml"
//! schema = "schema.xsd"
//! annotation_type = "Attribution"
//! annotators = ["Ann1", "Ann2"]
//! weighting = "linear"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AgreementError, AgreementResult};
use crate::kappa::{KappaOptions, Weighting};

/// What to compare and how to score it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgreementConfig {
    /// GATE document holding both annotators' sets. Relative paths are resolved against the
    /// directory of the config file.
    pub document: PathBuf,
    /// GATE annotation schema declaring the comparable attributes.
    pub schema: PathBuf,
    pub annotation_type: String,
    /// Exactly two annotation set names.
    pub annotators: Vec<String>,
    /// `none`, `linear` or `quadratic`; unweighted when absent.
    #[serde(default)]
    pub weighting: Option<String>,
    /// Attributes scored with `weighting`; the rest are scored as nominal labels.
    /// When empty, `weighting` applies to every attribute.
    #[serde(default)]
    pub weighted_attributes: Vec<String>,
    #[serde(default)]
    pub allow_off_by_one: bool,
    /// Fail when the schema does not declare `annotation_type`.
    #[serde(default)]
    pub strict_schema: bool,
    /// Fail when no annotations overlap instead of reporting undefined scores.
    #[serde(default)]
    pub require_pairs: bool,
    #[serde(skip)]
    origin: String,
}

impl AgreementConfig {
    pub fn new(
        document: impl Into<PathBuf>,
        schema: impl Into<PathBuf>,
        annotation_type: impl Into<String>,
        annotators: [&str; 2],
    ) -> Self {
        Self {
            document: document.into(),
            schema: schema.into(),
            annotation_type: annotation_type.into(),
            annotators: annotators.iter().map(|s| s.to_string()).collect(),
            weighting: None,
            weighted_attributes: Vec::new(),
            allow_off_by_one: false,
            strict_schema: false,
            require_pairs: false,
            origin: "<inline>".to_string(),
        }
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = Some(weighting.to_string());
        self
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> AgreementResult<Self> {
        let origin = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| AgreementError::Config {
            path: origin.clone(),
            message: e.to_string(),
        })?;

        let mut config = Self::parse(&content, origin)?;
        if let Some(base) = path.parent() {
            if config.document.is_relative() {
                config.document = base.join(&config.document);
            }
            if config.schema.is_relative() {
                config.schema = base.join(&config.schema);
            }
        }
        Ok(config)
    }

    /// Parse TOML config text. Paths are kept as written.
    pub fn from_toml_str(content: &str) -> AgreementResult<Self> {
        Self::parse(content, "<inline>".to_string())
    }

    fn parse(content: &str, origin: String) -> AgreementResult<Self> {
        let mut config: Self = toml::from_str(content).map_err(|e| AgreementError::Config {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        config.origin = origin;
        config.validate()?;
        Ok(config)
    }

    /// Check the weighting name and annotator count.
    pub fn validate(&self) -> AgreementResult<()> {
        self.kappa_options()?;
        self.annotators()?;
        Ok(())
    }

    pub fn weighting(&self) -> AgreementResult<Weighting> {
        match self.weighting.as_deref() {
            Some(name) => name.parse(),
            None => Ok(Weighting::Unweighted),
        }
    }

    pub fn kappa_options(&self) -> AgreementResult<KappaOptions> {
        Ok(KappaOptions::new(self.weighting()?).allow_off_by_one(self.allow_off_by_one))
    }

    /// Options for scoring one attribute, honouring `weighted_attributes`.
    pub fn options_for(&self, attribute: &str) -> AgreementResult<KappaOptions> {
        let weighted = self.weighted_attributes.is_empty()
            || self.weighted_attributes.iter().any(|a| a == attribute);
        if weighted {
            self.kappa_options()
        } else {
            Ok(KappaOptions::default())
        }
    }

    /// The two annotation set names being compared.
    pub fn annotators(&self) -> AgreementResult<(&str, &str)> {
        match self.annotators.as_slice() {
            [first, second] => Ok((first.as_str(), second.as_str())),
            other => Err(AgreementError::Config {
                path: self.origin.clone(),
                message: format!("expected exactly two annotators, found {}", other.len()),
            }),
        }
    }
}
