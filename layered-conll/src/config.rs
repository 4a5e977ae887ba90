//! Writer configuration.

use crate::{ConllError, ConllResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for [`Conll2009Writer`](crate::Conll2009Writer).
///
/// Every key is optional in TOML; missing keys take their defaults.
///
/// ```toml
/// encoding = "UTF-8"
/// filenameSuffix = ".conll"
/// writePos = true
/// writeLemma = true
/// writeMorph = true
/// writeDependency = true
/// writeSemanticPredicate = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Conll2009Config {
    /// Character encoding of the output. Only UTF-8 is supported.
    pub encoding: String,
    /// Appended to the document id to name per-document output files.
    pub filename_suffix: String,
    /// If false, POS and PPOS are `_`.
    pub write_pos: bool,
    /// If false, LEMMA and PLEMMA are `_`.
    pub write_lemma: bool,
    /// If false, FEAT and PFEAT are `_`.
    pub write_morph: bool,
    /// If false, HEAD, PHEAD, DEPREL and PDEPREL are `_`.
    pub write_dependency: bool,
    /// If false, FILLPRED, PRED and every APRED are `_`.
    pub write_semantic_predicate: bool,
}

impl Default for Conll2009Config {
    fn default() -> Self {
        Self {
            encoding: "UTF-8".to_string(),
            filename_suffix: ".conll".to_string(),
            write_pos: true,
            write_lemma: true,
            write_morph: true,
            write_dependency: true,
            write_semantic_predicate: true,
        }
    }
}

impl Conll2009Config {
    /// Parse a TOML configuration.
    pub fn from_toml_str(content: &str) -> ConllResult<Self> {
        toml::from_str(content).map_err(|e| ConllError::Config {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> ConllResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConllError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConllError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_filename_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.filename_suffix = suffix.into();
        self
    }

    pub fn with_pos(mut self, write: bool) -> Self {
        self.write_pos = write;
        self
    }

    pub fn with_lemma(mut self, write: bool) -> Self {
        self.write_lemma = write;
        self
    }

    pub fn with_morph(mut self, write: bool) -> Self {
        self.write_morph = write;
        self
    }

    pub fn with_dependency(mut self, write: bool) -> Self {
        self.write_dependency = write;
        self
    }

    pub fn with_semantic_predicate(mut self, write: bool) -> Self {
        self.write_semantic_predicate = write;
        self
    }

    /// Fail unless the configured encoding names UTF-8 (`UTF-8`, `utf8`, ...).
    pub fn check_encoding(&self) -> ConllResult<()> {
        let normalized: String = self
            .encoding
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        if normalized == "utf8" {
            Ok(())
        } else {
            Err(ConllError::UnsupportedEncoding {
                encoding: self.encoding.clone(),
            })
        }
    }
}
