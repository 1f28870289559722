//! Page-level collection of code steps hosts
//!
//! A manifest plays the role of the page: it lists every annotated block.
//!
//! ```yaml
//! hosts:
//!   - text: "fn main() {}"
//!     language: rust
//!     steps: "l1c1-l1c2:Keyword"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CodeStepsError;
use crate::host::{CodeSteps, HostOptions};
use crate::observer::StepObserver;
use crate::syntax::Tokenizer;

/// Host list as stored in YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub hosts: Vec<HostOptions>,
}

impl Manifest {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// A host that failed to build
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedHost {
    /// Position in the manifest
    pub index: usize,
    pub error: CodeStepsError,
}

/// Every successfully built host of a page
pub struct CodeStepsManager {
    tokenizer: Box<dyn Tokenizer>,
    hosts: Vec<CodeSteps>,
    skipped: Vec<SkippedHost>,
}

impl CodeStepsManager {
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            hosts: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Build every host of `manifest`. Hosts that fail fatally are logged
    /// and skipped; the rest keep working.
    pub fn from_manifest(
        tokenizer: Box<dyn Tokenizer>,
        manifest: Manifest,
        observer: &mut dyn StepObserver,
    ) -> Self {
        let mut manager = Self::new(tokenizer);
        for options in manifest.hosts {
            manager.add(options, observer).ok();
        }
        manager
    }

    /// Parse manifest YAML and build its hosts
    pub fn parse_yaml(
        tokenizer: Box<dyn Tokenizer>,
        content: &str,
        observer: &mut dyn StepObserver,
    ) -> Result<Self, serde_yaml::Error> {
        let manifest = Manifest::from_yaml(content)?;
        Ok(Self::from_manifest(tokenizer, manifest, observer))
    }

    /// Build one host and append it. Returns its index among built hosts.
    pub fn add(
        &mut self,
        options: HostOptions,
        observer: &mut dyn StepObserver,
    ) -> Result<usize, CodeStepsError> {
        let index = self.hosts.len() + self.skipped.len();
        match CodeSteps::new(options, self.tokenizer.as_mut(), observer) {
            Ok(host) => {
                self.hosts.push(host);
                Ok(self.hosts.len() - 1)
            }
            Err(error) => {
                tracing::warn!("Skipping code steps host #{}: {}", index, error);
                self.skipped.push(SkippedHost {
                    index,
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    pub fn hosts(&self) -> &[CodeSteps] {
        &self.hosts
    }

    pub fn hosts_mut(&mut self) -> &mut [CodeSteps] {
        &mut self.hosts
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CodeSteps> {
        self.hosts.get_mut(index)
    }

    pub fn skipped(&self) -> &[SkippedHost] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
