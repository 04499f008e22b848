use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::patterns::*;

/// Options that decide which matches are reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Also scan the reverse complement of each sequence.
    pub both_strands: bool,
    /// Allow reported matches to share bases.
    pub allow_overlap: bool,
    /// Reject matches that touch soft-masked (lowercase) bases.
    pub ignore_repeat: bool,
    pub syntax: ConsensusSyntax,
}

impl ScanConfig {
    /// Patterns only distinguish case when repeats are ignored, so lowercase bases do not match
    /// an uppercase consensus.
    pub fn case_sensitive_pattern(&self) -> bool {
        self.ignore_repeat
    }

    /// Compile a consensus according to these options.
    pub fn compile(&self, consensus: &str) -> Result<Pattern> {
        Pattern::compile_with_syntax(consensus, self.case_sensitive_pattern(), self.syntax)
    }
}

/// Settings loaded from a yaml file.
///
/// Example:
/// ```yaml
/// consensus: GAATTC
/// both_strands: true
/// syntax: iupac
/// ```
/// Unknown keys are rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub consensus: Option<String>,
    pub both_strands: bool,
    pub allow_overlap: bool,
    pub ignore_repeat: bool,
    pub syntax: ConsensusSyntax,
}

impl ConfigFile {
    pub fn scan(&self) -> ScanConfig {
        ScanConfig {
            both_strands: self.both_strands,
            allow_overlap: self.allow_overlap,
            ignore_repeat: self.ignore_repeat,
            syntax: self.syntax,
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("could not parse yaml: {e}")))
    }

    pub fn load(file: impl AsRef<str>) -> Result<Self> {
        let yaml = std::fs::read_to_string(file.as_ref()).map_err(|e| Error::FileIo {
            file: file.as_ref().to_owned(),
            source: Box::new(e),
        })?;
        Self::from_yaml(&yaml)
    }
}

/// Everything needed for one run over a fasta file.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub input: String,
    pub consensus: String,
    /// Write hits to standard output if `None`.
    pub output: Option<String>,
    pub scan: ScanConfig,
    pub threads: usize,
}

impl RunConfig {
    pub fn new(input: impl Into<String>, consensus: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            consensus: consensus.into(),
            output: None,
            scan: ScanConfig::default(),
            threads: 1,
        }
    }

    pub fn check(&self) -> Result<()> {
        if self.consensus.is_empty() {
            return Err(Error::Config("missing motif consensus".to_owned()));
        }
        if self.threads == 0 {
            return Err(Error::Config(
                "number of threads must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
