use regex::bytes::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::*;

/// IUPAC nucleotide codes accepted in [`ConsensusSyntax::Iupac`] consensus strings.
pub const IUPAC_CODES: &[u8] = b"ACGTRYMKSWHBVDN";

/// How a consensus string is turned into a pattern.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusSyntax {
    /// The consensus is used verbatim as a regular expression, so bracketed alternatives like
    /// `A[CG]T` and quantifiers are allowed.
    #[default]
    Regex,
    /// Every character is a single IUPAC code that is expanded to the set of bases it includes.
    Iupac,
}

/// Whether the base `base` is included in the IUPAC code `code`.
///
/// Both bytes are compared case-insensitively. `N` includes every base, including `N` itself.
pub fn iupac_includes(code: u8, base: u8) -> bool {
    let code = code.to_ascii_uppercase();
    let base = base.to_ascii_uppercase();

    if code == base || code == b'N' {
        return true;
    }

    match code {
        b'R' => matches!(base, b'A' | b'G'),
        b'Y' => matches!(base, b'C' | b'T'),
        b'M' => matches!(base, b'A' | b'C'),
        b'K' => matches!(base, b'G' | b'T'),
        b'S' => matches!(base, b'C' | b'G'),
        b'W' => matches!(base, b'A' | b'T'),
        b'H' => matches!(base, b'A' | b'C' | b'T'),
        b'B' => matches!(base, b'C' | b'G' | b'T'),
        b'V' => matches!(base, b'A' | b'C' | b'G'),
        b'D' => matches!(base, b'A' | b'G' | b'T'),
        _ => false,
    }
}

/// Expand a consensus of IUPAC codes into an equivalent regular expression.
///
/// Each code becomes a character class of the bases in `ACGTN` that it includes, so `R` becomes
/// `[AG]` and `N` becomes `[ACGTN]`.
pub fn expand_iupac(consensus: &str) -> Result<String> {
    let mut res = String::with_capacity(consensus.len() * 4);

    for (i, c) in consensus.bytes().enumerate() {
        if !IUPAC_CODES.contains(&c.to_ascii_uppercase()) {
            return Err(Error::InvalidPattern {
                consensus: consensus.to_owned(),
                reason: format!("{:?} at position {} is not an IUPAC nucleotide code", c as char, i),
            });
        }

        let class = b"ACGTN"
            .iter()
            .filter(|&&b| iupac_includes(c, b))
            .map(|&b| b as char)
            .collect::<String>();

        if class.len() == 1 {
            res.push_str(&class);
        } else {
            res.push('[');
            res.push_str(&class);
            res.push(']');
        }
    }

    Ok(res)
}

/// A compiled consensus pattern.
///
/// Compiling the same consensus with the same options always gives the same matches.
#[derive(Clone, Debug)]
pub struct Pattern {
    consensus: String,
    syntax: ConsensusSyntax,
    case_sensitive: bool,
    regex: Regex,
}

impl Pattern {
    /// Compile a consensus that is written as a regular expression.
    pub fn compile(consensus: &str, case_sensitive: bool) -> Result<Self> {
        Self::compile_with_syntax(consensus, case_sensitive, ConsensusSyntax::Regex)
    }

    pub fn compile_with_syntax(
        consensus: &str,
        case_sensitive: bool,
        syntax: ConsensusSyntax,
    ) -> Result<Self> {
        if consensus.is_empty() {
            return Err(Error::InvalidPattern {
                consensus: consensus.to_owned(),
                reason: "consensus is empty".to_owned(),
            });
        }

        let expr = match syntax {
            ConsensusSyntax::Regex => consensus.to_owned(),
            ConsensusSyntax::Iupac => expand_iupac(consensus)?,
        };

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| Error::InvalidPattern {
                consensus: consensus.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            consensus: consensus.to_owned(),
            syntax,
            case_sensitive,
            regex,
        })
    }

    /// Find the leftmost match that starts at or after `start`.
    ///
    /// Returns the half-open interval of the match.
    pub fn find_at(&self, haystack: &[u8], start: usize) -> Option<(usize, usize)> {
        self.regex.find_at(haystack, start).map(|m| (m.start(), m.end()))
    }

    pub fn consensus(&self) -> &str {
        &self.consensus
    }

    pub fn syntax(&self) -> ConsensusSyntax {
        self.syntax
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}
