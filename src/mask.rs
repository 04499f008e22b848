use crate::scan::MatchSpan;

/// Whether any base is soft-masked (lowercase).
pub fn is_soft_masked(bases: &[u8]) -> bool {
    bases.iter().any(u8::is_ascii_lowercase)
}

/// Decide whether a match span survives repeat masking.
///
/// With `ignore_repeat`, spans that contain a lowercase base of `haystack` are rejected.
/// The reverse complement keeps the case of every base, so `haystack` can be either strand.
pub fn accept(span: &MatchSpan, haystack: &[u8], ignore_repeat: bool) -> bool {
    !ignore_repeat || !is_soft_masked(&haystack[span.start..span.end])
}
