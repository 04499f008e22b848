use lazy_static::lazy_static;

use crate::errors::*;

lazy_static! {
    /// Complement of each byte, or zero for bytes that are not nucleotides or IUPAC codes.
    pub static ref COMPLEMENT: [u8; 256] = {
        let mut comp = [0; 256];

        // IUPAC DNA alphabet
        for (&a, &b) in b"AGCTYRWSKMDVHBN".iter().zip(b"TCGARYWSMKHBDVN".iter()) {
            comp[a as usize] = b; // upper case
            comp[a as usize + 32] = b + 32; // lower case
        }

        comp
    };
}

/// Complement a single base, keeping its case.
pub fn complement(base: u8) -> Option<u8> {
    match COMPLEMENT[base as usize] {
        0 => None,
        c => Some(c),
    }
}

/// Reverse complement a sequence of nucleotides or IUPAC ambiguity codes.
///
/// Fails on the first byte that is not a recognized base.
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>> {
    seq.iter()
        .enumerate()
        .rev()
        .map(|(idx, &b)| {
            complement(b).ok_or(Error::InvalidBase {
                base: b as char,
                idx,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_pairs() {
        assert_eq!(reverse_complement(b"ACGT").unwrap(), b"ACGT");
        assert_eq!(reverse_complement(b"AACG").unwrap(), b"CGTT");
        assert_eq!(reverse_complement(b"RYMKSWHBVDN").unwrap(), b"NHBVDWSMKRY");
    }

    #[test]
    fn case_preserved() {
        assert_eq!(reverse_complement(b"acgtNNac").unwrap(), b"gtNNacgt");
        assert_eq!(reverse_complement(b"aCgT").unwrap(), b"AcGt");
    }

    #[test]
    fn twice_is_identity() {
        let seq = b"ACGTRYMKSWHBVDNacgtrymkswhbvdn";
        let rc = reverse_complement(seq).unwrap();
        assert_eq!(reverse_complement(&rc).unwrap(), seq);
    }

    #[test]
    fn empty() {
        assert!(reverse_complement(b"").unwrap().is_empty());
    }

    #[test]
    fn invalid_base() {
        let err = reverse_complement(b"ACXGT").unwrap_err();
        assert!(matches!(err, Error::InvalidBase { base: 'X', idx: 2 }));
        assert!(reverse_complement(b"ACGU").is_err());
        assert!(reverse_complement(b"AC-G").is_err());
    }
}
