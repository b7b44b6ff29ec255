//! Mouth-shape codes and their morph targets.
//!
//! Codes follow the Rhubarb Lip Sync alphabet: `A`-`H` are mouth shapes and
//! `X` is rest/silence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed alphabet of mouth shapes emitted by the phoneme extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisemeCode {
    /// Closed mouth (P, B, M)
    A,
    /// Slightly open, clenched teeth (K, S, T)
    B,
    /// Open mouth (EH, AE)
    C,
    /// Wide open (AA)
    D,
    /// Slightly rounded (AO, ER)
    E,
    /// Puckered (UW, OW, W)
    F,
    /// Upper teeth on lower lip (F, V)
    G,
    /// Tongue raised (L)
    H,
    /// Rest
    X,
}

impl VisemeCode {
    pub const ALL: [VisemeCode; 9] = [
        VisemeCode::A,
        VisemeCode::B,
        VisemeCode::C,
        VisemeCode::D,
        VisemeCode::E,
        VisemeCode::F,
        VisemeCode::G,
        VisemeCode::H,
        VisemeCode::X,
    ];

    pub fn as_char(self) -> char {
        match self {
            VisemeCode::A => 'A',
            VisemeCode::B => 'B',
            VisemeCode::C => 'C',
            VisemeCode::D => 'D',
            VisemeCode::E => 'E',
            VisemeCode::F => 'F',
            VisemeCode::G => 'G',
            VisemeCode::H => 'H',
            VisemeCode::X => 'X',
        }
    }

    pub fn is_silence(self) -> bool {
        self == VisemeCode::X
    }

    /// Lenient parse: surrounding whitespace is ignored, anything else is `None`
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        let mut chars = code.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        VisemeCode::ALL.into_iter().find(|v| v.as_char() == c)
    }
}

impl fmt::Display for VisemeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for VisemeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisemeCode::parse(s).ok_or_else(|| format!("unknown viseme code: {:?}", s))
    }
}

/// Which code-to-target table to drive the mouth with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisemeMapping {
    /// Oculus visemes picked per Rhubarb shape
    #[default]
    Primary,
    /// Sibilant/nasal variant for B and H, mid vowel for C
    Alternate,
}

/// Resolves mouth-shape codes to viseme morph targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisemeMap {
    mapping: VisemeMapping,
}

impl VisemeMap {
    pub fn new(mapping: VisemeMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> VisemeMapping {
        self.mapping
    }

    /// Morph target for a code; `None` means silence
    pub fn resolve_code(&self, code: VisemeCode) -> Option<&'static str> {
        let target = match (self.mapping, code) {
            (_, VisemeCode::X) => return None,
            (_, VisemeCode::A) => "viseme_PP",
            (VisemeMapping::Primary, VisemeCode::B) => "viseme_kk",
            (VisemeMapping::Alternate, VisemeCode::B) => "viseme_SS",
            (VisemeMapping::Primary, VisemeCode::C) => "viseme_I",
            (VisemeMapping::Alternate, VisemeCode::C) => "viseme_E",
            (_, VisemeCode::D) => "viseme_aa",
            (_, VisemeCode::E) => "viseme_O",
            (_, VisemeCode::F) => "viseme_U",
            (_, VisemeCode::G) => "viseme_FF",
            (VisemeMapping::Primary, VisemeCode::H) => "viseme_TH",
            (VisemeMapping::Alternate, VisemeCode::H) => "viseme_nn",
        };
        Some(target)
    }

    /// Morph target for a raw code string. Unknown codes are silence.
    pub fn resolve(&self, code: &str) -> Option<&'static str> {
        VisemeCode::parse(code).and_then(|c| self.resolve_code(c))
    }

    /// Every morph target this map can drive, plus the rest shape
    pub fn controlled_targets(&self) -> Vec<&'static str> {
        let mut targets: Vec<&'static str> = VisemeCode::ALL
            .into_iter()
            .filter_map(|c| self.resolve_code(c))
            .collect();
        targets.push(SILENCE_TARGET);
        targets
    }
}

/// Rest shape; only ever driven toward 0 so it never competes with a real viseme
pub const SILENCE_TARGET: &str = "viseme_sil";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_mapping() {
        let map = VisemeMap::default();
        assert_eq!(map.resolve("A"), Some("viseme_PP"));
        assert_eq!(map.resolve("D"), Some("viseme_aa"));
        assert_eq!(map.resolve("H"), Some("viseme_TH"));
        assert_eq!(map.resolve("X"), None);
    }

    #[test]
    fn test_alternate_mapping() {
        let map = VisemeMap::new(VisemeMapping::Alternate);
        assert_eq!(map.resolve("B"), Some("viseme_SS"));
        assert_eq!(map.resolve("C"), Some("viseme_E"));
        assert_eq!(map.resolve("H"), Some("viseme_nn"));
    }

    #[test]
    fn test_unknown_codes_are_silence() {
        let map = VisemeMap::default();
        for code in ["", "Z", "a", "AB", "viseme_aa", "😀"] {
            assert_eq!(map.resolve(code), None, "{code:?}");
        }
        assert_eq!(map.resolve(" E "), Some("viseme_O"));
    }

    #[test]
    fn test_every_code_resolves_or_is_silent() {
        for mapping in [VisemeMapping::Primary, VisemeMapping::Alternate] {
            let map = VisemeMap::new(mapping);
            let targets = map.controlled_targets();
            for code in VisemeCode::ALL {
                match map.resolve_code(code) {
                    Some(target) => assert!(targets.contains(&target)),
                    None => assert!(code.is_silence()),
                }
            }
            assert_eq!(targets.len(), 9);
        }
    }

    #[test]
    fn test_code_round_trip_through_str() {
        assert_eq!("G".parse::<VisemeCode>().unwrap(), VisemeCode::G);
        assert_eq!(VisemeCode::F.to_string(), "F");
        assert!("Q".parse::<VisemeCode>().is_err());
    }
}
