use crate::core::models::element;
use crate::core::models::structure::Structure;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PairSelectorError {
    #[error("Pair must be written as two element symbols joined by '-' (e.g. 'C-Br'), got '{input}'")]
    MissingSeparator { input: String },
    #[error("Unknown element symbol '{symbol}' in pair")]
    UnknownElement { symbol: String },
}

/// An unordered element pair selected for scanning (e.g. `C-Br`).
///
/// Parsed from the `A-B` form; symbols are normalized to conventional
/// capitalization and validated against the element table, so `c-br` and
/// `C-Br` select the same pair. Matching is symmetric: a `C-Br` selector
/// accepts both `(C, Br)` and `(Br, C)` site pairs, and `C-C` style
/// same-element pairs work as expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSelector {
    first: String,
    second: String,
}

impl PairSelector {
    /// Checks whether the unordered element pair `(a, b)` matches this selector.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }

    /// Returns the two element symbols in user-given order.
    pub fn elements(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

impl FromStr for PairSelector {
    type Err = PairSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw_first, raw_second) =
            s.trim()
                .split_once('-')
                .ok_or_else(|| PairSelectorError::MissingSeparator {
                    input: s.to_string(),
                })?;

        let normalize = |raw: &str| {
            element::normalize_symbol(raw).ok_or_else(|| PairSelectorError::UnknownElement {
                symbol: raw.trim().to_string(),
            })
        };

        Ok(Self {
            first: normalize(raw_first)?,
            second: normalize(raw_second)?,
        })
    }
}

impl fmt::Display for PairSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Condition must be 'less' or 'greater', got '{input}'")]
pub struct ConditionParseError {
    input: String,
}

/// The threshold condition a pair distance must satisfy.
///
/// Both comparisons are inclusive: `Below` matches distances equal to the
/// cutoff, and so does `Above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdCondition {
    /// Distance at or below the cutoff (wire word: `less`).
    Below,
    /// Distance at or above the cutoff (wire word: `greater`).
    Above,
}

impl ThresholdCondition {
    /// Checks whether `distance` satisfies the condition for `cutoff`.
    pub fn is_satisfied(&self, distance: f64, cutoff: f64) -> bool {
        match self {
            ThresholdCondition::Below => distance <= cutoff,
            ThresholdCondition::Above => distance >= cutoff,
        }
    }
}

impl FromStr for ThresholdCondition {
    type Err = ConditionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "less" => Ok(ThresholdCondition::Below),
            "greater" => Ok(ThresholdCondition::Above),
            _ => Err(ConditionParseError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ThresholdCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdCondition::Below => write!(f, "less"),
            ThresholdCondition::Above => write!(f, "greater"),
        }
    }
}

/// One matched atom pair in one frame.
///
/// Site indices are one-based, matching the numbering used in POSCAR dumps
/// and the text report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairContact {
    /// One-based frame number within the trajectory.
    pub frame: usize,
    pub element_i: String,
    /// One-based index of the first site.
    pub site_i: usize,
    pub element_j: String,
    /// One-based index of the second site.
    pub site_j: usize,
    /// Periodic distance in Angstroms.
    pub distance: f64,
}

/// Scans one structure for element pairs satisfying the threshold condition.
///
/// Enumerates the upper triangle of the pair matrix (i < j), so each
/// unordered pair is reported once, in site order.
///
/// # Arguments
///
/// * `structure` - The frame to scan.
/// * `frame` - The one-based frame number recorded in each contact.
/// * `selector` - The element pair to look for.
/// * `cutoff` - The threshold distance in Angstroms.
/// * `condition` - Which side of the cutoff counts as a match.
pub fn scan_structure(
    structure: &Structure,
    frame: usize,
    selector: &PairSelector,
    cutoff: f64,
    condition: ThresholdCondition,
) -> Vec<PairContact> {
    let n = structure.len();
    let mut contacts = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            // Indices are in range by construction.
            let (Some(site_i), Some(site_j)) = (structure.site(i), structure.site(j)) else {
                continue;
            };
            if !selector.matches(&site_i.element, &site_j.element) {
                continue;
            }
            let Some(distance) = structure.distance(i, j) else {
                continue;
            };
            if condition.is_satisfied(distance, cutoff) {
                contacts.push(PairContact {
                    frame,
                    element_i: site_i.element.clone(),
                    site_i: i + 1,
                    element_j: site_j.element.clone(),
                    site_j: j + 1,
                    distance,
                });
            }
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::Lattice;
    use crate::core::models::site::Site;
    use nalgebra::Vector3;

    fn test_structure() -> Structure {
        Structure::new(
            "pair test",
            Lattice::cubic(10.0).unwrap(),
            vec![
                Site::new("C", Vector3::new(0.0, 0.0, 0.0)),
                Site::new("C", Vector3::new(0.5, 0.5, 0.5)),
                Site::new("Br", Vector3::new(0.2, 0.0, 0.0)),
                Site::new("Br", Vector3::new(0.0, 0.4, 0.0)),
            ],
        )
    }

    #[test]
    fn parses_and_normalizes_pairs() {
        let pair: PairSelector = "C-Br".parse().unwrap();
        assert_eq!(pair.elements(), ("C", "Br"));
        assert_eq!(pair.to_string(), "C-Br");

        let mangled: PairSelector = " c-bR ".parse().unwrap();
        assert_eq!(mangled, pair);
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(matches!(
            "CBr".parse::<PairSelector>().unwrap_err(),
            PairSelectorError::MissingSeparator { .. }
        ));
        assert!(matches!(
            "C-Xq".parse::<PairSelector>().unwrap_err(),
            PairSelectorError::UnknownElement { symbol } if symbol == "Xq"
        ));
        assert!(matches!(
            "-Br".parse::<PairSelector>().unwrap_err(),
            PairSelectorError::UnknownElement { .. }
        ));
    }

    #[test]
    fn matching_is_symmetric() {
        let pair: PairSelector = "C-Br".parse().unwrap();
        assert!(pair.matches("C", "Br"));
        assert!(pair.matches("Br", "C"));
        assert!(!pair.matches("C", "C"));
        assert!(!pair.matches("Br", "Br"));
    }

    #[test]
    fn condition_words_parse_case_insensitively() {
        assert_eq!(
            "less".parse::<ThresholdCondition>().unwrap(),
            ThresholdCondition::Below
        );
        assert_eq!(
            "GREATER".parse::<ThresholdCondition>().unwrap(),
            ThresholdCondition::Above
        );
        assert!(" Greater ".parse::<ThresholdCondition>().is_ok());
        assert!("between".parse::<ThresholdCondition>().is_err());
    }

    #[test]
    fn comparisons_are_inclusive_on_both_sides() {
        assert!(ThresholdCondition::Below.is_satisfied(2.5, 2.5));
        assert!(ThresholdCondition::Above.is_satisfied(2.5, 2.5));
        assert!(!ThresholdCondition::Below.is_satisfied(2.6, 2.5));
        assert!(!ThresholdCondition::Above.is_satisfied(2.4, 2.5));
    }

    #[test]
    fn scan_finds_only_matching_pairs_below_cutoff() {
        let structure = test_structure();
        let pair: PairSelector = "C-Br".parse().unwrap();
        let contacts = scan_structure(&structure, 1, &pair, 3.0, ThresholdCondition::Below);

        // C(1)-Br(3) at 2.0 A is the only C-Br pair within 3.0 A.
        assert_eq!(contacts.len(), 1);
        let contact = &contacts[0];
        assert_eq!(contact.frame, 1);
        assert_eq!((contact.site_i, contact.site_j), (1, 3));
        assert_eq!((contact.element_i.as_str(), contact.element_j.as_str()), ("C", "Br"));
        assert!((contact.distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn scan_above_cutoff_selects_the_complement() {
        let structure = test_structure();
        let pair: PairSelector = "C-Br".parse().unwrap();
        let below = scan_structure(&structure, 1, &pair, 3.0, ThresholdCondition::Below);
        let above = scan_structure(&structure, 1, &pair, 3.0, ThresholdCondition::Above);

        // Four C-Br pairs total: 1-3, 1-4, 2-3, 2-4.
        assert_eq!(below.len() + above.len(), 4);
    }

    #[test]
    fn same_element_pairs_are_supported() {
        let structure = test_structure();
        let pair: PairSelector = "Br-Br".parse().unwrap();
        let contacts = scan_structure(&structure, 2, &pair, 10.0, ThresholdCondition::Below);
        assert_eq!(contacts.len(), 1);
        assert_eq!((contacts[0].site_i, contacts[0].site_j), (3, 4));
        assert_eq!(contacts[0].frame, 2);
    }
}
