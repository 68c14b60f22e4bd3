//! Agreement rules for majority consensus
//!
//! A rule decides whether the largest group of agreeing models is big
//! enough to carry a `majority_consensus` when not every answering model
//! agrees. Rules only tighten the strict-majority floor: see
//! [`QuorumRule::permits_majority`].

use serde::{Deserialize, Serialize};

/// Rule for deciding majority consensus
///
/// - `Majority`: strictly more than half of the answering models (default)
/// - `Unanimous`: every answering model must agree
/// - `AtLeast(n)`: at least n models must agree
/// - `Percentage(p)`: at least p% of the answering models must agree
///
/// # Example
///
/// ```
/// use math_quorum_domain::quorum::QuorumRule;
///
/// let rule = QuorumRule::Majority;
/// assert!(rule.is_satisfied(2, 3));  // 2 of 3 answering models agree
/// assert!(!rule.is_satisfied(2, 4)); // a tie is not a majority
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuorumRule {
    /// More than half must agree (`k >= ceil((m+1)/2)`)
    #[default]
    Majority,

    /// All answering models must agree
    Unanimous,

    /// At least n models must agree
    AtLeast(usize),

    /// At least this percentage must agree (0-100)
    Percentage(u8),
}

impl QuorumRule {
    /// Check the rule for a group of `agreeing` models out of `answered`
    pub fn is_satisfied(&self, agreeing: usize, answered: usize) -> bool {
        if answered == 0 || agreeing == 0 {
            return false;
        }

        match self {
            QuorumRule::Majority => agreeing > answered / 2,
            QuorumRule::Unanimous => agreeing == answered,
            QuorumRule::AtLeast(n) => agreeing >= *n,
            QuorumRule::Percentage(p) => agreeing >= Self::percentage_of(*p, answered),
        }
    }

    /// Whether a group of `agreeing` out of `answered` carries a majority
    /// consensus: a strict majority is always required, the rule can only
    /// add to it.
    ///
    /// ```
    /// use math_quorum_domain::quorum::QuorumRule;
    ///
    /// assert!(QuorumRule::AtLeast(1).is_satisfied(1, 3));
    /// assert!(!QuorumRule::AtLeast(1).permits_majority(1, 3));
    /// assert!(!QuorumRule::Percentage(50).permits_majority(2, 4));
    /// assert!(QuorumRule::AtLeast(3).permits_majority(3, 4));
    /// ```
    pub fn permits_majority(&self, agreeing: usize, answered: usize) -> bool {
        QuorumRule::Majority.is_satisfied(agreeing, answered)
            && self.is_satisfied(agreeing, answered)
    }

    /// Whether the rule alone can accept groups below a strict majority.
    pub fn can_undercut_majority(&self) -> bool {
        match self {
            QuorumRule::Majority | QuorumRule::Unanimous => false,
            QuorumRule::AtLeast(_) => true,
            QuorumRule::Percentage(p) => *p <= 50,
        }
    }

    /// Minimum group size needed for `answered` models
    pub fn min_agreeing_needed(&self, answered: usize) -> usize {
        match self {
            QuorumRule::Majority => answered / 2 + 1,
            QuorumRule::Unanimous => answered,
            QuorumRule::AtLeast(n) => *n,
            QuorumRule::Percentage(p) => Self::percentage_of(*p, answered),
        }
    }

    fn percentage_of(p: u8, answered: usize) -> usize {
        (answered as f64 * (f64::from(p) / 100.0)).ceil() as usize
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            QuorumRule::Majority => "majority (more than half agree)".to_string(),
            QuorumRule::Unanimous => "unanimous (all answers agree)".to_string(),
            QuorumRule::AtLeast(n) => format!("at least {} agreeing models", n),
            QuorumRule::Percentage(p) => format!("at least {}% agreement", p),
        }
    }
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(QuorumRule::Majority),
            "unanimous" => Ok(QuorumRule::Unanimous),
            s if s.starts_with("atleast:") || s.starts_with("at_least:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after atleast:")?
                    .parse()
                    .map_err(|_| "Invalid number for atleast")?;
                Ok(QuorumRule::AtLeast(n))
            }
            s if s.starts_with("percentage:") || s.ends_with('%') => {
                let num_str = s.trim_start_matches("percentage:").trim_end_matches('%');
                let p: u8 = num_str.parse().map_err(|_| "Invalid percentage")?;
                if p > 100 {
                    return Err(format!("Percentage out of range: {}", p));
                }
                Ok(QuorumRule::Percentage(p))
            }
            _ => Err(format!(
                "Unknown quorum rule: {}. Valid: majority, unanimous, atleast:N, percentage:N or N%",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_matches_ceil_formula() {
        // k >= ceil((m+1)/2) for every m
        for answered in 1..=9usize {
            let needed = (answered + 1).div_ceil(2);
            for agreeing in 1..=answered {
                assert_eq!(
                    QuorumRule::Majority.is_satisfied(agreeing, answered),
                    agreeing >= needed,
                    "k={agreeing}, m={answered}"
                );
            }
        }
    }

    #[test]
    fn test_unanimous_rule() {
        let rule = QuorumRule::Unanimous;
        assert!(!rule.is_satisfied(2, 3));
        assert!(rule.is_satisfied(3, 3));
    }

    #[test]
    fn test_at_least_rule() {
        let rule = QuorumRule::AtLeast(2);
        assert!(!rule.is_satisfied(1, 5));
        assert!(rule.is_satisfied(2, 5));
    }

    #[test]
    fn test_percentage_rule() {
        let rule = QuorumRule::Percentage(75);
        assert!(!rule.is_satisfied(2, 4));
        assert!(rule.is_satisfied(3, 4));
        assert!(!rule.is_satisfied(3, 5));
        assert!(rule.is_satisfied(4, 5));
    }

    #[test]
    fn test_permits_majority_requires_strict_majority() {
        for rule in [
            QuorumRule::Majority,
            QuorumRule::AtLeast(1),
            QuorumRule::Percentage(10),
        ] {
            for answered in 1..=9usize {
                for agreeing in 1..=answered {
                    if rule.permits_majority(agreeing, answered) {
                        assert!(2 * agreeing > answered, "{rule:?} k={agreeing}, m={answered}");
                    }
                }
            }
        }
        assert!(!QuorumRule::Unanimous.permits_majority(2, 3));
    }

    #[test]
    fn test_can_undercut_majority() {
        assert!(!QuorumRule::Majority.can_undercut_majority());
        assert!(!QuorumRule::Unanimous.can_undercut_majority());
        assert!(!QuorumRule::Percentage(51).can_undercut_majority());
        assert!(QuorumRule::Percentage(50).can_undercut_majority());
        assert!(QuorumRule::AtLeast(3).can_undercut_majority());
    }

    #[test]
    fn test_zero_counts() {
        assert!(!QuorumRule::Majority.is_satisfied(0, 0));
        assert!(!QuorumRule::AtLeast(0).is_satisfied(0, 3));
    }

    #[test]
    fn test_min_agreeing_needed() {
        assert_eq!(QuorumRule::Majority.min_agreeing_needed(3), 2);
        assert_eq!(QuorumRule::Majority.min_agreeing_needed(4), 3);
        assert_eq!(QuorumRule::Unanimous.min_agreeing_needed(3), 3);
        assert_eq!(QuorumRule::Percentage(75).min_agreeing_needed(4), 3);
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!("majority".parse::<QuorumRule>().ok(), Some(QuorumRule::Majority));
        assert_eq!("Unanimous".parse::<QuorumRule>().ok(), Some(QuorumRule::Unanimous));
        assert_eq!("atleast:2".parse::<QuorumRule>().ok(), Some(QuorumRule::AtLeast(2)));
        assert_eq!("80%".parse::<QuorumRule>().ok(), Some(QuorumRule::Percentage(80)));
        assert!("150%".parse::<QuorumRule>().is_err());
        assert!("plurality".parse::<QuorumRule>().is_err());
    }
}
