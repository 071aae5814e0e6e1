//! [`DiagonalPolicy`]: when a move may cut across a corner.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Rule deciding whether a diagonal move is admitted, based on the two
/// orthogonal cells flanking it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DiagonalPolicy {
    /// Orthogonal moves only.
    #[default]
    Never,
    /// Both flanking cells must be open.
    OnlyWhenNoObstacles,
    /// At least one flanking cell must be open.
    IfAtMostOneObstacle,
    /// Diagonals are admitted whatever the flanking cells hold.
    Always,
}

impl DiagonalPolicy {
    pub const ALL: [DiagonalPolicy; 4] = [
        DiagonalPolicy::Never,
        DiagonalPolicy::OnlyWhenNoObstacles,
        DiagonalPolicy::IfAtMostOneObstacle,
        DiagonalPolicy::Always,
    ];

    /// Canonical kebab-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagonalPolicy::Never => "never",
            DiagonalPolicy::OnlyWhenNoObstacles => "only-when-no-obstacles",
            DiagonalPolicy::IfAtMostOneObstacle => "if-at-most-one-obstacle",
            DiagonalPolicy::Always => "always",
        }
    }

    /// Whether a diagonal flanked by cells with the given openness is
    /// admitted. The diagonal target itself is checked separately.
    #[inline]
    pub const fn admits(self, vertical_open: bool, horizontal_open: bool) -> bool {
        match self {
            DiagonalPolicy::Never => false,
            DiagonalPolicy::OnlyWhenNoObstacles => vertical_open && horizontal_open,
            DiagonalPolicy::IfAtMostOneObstacle => vertical_open || horizontal_open,
            DiagonalPolicy::Always => true,
        }
    }
}

impl fmt::Display for DiagonalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagonalPolicy {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "never" | "Never" => Ok(DiagonalPolicy::Never),
            "only-when-no-obstacles" | "OnlyWhenNoObstacles" => {
                Ok(DiagonalPolicy::OnlyWhenNoObstacles)
            }
            "if-at-most-one-obstacle" | "IfAtMostOneObstacle" => {
                Ok(DiagonalPolicy::IfAtMostOneObstacle)
            }
            "always" | "Always" => Ok(DiagonalPolicy::Always),
            other => Err(GridError::UnknownDiagonalPolicy(other.to_string())),
        }
    }
}

/// Numeric codes: 1 = always, 2 = never, 3 = if at most one obstacle,
/// 4 = only when no obstacles.
impl TryFrom<u8> for DiagonalPolicy {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(DiagonalPolicy::Always),
            2 => Ok(DiagonalPolicy::Never),
            3 => Ok(DiagonalPolicy::IfAtMostOneObstacle),
            4 => Ok(DiagonalPolicy::OnlyWhenNoObstacles),
            other => Err(GridError::UnknownDiagonalPolicy(other.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DiagonalPolicy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DiagonalPolicy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_table() {
        use DiagonalPolicy::*;
        let cases = [(true, true), (true, false), (false, true), (false, false)];
        let expect = |p: DiagonalPolicy| cases.map(|(v, h)| p.admits(v, h));
        assert_eq!(expect(Never), [false, false, false, false]);
        assert_eq!(expect(OnlyWhenNoObstacles), [true, false, false, false]);
        assert_eq!(expect(IfAtMostOneObstacle), [true, true, true, false]);
        assert_eq!(expect(Always), [true, true, true, true]);
    }

    #[test]
    fn parses_names_and_codes() {
        for p in DiagonalPolicy::ALL {
            assert_eq!(p.as_str().parse::<DiagonalPolicy>().unwrap(), p);
        }
        assert_eq!(
            "IfAtMostOneObstacle".parse::<DiagonalPolicy>().unwrap(),
            DiagonalPolicy::IfAtMostOneObstacle
        );
        assert_eq!(DiagonalPolicy::try_from(2).unwrap(), DiagonalPolicy::Never);
        assert_eq!(DiagonalPolicy::try_from(1).unwrap(), DiagonalPolicy::Always);
    }

    #[test]
    fn unknown_policy_is_a_configuration_error() {
        assert_eq!(
            "sometimes".parse::<DiagonalPolicy>(),
            Err(GridError::UnknownDiagonalPolicy("sometimes".into()))
        );
        assert!(matches!(
            DiagonalPolicy::try_from(9),
            Err(GridError::UnknownDiagonalPolicy(_))
        ));
    }
}
