//! Diagonal movement policy for path relaxations.

/// How diagonal steps are permitted and costed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalsPolicy {
    /// Only the four cardinal directions.
    Forbidden,
    /// Diagonal steps cost the same as cardinal steps.
    #[default]
    Uniform,
    /// Diagonal steps cost √2 times the cardinal cost.
    Euclidean,
}

impl DiagonalsPolicy {
    /// Whether diagonal steps are permitted at all.
    #[inline]
    pub const fn allows_diagonals(self) -> bool {
        !matches!(self, DiagonalsPolicy::Forbidden)
    }

    /// Cost multiplier of one step.
    #[inline]
    pub fn step_cost(self, diagonal: bool) -> f32 {
        match self {
            DiagonalsPolicy::Euclidean if diagonal => std::f32::consts::SQRT_2,
            _ => 1.0,
        }
    }

    /// Wire encoding used by atlas serialization.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        match self {
            DiagonalsPolicy::Forbidden => 0,
            DiagonalsPolicy::Uniform => 1,
            DiagonalsPolicy::Euclidean => 2,
        }
    }

    /// Decode the wire encoding.
    pub const fn from_byte(b: u8) -> Option<DiagonalsPolicy> {
        match b {
            0 => Some(DiagonalsPolicy::Forbidden),
            1 => Some(DiagonalsPolicy::Uniform),
            2 => Some(DiagonalsPolicy::Euclidean),
            _ => None,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let json = serde_json::to_string(&DiagonalsPolicy::Euclidean).unwrap();
        assert_eq!(json, "\"Euclidean\"");
        let back: DiagonalsPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DiagonalsPolicy::Euclidean);
    }
}
