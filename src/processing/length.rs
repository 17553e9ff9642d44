//! Summary length tiers and the token bounds they map to.

/// User-selected summary verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthTier {
    /// 30 to 60 tokens per chunk.
    Short,
    /// 80 to 120 tokens per chunk.
    Medium,
    /// 150 to 200 tokens per chunk.
    Long,
}

/// Length constraint handed to the summarizer, in model tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenBounds {
    /// Minimum generated length.
    pub min_length: usize,
    /// Maximum generated length.
    pub max_length: usize,
}

impl LengthTier {
    /// Resolve a raw selector.
    ///
    /// Only the exact strings `short` and `medium` select those tiers; anything else, including
    /// a missing, empty, or misspelled selector, falls back to [`LengthTier::Long`].
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("short") => Self::Short,
            Some("medium") => Self::Medium,
            _ => Self::Long,
        }
    }

    /// Token bounds for this tier.
    pub const fn bounds(self) -> TokenBounds {
        let (min_length, max_length) = match self {
            Self::Short => (30, 60),
            Self::Medium => (80, 120),
            Self::Long => (150, 200),
        };
        TokenBounds {
            min_length,
            max_length,
        }
    }

    /// Lower-case name of the tier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(selector: Option<&str>) -> (usize, usize) {
        let bounds = LengthTier::from_selector(selector).bounds();
        (bounds.min_length, bounds.max_length)
    }

    #[test]
    fn known_tiers_map_to_fixed_bounds() {
        assert_eq!(pair(Some("short")), (30, 60));
        assert_eq!(pair(Some("medium")), (80, 120));
        assert_eq!(pair(Some("long")), (150, 200));
    }

    #[test]
    fn anything_else_falls_back_to_long() {
        for selector in [Some("anything-else"), Some(""), Some("Short"), Some(" short"), None] {
            assert_eq!(pair(selector), (150, 200), "{selector:?}");
        }
    }

    #[test]
    fn bounds_are_strictly_ordered() {
        for tier in [LengthTier::Short, LengthTier::Medium, LengthTier::Long] {
            let bounds = tier.bounds();
            assert!(bounds.min_length > 0);
            assert!(bounds.min_length < bounds.max_length, "{}", tier.as_str());
        }
    }
}
