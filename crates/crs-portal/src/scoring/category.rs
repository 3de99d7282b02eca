use serde::{Deserialize, Serialize};

/// Badge shown next to a total, based on recent draw cut-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Excellent,
    Competitive,
    Good,
    NeedsImprovement,
}

impl ScoreCategory {
    pub const fn for_score(total: u32) -> Self {
        if total >= 500 {
            ScoreCategory::Excellent
        } else if total >= 450 {
            ScoreCategory::Competitive
        } else if total >= 400 {
            ScoreCategory::Good
        } else {
            ScoreCategory::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::Competitive => "Competitive",
            ScoreCategory::Good => "Good",
            ScoreCategory::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(ScoreCategory::for_score(1200), ScoreCategory::Excellent);
        assert_eq!(ScoreCategory::for_score(500), ScoreCategory::Excellent);
        assert_eq!(ScoreCategory::for_score(499), ScoreCategory::Competitive);
        assert_eq!(ScoreCategory::for_score(450), ScoreCategory::Competitive);
        assert_eq!(ScoreCategory::for_score(400), ScoreCategory::Good);
        assert_eq!(ScoreCategory::for_score(399), ScoreCategory::NeedsImprovement);
        assert_eq!(ScoreCategory::for_score(0).label(), "Needs Improvement");
    }
}
