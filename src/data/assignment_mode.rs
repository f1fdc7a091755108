use serde::{Deserialize, Serialize};

/// How actual points are paired with predicted points.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMode {
    /// Nearest still-available predicted point, actual points in input order.
    #[default] Greedy,
    /// Most within-threshold pairs, then least total distance.
    Optimal,
}

impl AssignmentMode {
    pub fn str(&self) -> &'static str {
        match self {
            AssignmentMode::Greedy => "Greedy",
            AssignmentMode::Optimal => "Optimal",
        }
    }
}

impl std::fmt::Display for AssignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.str())
    }
}
