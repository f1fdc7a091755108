use serde::{Deserialize, Serialize};

/// How overlapping detections are grouped before averaging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Single forward pass, each detection compared to its seed only.
    #[default] Greedy,
    /// Connected components of the same-class overlap graph.
    Transitive,
}

impl MergeMode {
    pub fn str(&self) -> &'static str {
        match self {
            MergeMode::Greedy => "Greedy",
            MergeMode::Transitive => "Transitive",
        }
    }
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.str())
    }
}
