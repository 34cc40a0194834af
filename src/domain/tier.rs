// Load tier classification buckets

/// Load tier assigned to an active sample, ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Normal,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Normal, Tier::Medium, Tier::High];

    /// Position in `Tier::ALL`, used to index per-tier arrays.
    pub fn index(self) -> usize {
        match self {
            Tier::Normal => 0,
            Tier::Medium => 1,
            Tier::High => 2,
        }
    }
}
