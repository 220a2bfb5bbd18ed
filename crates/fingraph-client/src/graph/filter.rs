use fingraph_core::{FraudPattern, RingId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    All,
    Suspicious,
    Normal,
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::All
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingFilter {
    All,
    Ring(RingId),
}

impl Default for RingFilter {
    fn default() -> Self {
        Self::All
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFilter {
    All,
    Pattern(FraudPattern),
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::All
    }
}

/// The active filter selection. At most one slot is ever away from its `All`
/// value: every setter assigns the whole selection in one step, so no
/// intermediate combination is observable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    mode: FilterMode,
    ring: RingFilter,
    pattern: PatternFilter,
}

impl FilterSelection {
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn ring(&self) -> &RingFilter {
        &self.ring
    }

    pub fn pattern(&self) -> &PatternFilter {
        &self.pattern
    }

    pub fn show_all(&mut self) {
        *self = Self::default();
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        *self = Self {
            mode,
            ..Self::default()
        };
    }

    pub fn set_ring(&mut self, ring: RingFilter) {
        *self = Self {
            ring,
            ..Self::default()
        };
    }

    pub fn set_pattern(&mut self, pattern: PatternFilter) {
        *self = Self {
            pattern,
            ..Self::default()
        };
    }
}
