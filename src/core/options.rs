//! Configuration for the traffic service
//!
//! Defaults reproduce the permissive legacy behavior: any class label and any
//! lane are admitted.

/// Lanes offered by the classic four-way intersection setup
pub const DEFAULT_LANES: [&str; 4] = ["North", "South", "East", "West"];

/// Options for a [`TrafficService`](crate::TrafficService)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOptions {
    /// Reject vehicle classes outside the priority table instead of queueing
    /// them behind every known class
    pub strict_classes: bool,

    /// Lanes vehicles may wait in; `None` accepts any lane
    pub allowed_lanes: Option<Vec<String>>,
}

impl ServiceOptions {
    /// Restrict admissions to [`DEFAULT_LANES`]
    pub fn with_default_lanes(mut self) -> Self {
        self.allowed_lanes = Some(DEFAULT_LANES.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn lane_allowed(&self, lane: &str) -> bool {
        match &self.allowed_lanes {
            Some(lanes) => lanes.iter().any(|l| l == lane),
            None => true,
        }
    }
}
