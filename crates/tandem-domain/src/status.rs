//! Request status - the state machine for relationship records

/// Status of a relationship record
///
/// A record is created in one of the *initial* statuses (`Interested` or
/// `Ignored`, chosen by the sender) and may only be transitioned by a review
/// from `Interested` to one of the *decision* statuses (`Accepted` or
/// `Rejected`, chosen by the receiver). `Ignored`, `Accepted`, and
/// `Rejected` are terminal: a terminal record is never transitioned again,
/// only deleted outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Sender wants to connect; pending the receiver's review
    Interested,

    /// Sender passed on the target; keeps the pair out of the feed
    Ignored,

    /// Receiver accepted; the pair is now connected
    Accepted,

    /// Receiver declined
    Rejected,
}

impl RequestStatus {
    /// All statuses, for "any status" store queries
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Interested,
        RequestStatus::Ignored,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
    ];

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Interested => "interested",
            RequestStatus::Ignored => "ignored",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Parse a status from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "interested" => Some(RequestStatus::Interested),
            "ignored" => Some(RequestStatus::Ignored),
            "accepted" => Some(RequestStatus::Accepted),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    /// Whether this status is a legal *starting* status for a new record
    ///
    /// Creation is the only way to reach `Ignored`, and the only way to
    /// reach `Interested` at all.
    pub fn is_initial(&self) -> bool {
        matches!(self, RequestStatus::Interested | RequestStatus::Ignored)
    }

    /// Whether this status is a legal review decision
    pub fn is_decision(&self) -> bool {
        matches!(self, RequestStatus::Accepted | RequestStatus::Rejected)
    }

    /// Whether a record in this status may transition to `next`
    ///
    /// Only `Interested` records transition, and only to a decision status.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(self, RequestStatus::Interested) && next.is_decision()
    }

    /// Whether this status is terminal (no further transition exists)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Interested)
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid status: {}", s))
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
