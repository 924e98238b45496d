//! Logical identity of markers and lines on the map

use serde::{Deserialize, Serialize};
use std::fmt;

/// One end of the requested trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Where the trip starts
    Start,
    /// Where the trip ends
    End,
}

impl Endpoint {
    /// Both endpoints in display order
    pub const ALL: [Self; 2] = [Self::Start, Self::End];

    /// Lowercase name used in commands and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" | "from" => Ok(Self::Start),
            "end" | "to" => Ok(Self::End),
            _ => Err(format!("Invalid endpoint: {s}. Use 'start' or 'end'")),
        }
    }
}

/// Role of a marker: one of the two endpoints or the n-th returned stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "role", content = "index", rename_all = "snake_case")]
pub enum MarkerRef {
    /// The start marker
    Start,
    /// The end marker
    End,
    /// A stop marker, indexed in visit order
    Stop(usize),
}

impl MarkerRef {
    /// The endpoint this marker stands for, if any
    #[must_use]
    pub const fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Start => Some(Endpoint::Start),
            Self::End => Some(Endpoint::End),
            Self::Stop(_) => None,
        }
    }

    /// Whether this is a stop marker
    #[must_use]
    pub const fn is_stop(&self) -> bool {
        matches!(self, Self::Stop(_))
    }
}

impl From<Endpoint> for MarkerRef {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Start => Self::Start,
            Endpoint::End => Self::End,
        }
    }
}

impl fmt::Display for MarkerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
            Self::Stop(index) => write!(f, "stop #{index}"),
        }
    }
}

/// Kind of route line drawn on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Straight line between the start and end markers
    Preview,
    /// Polyline through the stops returned by the trip service
    StopSequence,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preview => write!(f, "preview"),
            Self::StopSequence => write!(f, "stop_sequence"),
        }
    }
}
