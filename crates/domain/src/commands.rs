//! Map commands - every user interaction as an explicit message
//!
//! The presentation layer translates its native events (clicks, field edits,
//! drag ends, buttons) into these values and hands them to the map session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::FormField;
use crate::errors::DomainError;
use crate::validation::parse_point;
use crate::value_objects::{Endpoint, GeoPoint};

/// A user interaction with the map or the trip form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapCommand {
    /// The map surface was clicked
    Click {
        /// Clicked position
        point: GeoPoint,
    },

    /// A form field was edited
    FieldEdit {
        /// Which field
        field: FormField,
        /// Its new raw text
        value: String,
    },

    /// An endpoint marker was dropped after dragging
    DragEnd {
        /// Which marker
        endpoint: Endpoint,
        /// Where it was dropped
        position: GeoPoint,
    },

    /// The submit button was pressed
    Submit,

    /// The clear button was pressed
    Clear,

    /// Render the bundled sample route
    ShowSample,
}

impl MapCommand {
    /// Parse a single-line textual command
    ///
    /// Supported forms: `click LAT,LON`, `edit FIELD VALUE`,
    /// `drag start|end LAT,LON`, `submit`, `clear`, `sample`.
    pub fn parse_line(line: &str) -> Result<Self, DomainError> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(v, r)| (v, r.trim()));

        match verb.to_lowercase().as_str() {
            "click" => Ok(Self::Click {
                point: parse_pair(rest)?,
            }),
            "edit" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = field
                    .parse::<FormField>()
                    .map_err(DomainError::ValidationError)?;
                Ok(Self::FieldEdit {
                    field,
                    value: value.trim().to_string(),
                })
            },
            "drag" => {
                let (endpoint, position) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| DomainError::missing("drag target position"))?;
                let endpoint = endpoint
                    .parse::<Endpoint>()
                    .map_err(DomainError::ValidationError)?;
                Ok(Self::DragEnd {
                    endpoint,
                    position: parse_pair(position)?,
                })
            },
            "submit" => Ok(Self::Submit),
            "clear" => Ok(Self::Clear),
            "sample" => Ok(Self::ShowSample),
            "" => Err(DomainError::missing("command")),
            other => Err(DomainError::ValidationError(format!(
                "Unknown command: {other}"
            ))),
        }
    }
}

/// Parse `LAT,LON`
fn parse_pair(text: &str) -> Result<GeoPoint, DomainError> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| DomainError::InvalidCoordinate(format!("expected LAT,LON: {text}")))?;
    parse_point(lat, lon)
}

impl fmt::Display for MapCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click { point } => write!(f, "click {}", point.to_query_pair()),
            Self::FieldEdit { field, value } => write!(f, "edit {field} {value}"),
            Self::DragEnd { endpoint, position } => {
                write!(f, "drag {endpoint} {}", position.to_query_pair())
            },
            Self::Submit => write!(f, "submit"),
            Self::Clear => write!(f, "clear"),
            Self::ShowSample => write!(f, "sample"),
        }
    }
}
