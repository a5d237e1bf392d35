//! Button payloads
//!
//! Inline buttons carry short `prefix_value` strings. They are parsed into
//! [`Action`] once, at the transport boundary.

use crate::catalog::{find_country, Country};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const BACK_TO_SERVICES: &str = "back_to_services";
const CHANGE_COUNTRY: &str = "go_back_to_start";

/// Entries of the services menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Assignment or project help
    Assignment,
    /// Private lessons
    Lesson,
    /// Connect with a tutor
    Tutor,
    /// Prices and general info
    Info,
}

impl Service {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Lesson => "lesson",
            Self::Tutor => "tutor",
            Self::Info => "info",
        }
    }
}

/// Entries of the tutor menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorOption {
    /// Leave contact details through the form
    FillForm,
    /// Ask the admin to open a chat directly
    DirectConnect,
}

impl TutorOption {
    const fn as_str(self) -> &'static str {
        match self {
            Self::FillForm => "fill_form",
            Self::DirectConnect => "direct_connect",
        }
    }
}

/// A pressed inline button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `country_<code>`
    Country(&'static Country),
    /// `service_<name>`
    Service(Service),
    /// `tutor_<option>`
    Tutor(TutorOption),
    /// Show the services menu again
    BackToServices,
    /// Return to the country menu
    ChangeCountry,
}

/// Payload that does not name any known button
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    /// The prefix is recognised but the value is not
    #[error("Unknown {kind} in callback payload: {value}")]
    UnknownValue {
        /// Payload prefix (`country`, `service`, `tutor`)
        kind: &'static str,
        /// Offending value
        value: String,
    },
    /// Nothing about the payload is recognised
    #[error("Unrecognised callback payload: {0}")]
    Unrecognised(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        match payload {
            BACK_TO_SERVICES => return Ok(Self::BackToServices),
            CHANGE_COUNTRY => return Ok(Self::ChangeCountry),
            _ => {}
        }

        let unknown = |kind: &'static str, value: &str| ActionParseError::UnknownValue {
            kind,
            value: value.to_string(),
        };

        match payload.split_once('_') {
            Some(("country", code)) => find_country(code)
                .map(Self::Country)
                .ok_or_else(|| unknown("country", code)),
            Some(("service", name)) => match name {
                "assignment" => Ok(Self::Service(Service::Assignment)),
                "lesson" => Ok(Self::Service(Service::Lesson)),
                "tutor" => Ok(Self::Service(Service::Tutor)),
                "info" => Ok(Self::Service(Service::Info)),
                other => Err(unknown("service", other)),
            },
            Some(("tutor", option)) => match option {
                "fill_form" => Ok(Self::Tutor(TutorOption::FillForm)),
                "direct_connect" => Ok(Self::Tutor(TutorOption::DirectConnect)),
                other => Err(unknown("tutor option", other)),
            },
            _ => Err(ActionParseError::Unrecognised(payload.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country(country) => write!(f, "country_{}", country.code),
            Self::Service(service) => write!(f, "service_{}", service.as_str()),
            Self::Tutor(option) => write!(f, "tutor_{}", option.as_str()),
            Self::BackToServices => f.write_str(BACK_TO_SERVICES),
            Self::ChangeCountry => f.write_str(CHANGE_COUNTRY),
        }
    }
}
