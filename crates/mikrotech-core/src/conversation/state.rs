//! Conversation state and per-user session data

use crate::catalog::Country;

/// Placeholder shown for session fields that were never filled in.
pub const UNKNOWN: &str = "Unknown";

/// Where the user is in the menu tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Initial state, country menu shown
    #[default]
    SelectingCountry,
    /// Services menu shown (also while the price table is displayed)
    SelectingService,
    /// Tutor connection options shown
    SelectingTutorOption,
    /// Waiting for the assignment text, image or file
    AwaitingAssignment,
    /// Detail form, step 1
    AwaitingName,
    /// Detail form, step 2
    AwaitingPhone,
    /// Detail form, step 3
    AwaitingSubject,
}

/// Which menu entry started the detail form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOrigin {
    /// Services menu, private lessons
    Lesson,
    /// Tutor menu, fill info form
    TutorForm,
}

impl RequestOrigin {
    /// Title of the admin notification for this kind of request.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Lesson => "Private Lesson Request",
            Self::TutorForm => "Tutor Request (Form)",
        }
    }
}

/// Per-user conversation data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Current position in the menu tree.
    pub state: State,
    /// Country picked in the first menu.
    pub country: Option<&'static Country>,
    /// Menu entry that opened the detail form.
    pub origin: Option<RequestOrigin>,
    /// Full name from the detail form.
    pub name: Option<String>,
    /// Phone number from the detail form.
    pub phone: Option<String>,
    /// Subject from the detail form.
    pub subject: Option<String>,
}

impl Session {
    /// Display name of the selected country, or [`UNKNOWN`].
    #[must_use]
    pub fn country_name(&self) -> &'static str {
        self.country.map_or(UNKNOWN, |c| c.name)
    }

    /// Currency of the selected country, or [`UNKNOWN`].
    #[must_use]
    pub fn currency(&self) -> &'static str {
        self.country.map_or(UNKNOWN, |c| c.currency)
    }

    /// Same session moved to `state`.
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_country;

    #[test]
    fn test_missing_country_reads_as_unknown() {
        let session = Session::default();
        assert_eq!(session.country_name(), "Unknown");
        assert_eq!(session.currency(), "Unknown");
    }

    #[test]
    fn test_country_fields() {
        let session = Session {
            country: find_country("qa"),
            ..Session::default()
        };
        assert_eq!(session.country_name(), "Qatar");
        assert_eq!(session.currency(), "QAR");
    }
}
