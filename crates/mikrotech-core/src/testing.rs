//! Testing helpers shared by unit tests.

use crate::conversation::{Content, Event, Inbound, MessageRef, User};

/// Chat the test user talks from.
pub const TEST_CHAT_ID: i64 = 7;

/// A user with a fixed id and name.
#[must_use]
pub fn test_user() -> User {
    User {
        id: 1001,
        first_name: "Test".to_string(),
    }
}

/// A text message from [`test_user`], always message 100 in [`TEST_CHAT_ID`].
#[must_use]
pub fn text_message(text: &str) -> Event {
    Event::Message(Inbound {
        source: MessageRef {
            chat_id: TEST_CHAT_ID,
            message_id: 100,
        },
        content: Content::Text(text.to_string()),
    })
}
