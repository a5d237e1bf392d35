//! Conversation engine
//!
//! Glue between the pure transition function, the session store and the
//! messenger. One call to [`ConversationEngine::handle`] processes one update.

use crate::conversation::{transition, Effect, Event, MessageRef, Next, Transition, User};
use crate::messenger::{Messenger, MessengerError};
use crate::session::SessionStore;
use tracing::{debug, info};

/// One inbound update, already translated from the platform's types.
#[derive(Debug, Clone)]
pub struct Incoming {
    /// Sender.
    pub user: User,
    /// Chat the update came from.
    pub chat_id: i64,
    /// Message carrying the pressed button, for button events.
    pub pressed: Option<MessageRef>,
    /// What happened.
    pub event: Event,
}

/// Runs conversations for every user.
pub struct ConversationEngine<M> {
    sessions: SessionStore,
    messenger: M,
}

impl<M: Messenger> ConversationEngine<M> {
    /// Create an engine with an empty session store
    pub fn new(messenger: M) -> Self {
        Self {
            sessions: SessionStore::new(),
            messenger,
        }
    }

    /// Live sessions
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Messenger used for effects
    pub const fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Process one update.
    ///
    /// The session change is committed before any effect runs. Effects run in
    /// order and the first failure stops the rest.
    ///
    /// # Errors
    ///
    /// Returns the first [`MessengerError`] raised while applying effects.
    pub async fn handle(&self, incoming: Incoming) -> Result<(), MessengerError> {
        let Incoming {
            user,
            chat_id,
            pressed,
            event,
        } = incoming;

        let session = self.sessions.get(user.id).await.unwrap_or_default();
        let from = session.state;
        let Transition { next, effects } = transition(&session, &user, event);

        match next {
            Next::Continue(session) => {
                if session.state != from {
                    debug!(user_id = user.id, ?from, to = ?session.state, "State changed");
                }
                self.sessions.save(user.id, session).await;
            }
            Next::Terminal => {
                self.sessions.evict(user.id).await;
                info!(user_id = user.id, ?from, "Conversation finished");
            }
        }

        for effect in effects {
            self.apply(chat_id, pressed, effect).await?;
        }
        Ok(())
    }

    async fn apply(
        &self,
        chat_id: i64,
        pressed: Option<MessageRef>,
        effect: Effect,
    ) -> Result<(), MessengerError> {
        match effect {
            Effect::Reply(reply) => match pressed {
                Some(target) => self.messenger.edit(target, &reply).await,
                None => self.messenger.send(chat_id, &reply).await,
            },
            Effect::NotifyAdmin(text) => {
                info!(chat_id, "Relaying request to admin");
                self.messenger.notify_admin(&text).await
            }
            Effect::ForwardToAdmin(source) => self.messenger.forward_to_admin(source).await,
        }
    }
}
