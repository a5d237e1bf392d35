//! Pure state transition function

use super::action::{Action, Service, TutorOption};
use super::effect::{Effect, Reply};
use super::event::{Content, Event, Inbound, User};
use super::state::{RequestOrigin, Session, State};
use super::view;
use crate::pricing::tier_prices;
use tracing::{debug, warn};

/// What happens to the session after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next {
    /// Keep the session with this content
    Continue(Session),
    /// Conversation finished, drop the session
    Terminal,
}

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Session after the event.
    pub next: Next,
    /// Effects to run, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(session: Session) -> Self {
        Self {
            next: Next::Continue(session),
            effects: vec![],
        }
    }

    fn terminal() -> Self {
        Self {
            next: Next::Terminal,
            effects: vec![],
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn reply(self, reply: Reply) -> Self {
        self.with_effect(Effect::Reply(reply))
    }
}

/// Apply `event` to `session`.
///
/// Never fails: events that make no sense in the current state leave the
/// session untouched and produce no effects.
#[must_use]
pub fn transition(session: &Session, user: &User, event: Event) -> Transition {
    match (session.state, event) {
        (_, Event::Start) => Transition::to(Session::default()).reply(view::country_menu()),

        (_, Event::Cancel) => Transition::terminal().reply(view::cancelled()),

        (State::SelectingCountry, Event::Button(Action::Country(country))) => {
            let next = Session {
                state: State::SelectingService,
                country: Some(country),
                ..session.clone()
            };
            Transition::to(next).reply(view::service_menu(country.name))
        }

        // Anything else before a country is picked shows the country menu again
        (State::SelectingCountry, _) => {
            Transition::to(session.clone()).reply(view::country_menu())
        }

        (State::SelectingService, Event::Button(Action::Service(service))) => {
            select_service(session, service)
        }

        (State::SelectingService, Event::Button(Action::ChangeCountry)) => {
            Transition::to(session.clone().with_state(State::SelectingCountry))
                .reply(view::country_menu())
        }

        (
            State::SelectingService | State::SelectingTutorOption,
            Event::Button(Action::BackToServices),
        ) => Transition::to(session.clone().with_state(State::SelectingService))
            .reply(view::service_menu(session.country_name())),

        (State::SelectingTutorOption, Event::Button(Action::Tutor(TutorOption::FillForm))) => {
            start_details(session, RequestOrigin::TutorForm)
        }

        (
            State::SelectingTutorOption,
            Event::Button(Action::Tutor(TutorOption::DirectConnect)),
        ) => Transition::terminal()
            .with_effect(Effect::NotifyAdmin(view::direct_connect_notice(
                user,
                session.country_name(),
            )))
            .reply(view::direct_connect_sent()),

        (State::AwaitingAssignment, Event::Message(inbound)) => {
            receive_assignment(session, user, inbound)
        }

        (
            State::AwaitingName | State::AwaitingPhone | State::AwaitingSubject,
            Event::Message(inbound),
        ) => receive_detail(session, user, &inbound.content),

        (state, event) => {
            warn!(?state, ?event, "Event ignored in current state");
            Transition::to(session.clone())
        }
    }
}

fn select_service(session: &Session, service: Service) -> Transition {
    match service {
        Service::Assignment => {
            Transition::to(session.clone().with_state(State::AwaitingAssignment))
                .reply(view::assignment_prompt())
        }
        Service::Lesson => start_details(session, RequestOrigin::Lesson),
        Service::Tutor => Transition::to(session.clone().with_state(State::SelectingTutorOption))
            .reply(view::tutor_menu()),
        Service::Info => {
            let reply = match tier_prices(session.currency()) {
                Ok(prices) => view::price_info(session.country_name(), &prices),
                Err(_) => view::pricing_unavailable(),
            };
            Transition::to(session.clone()).reply(reply)
        }
    }
}

fn start_details(session: &Session, origin: RequestOrigin) -> Transition {
    let next = Session {
        state: State::AwaitingName,
        origin: Some(origin),
        name: None,
        phone: None,
        subject: None,
        ..session.clone()
    };
    Transition::to(next).reply(view::name_prompt())
}

fn receive_assignment(session: &Session, user: &User, inbound: Inbound) -> Transition {
    match inbound.content {
        Content::Text(_) | Content::Photo | Content::Document => Transition::terminal()
            .with_effect(Effect::NotifyAdmin(view::assignment_notice(
                user,
                session.country_name(),
            )))
            .with_effect(Effect::ForwardToAdmin(inbound.source))
            .reply(view::assignment_received()),
        Content::Other => Transition::to(session.clone()).reply(view::assignment_prompt()),
    }
}

fn receive_detail(session: &Session, user: &User, content: &Content) -> Transition {
    let Some(text) = content.text() else {
        return Transition::to(session.clone()).reply(detail_prompt(session.state));
    };
    if text.starts_with('/') {
        debug!(state = ?session.state, "Command-like text ignored while awaiting details");
        return Transition::to(session.clone());
    }

    let value = Some(text.to_string());
    match session.state {
        State::AwaitingName => Transition::to(Session {
            state: State::AwaitingPhone,
            name: value,
            ..session.clone()
        })
        .reply(view::phone_prompt()),
        State::AwaitingPhone => Transition::to(Session {
            state: State::AwaitingSubject,
            phone: value,
            ..session.clone()
        })
        .reply(view::subject_prompt()),
        _ => {
            let completed = Session {
                subject: value,
                ..session.clone()
            };
            Transition::terminal()
                .with_effect(Effect::NotifyAdmin(view::request_notice(&completed, user)))
                .reply(view::request_sent())
        }
    }
}

fn detail_prompt(state: State) -> Reply {
    match state {
        State::AwaitingPhone => view::phone_prompt(),
        State::AwaitingSubject => view::subject_prompt(),
        _ => view::name_prompt(),
    }
}
