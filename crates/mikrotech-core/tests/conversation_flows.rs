use async_trait::async_trait;
use mikrotech_core::catalog::{find_country, COUNTRIES};
use mikrotech_core::conversation::{
    Action, Content, Event, Inbound, MessageRef, Reply, Service, State, TutorOption, User,
};
use mikrotech_core::engine::Incoming;
use mikrotech_core::{ConversationEngine, Messenger, MessengerError};
use std::sync::Mutex;

const USER_ID: i64 = 5150;
const CHAT_ID: i64 = 5150;
const MENU_MESSAGE: i32 = 1;

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Send(String),
    Edit(i32, String),
    Admin(String),
    Forward(MessageRef),
}

#[derive(Default)]
struct RecordingMessenger {
    log: Mutex<Vec<Sent>>,
}

impl RecordingMessenger {
    fn push(&self, sent: Sent) {
        self.log.lock().expect("log lock").push(sent);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, _chat_id: i64, reply: &Reply) -> Result<(), MessengerError> {
        self.push(Sent::Send(reply.text.clone()));
        Ok(())
    }

    async fn edit(&self, target: MessageRef, reply: &Reply) -> Result<(), MessengerError> {
        self.push(Sent::Edit(target.message_id, reply.text.clone()));
        Ok(())
    }

    async fn notify_admin(&self, text: &str) -> Result<(), MessengerError> {
        self.push(Sent::Admin(text.to_string()));
        Ok(())
    }

    async fn forward_to_admin(&self, source: MessageRef) -> Result<(), MessengerError> {
        self.push(Sent::Forward(source));
        Ok(())
    }
}

struct Harness {
    engine: ConversationEngine<RecordingMessenger>,
    next_message_id: i32,
}

impl Harness {
    fn new() -> Self {
        Self {
            engine: ConversationEngine::new(RecordingMessenger::default()),
            next_message_id: 100,
        }
    }

    fn user() -> User {
        User {
            id: USER_ID,
            first_name: "Layla".to_string(),
        }
    }

    async fn command(&self, event: Event) {
        self.engine
            .handle(Incoming {
                user: Self::user(),
                chat_id: CHAT_ID,
                pressed: None,
                event,
            })
            .await
            .expect("command handled");
    }

    async fn press(&self, action: Action) {
        self.engine
            .handle(Incoming {
                user: Self::user(),
                chat_id: CHAT_ID,
                pressed: Some(MessageRef {
                    chat_id: CHAT_ID,
                    message_id: MENU_MESSAGE,
                }),
                event: Event::Button(action),
            })
            .await
            .expect("button handled");
    }

    async fn say(&mut self, content: Content) -> MessageRef {
        let source = MessageRef {
            chat_id: CHAT_ID,
            message_id: self.next_message_id,
        };
        self.next_message_id += 1;
        self.engine
            .handle(Incoming {
                user: Self::user(),
                chat_id: CHAT_ID,
                pressed: None,
                event: Event::Message(Inbound { source, content }),
            })
            .await
            .expect("message handled");
        source
    }

    async fn say_text(&mut self, text: &str) -> MessageRef {
        self.say(Content::Text(text.to_string())).await
    }

    fn take_log(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.engine.messenger().log.lock().expect("log lock"))
    }

    async fn state(&self) -> Option<State> {
        self.engine.sessions().get(USER_ID).await.map(|s| s.state)
    }
}

fn country(code: &str) -> Action {
    Action::Country(find_country(code).expect("country in table"))
}

#[tokio::test]
async fn every_country_echoes_its_name() {
    for c in &COUNTRIES {
        let h = Harness::new();
        h.command(Event::Start).await;
        h.press(Action::Country(c)).await;

        assert_eq!(h.state().await, Some(State::SelectingService));
        let log = h.take_log();
        let Some(Sent::Edit(MENU_MESSAGE, text)) = log.last() else {
            panic!("expected the menu to be edited, got {log:?}");
        };
        assert!(text.contains(c.name), "{} missing from {text}", c.name);
    }
}

#[tokio::test]
async fn uk_info_shows_base_prices() {
    let h = Harness::new();
    h.command(Event::Start).await;
    h.press(country("uk")).await;
    h.take_log();

    h.press(Action::Service(Service::Info)).await;
    let log = h.take_log();
    let [Sent::Edit(_, text)] = log.as_slice() else {
        panic!("expected one edit, got {log:?}");
    };
    assert!(text.contains("<code>40 GBP</code>"));
    assert!(text.contains("<code>35 GBP</code> /student"));
    assert!(text.contains("<code>30 GBP</code> /student"));

    h.press(Action::BackToServices).await;
    assert_eq!(h.state().await, Some(State::SelectingService));
}

#[tokio::test]
async fn kuwait_assignment_is_relayed_once() {
    let mut h = Harness::new();
    h.command(Event::Start).await;
    h.press(country("kw")).await;
    h.press(Action::Service(Service::Assignment)).await;
    assert_eq!(h.state().await, Some(State::AwaitingAssignment));
    h.take_log();

    let source = h.say_text("help me").await;
    let log = h.take_log();
    let admin: Vec<_> = log.iter().filter(|s| matches!(s, Sent::Admin(_))).collect();
    let forwards: Vec<_> = log
        .iter()
        .filter(|s| matches!(s, Sent::Forward(_)))
        .collect();
    assert_eq!(admin.len(), 1);
    assert_eq!(forwards, vec![&Sent::Forward(source)]);
    assert!(matches!(&log[0], Sent::Admin(text) if text.contains("Kuwait") && text.contains("Layla")));
    assert!(matches!(log.last(), Some(Sent::Send(text)) if text.contains("assignment has been sent")));
    assert_eq!(h.state().await, None);

    // Next free input opens a new conversation at the country menu
    h.say_text("hello again").await;
    assert_eq!(h.state().await, Some(State::SelectingCountry));
    assert!(matches!(h.take_log().as_slice(), [Sent::Send(text)] if text.contains("select the country")));
}

#[tokio::test]
async fn assignment_can_be_a_document() {
    let mut h = Harness::new();
    h.command(Event::Start).await;
    h.press(country("sa")).await;
    h.press(Action::Service(Service::Assignment)).await;
    h.take_log();

    let source = h.say(Content::Document).await;
    assert!(h.take_log().contains(&Sent::Forward(source)));
    assert_eq!(h.state().await, None);
}

#[tokio::test]
async fn lesson_request_reaches_admin() {
    let mut h = Harness::new();
    h.command(Event::Start).await;
    h.press(country("ae")).await;
    h.press(Action::Service(Service::Lesson)).await;
    h.say_text("Layla Hassan").await;
    h.say_text("+971 50 000 0000").await;
    h.take_log();
    h.say_text("Chemistry").await;

    let log = h.take_log();
    assert_eq!(log.len(), 2);
    let Sent::Admin(notice) = &log[0] else {
        panic!("expected admin notice first, got {log:?}");
    };
    assert!(notice.contains("New Private Lesson Request!"));
    assert!(notice.contains("<b>Name:</b> Layla Hassan"));
    assert!(notice.contains("<b>Phone:</b> +971 50 000 0000"));
    assert!(notice.contains("<b>Subject:</b> Chemistry"));
    assert!(notice.contains("<b>Country:</b> United Arab Emirates"));
    assert!(notice.contains("<code>5150</code>"));
    assert_eq!(h.state().await, None);
}

#[tokio::test]
async fn tutor_form_and_direct_connect() {
    let mut h = Harness::new();
    h.command(Event::Start).await;
    h.press(country("ca")).await;
    h.press(Action::Service(Service::Tutor)).await;
    assert_eq!(h.state().await, Some(State::SelectingTutorOption));
    h.press(Action::Tutor(TutorOption::FillForm)).await;
    h.say_text("Sam").await;
    h.say_text("+1 204 555 0100").await;
    h.take_log();
    h.say_text("Calculus").await;
    assert!(matches!(&h.take_log()[0], Sent::Admin(text) if text.contains("Tutor Request (Form)")));

    h.command(Event::Start).await;
    h.press(country("ca")).await;
    h.press(Action::Service(Service::Tutor)).await;
    h.take_log();
    h.press(Action::Tutor(TutorOption::DirectConnect)).await;
    let log = h.take_log();
    assert!(matches!(&log[0], Sent::Admin(text) if text.contains("tg://user?id=5150")));
    assert!(matches!(&log[1], Sent::Edit(MENU_MESSAGE, text) if text.contains("admin has been notified")));
    assert_eq!(h.state().await, None);
}

#[tokio::test]
async fn cancel_then_start_leaves_no_residue() {
    let mut h = Harness::new();
    h.command(Event::Start).await;
    h.press(country("qa")).await;
    h.press(Action::Service(Service::Lesson)).await;
    h.say_text("Old Name").await;
    h.say_text("000").await;

    h.command(Event::Cancel).await;
    assert_eq!(h.state().await, None);
    assert!(matches!(h.take_log().last(), Some(Sent::Send(text)) if text.starts_with("Operation cancelled")));

    h.command(Event::Start).await;
    let session = h
        .engine
        .sessions()
        .get(USER_ID)
        .await
        .expect("fresh session");
    assert_eq!(session.state, State::SelectingCountry);
    assert_eq!(session.country, None);
    assert_eq!(session.name, None);
    assert_eq!(session.phone, None);
    assert_eq!(session.subject, None);
}

#[tokio::test]
async fn change_country_loops_back() {
    let h = Harness::new();
    h.command(Event::Start).await;
    h.press(country("us")).await;
    h.press(Action::ChangeCountry).await;
    assert_eq!(h.state().await, Some(State::SelectingCountry));
    h.press(country("kw")).await;

    let session = h.engine.sessions().get(USER_ID).await.expect("session");
    assert_eq!(session.country_name(), "Kuwait");
}
