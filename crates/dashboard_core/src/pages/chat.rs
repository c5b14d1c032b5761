use crate::notify::ToastKind;
use crate::registry::PageController;
use crate::{AppState, Effect, MockRequest, PageId, PageSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassifyState {
    #[default]
    Idle,
    Pending,
    Done(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ChatState {
    pub(crate) history: Vec<ChatMessage>,
    pub(crate) classification: ClassifyState,
}

pub(crate) struct ChatPage;

impl PageController for ChatPage {
    fn page(&self) -> PageId {
        PageId::Chat
    }

    fn activate(&self, _state: &mut AppState, _session: PageSession, _effects: &mut Vec<Effect>) {}

    fn teardown(&self, state: &mut AppState, _session: PageSession) {
        if state.chat.classification == ClassifyState::Pending {
            state.chat.classification = ClassifyState::Idle;
            state.mark_dirty();
        }
    }
}

/// Empty messages are dropped silently.
pub(crate) fn send_chat(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Chat) else {
        return;
    };
    let message = state.inputs.chat_message.trim().to_string();
    if message.is_empty() {
        return;
    }
    state.chat.history.push(ChatMessage {
        role: ChatRole::User,
        text: message.clone(),
    });
    state.inputs.chat_message.clear();
    state.mark_dirty();
    effects.push(Effect::Simulate {
        session,
        request: MockRequest::Chat { message },
    });
}

pub(crate) fn apply_chat_reply(state: &mut AppState, reply: String) {
    state.chat.history.push(ChatMessage {
        role: ChatRole::Assistant,
        text: reply,
    });
    state.mark_dirty();
}

pub(crate) fn classify(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Chat) else {
        return;
    };
    let text = state.inputs.classify_text.trim().to_string();
    if text.is_empty() {
        state.notify(effects, ToastKind::Error, "Veuillez entrer du texte à classifier");
        return;
    }
    state.chat.classification = ClassifyState::Pending;
    state.mark_dirty();
    effects.push(Effect::Simulate {
        session,
        request: MockRequest::Classify { text },
    });
}

pub(crate) fn apply_classification(
    state: &mut AppState,
    domains: Vec<String>,
    effects: &mut Vec<Effect>,
) {
    state.chat.classification = ClassifyState::Done(domains);
    state.notify(effects, ToastKind::Success, "Classification terminée");
}
