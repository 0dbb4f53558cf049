use std::sync::Arc;

use abi::{Error, Todo, UnknownActionError, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::TokenStorage;

const ACTION_KINDS: [&str; 4] = ["set_hello", "add_task", "set_user", "logout_user"];

/// Client state for the lifetime of one session.
///
/// `user` and `token` are only written together by [`reduce`]; the one
/// exception is the initial state, where a persisted token may be present
/// before the user profile has been fetched again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub message: Option<String>,
    pub todos: Vec<Todo>,
    user: Option<User>,
    token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    SetHello(String),
    AddTask { id: u32, color: String },
    SetUser { user: User, token: String },
    LogoutUser,
}

/// Untyped action as dispatched by a view: `{"type": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl SessionState {
    pub fn new(persisted_token: Option<String>) -> Self {
        Self {
            message: None,
            todos: Todo::samples(),
            user: None,
            token: persisted_token,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetHello(_) => "set_hello",
            Action::AddTask { .. } => "add_task",
            Action::SetUser { .. } => "set_user",
            Action::LogoutUser => "logout_user",
        }
    }
}

impl RawAction {
    pub fn new(kind: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

impl TryFrom<RawAction> for Action {
    type Error = Error;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        if !ACTION_KINDS.contains(&raw.kind.as_str()) {
            return Err(UnknownActionError::new(raw.kind).into());
        }
        let mut value = serde_json::Map::new();
        value.insert("type".into(), Value::String(raw.kind.clone()));
        if let Some(payload) = raw.payload {
            value.insert("payload".into(), payload);
        }
        serde_json::from_value(Value::Object(value)).map_err(|e| Error::InvalidActionPayload {
            kind: raw.kind,
            reason: e.to_string(),
        })
    }
}

/// Pure state transition over the recognized actions.
pub fn reduce(state: SessionState, action: &Action) -> SessionState {
    match action {
        Action::SetHello(message) => SessionState {
            message: Some(message.clone()),
            ..state
        },
        Action::AddTask { id, color } => SessionState {
            todos: state
                .todos
                .into_iter()
                .map(|todo| {
                    if todo.id == *id {
                        Todo {
                            background: Some(color.clone()),
                            ..todo
                        }
                    } else {
                        todo
                    }
                })
                .collect(),
            ..state
        },
        Action::SetUser { user, token } => SessionState {
            user: Some(user.clone()),
            token: Some(token.clone()),
            ..state
        },
        Action::LogoutUser => SessionState {
            user: None,
            token: None,
            ..state
        },
    }
}

/// Reduce an untyped action; unknown kinds fail instead of being ignored.
pub fn apply(state: SessionState, raw: RawAction) -> Result<SessionState, Error> {
    let action = Action::try_from(raw)?;
    Ok(reduce(state, &action))
}

/// Shared handle to the session state, owned by the application.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn TokenStorage>,
}

impl Store {
    /// Seed the token from durable storage; the user always starts absent.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Result<Self, Error> {
        let token = storage.load()?;
        let (state, _) = watch::channel(SessionState::new(token));
        Ok(Self {
            inner: Arc::new(StoreInner { state, storage }),
        })
    }

    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.inner.storage
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Apply the action. The state is updated even when clearing the
    /// persisted token on logout fails; that failure is returned.
    pub fn dispatch(&self, action: Action) -> Result<(), Error> {
        debug!("dispatch {}", action.kind());
        self.inner
            .state
            .send_modify(|state| *state = reduce(std::mem::take(state), &action));

        if matches!(action, Action::LogoutUser) {
            if let Err(e) = self.inner.storage.remove() {
                warn!("failed to remove persisted token: {e}");
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn dispatch_raw(&self, raw: RawAction) -> Result<(), Error> {
        let action = Action::try_from(raw)?;
        self.dispatch(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTokenStorage;
    use serde_json::json;

    fn ana() -> User {
        User::new(1, "ana@hotel.es").with_name("Ana", "García")
    }

    #[test]
    fn initial_state_should_have_sample_todos() {
        let state = SessionState::default();
        assert_eq!(state.todos.len(), 2);
        assert_eq!(state.todos[0].title, "Make the bed");
        assert!(state.user().is_none());
        assert!(state.token().is_none());
        assert!(state.message.is_none());
    }

    #[test]
    fn set_hello_should_set_message() {
        let state = reduce(SessionState::default(), &Action::SetHello("hola".into()));
        assert_eq!(state.message.as_deref(), Some("hola"));
    }

    #[test]
    fn add_task_should_color_matching_todo_only() {
        let action = Action::AddTask {
            id: 2,
            color: "#F4B858".into(),
        };
        let state = reduce(SessionState::default(), &action);
        assert_eq!(state.todos[0].background, None);
        assert_eq!(state.todos[1].background.as_deref(), Some("#F4B858"));

        let unchanged = reduce(
            state.clone(),
            &Action::AddTask {
                id: 42,
                color: "red".into(),
            },
        );
        assert_eq!(unchanged, state);
    }

    #[test]
    fn set_user_and_logout_should_move_user_and_token_together() {
        let state = reduce(
            SessionState::default(),
            &Action::SetUser {
                user: ana(),
                token: "tok".into(),
            },
        );
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some("tok"));

        let state = reduce(state, &Action::LogoutUser);
        assert!(state.user().is_none());
        assert!(state.token().is_none());
        assert_eq!(state.todos, Todo::samples());
    }

    #[test]
    fn raw_action_should_parse_known_kinds() {
        let raw: RawAction = serde_json::from_value(json!({
            "type": "add_task",
            "payload": {"id": 1, "color": "blue"}
        }))
        .unwrap();
        assert_eq!(
            Action::try_from(raw).unwrap(),
            Action::AddTask {
                id: 1,
                color: "blue".into()
            }
        );

        let raw = RawAction::new("logout_user", None);
        assert_eq!(Action::try_from(raw).unwrap(), Action::LogoutUser);

        let raw = RawAction::new("set_hello", Some(json!("hello")));
        assert_eq!(
            Action::try_from(raw).unwrap(),
            Action::SetHello("hello".into())
        );
    }

    #[test]
    fn apply_should_reject_unknown_action() {
        let err = apply(SessionState::default(), RawAction::new("remove_todo", None)).unwrap_err();
        match err {
            Error::UnknownAction(e) => assert_eq!(e.kind, "remove_todo"),
            other => panic!("expect unknown action, got {other:?}"),
        }
    }

    #[test]
    fn apply_should_reject_bad_payload() {
        let err = apply(
            SessionState::default(),
            RawAction::new("set_user", Some(json!({"token": "t"}))),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidActionPayload { ref kind, .. } if kind == "set_user"));
    }

    #[test]
    fn store_should_seed_token_from_storage() {
        let storage = Arc::new(MemoryTokenStorage::with_token("persisted"));
        let store = Store::new(storage).unwrap();
        let state = store.state();
        assert_eq!(state.token(), Some("persisted"));
        assert!(state.user().is_none());
    }

    #[test]
    fn logout_should_remove_persisted_token() {
        let storage = Arc::new(MemoryTokenStorage::with_token("persisted"));
        let store = Store::new(storage.clone()).unwrap();
        store
            .dispatch(Action::SetUser {
                user: ana(),
                token: "persisted".into(),
            })
            .unwrap();

        store.dispatch(Action::LogoutUser).unwrap();
        let once = store.state();
        store.dispatch(Action::LogoutUser).unwrap();
        assert_eq!(store.state(), once);
        assert!(once.user().is_none() && once.token().is_none());
        assert_eq!(storage.load().unwrap(), None);
    }

    #[tokio::test]
    async fn subscribers_should_see_dispatches() {
        let store = Store::new(Arc::new(MemoryTokenStorage::default())).unwrap();
        let mut rx = store.subscribe();
        store
            .dispatch(Action::SetUser {
                user: ana(),
                token: "t".into(),
            })
            .unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().user().map(User::display_name), Some("Ana"));
    }

    #[test]
    fn dispatch_raw_should_not_touch_state_on_error() {
        let store = Store::new(Arc::new(MemoryTokenStorage::default())).unwrap();
        let before = store.state();
        assert!(store.dispatch_raw(RawAction::new("nope", None)).is_err());
        assert_eq!(store.state(), before);
    }
}
