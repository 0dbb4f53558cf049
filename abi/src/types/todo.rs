use serde::{Deserialize, Serialize};

/// Sample todo entry kept in the session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub title: String,
    pub background: Option<String>,
}

impl Todo {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            background: None,
        }
    }

    pub fn samples() -> Vec<Todo> {
        vec![Todo::new(1, "Make the bed"), Todo::new(2, "Do my homework")]
    }
}
