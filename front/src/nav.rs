use std::fmt;

use abi::Error;
use booking::{Action, SessionState, Store};
use tracing::info;

use crate::{layout::BRAND, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    LoginLink(Route),
    UserName(String),
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub brand: &'static str,
    pub home: Route,
    pub items: Vec<NavItem>,
    pub menu_open: bool,
}

#[derive(Debug, Default)]
pub struct NavShell {
    menu_open: bool,
}

impl NavShell {
    /// Links shown for the given session.
    pub fn view(&self, state: &SessionState) -> NavView {
        let items = match state.user() {
            Some(user) => vec![
                NavItem::UserName(user.display_name().to_string()),
                NavItem::Logout,
            ],
            None => vec![NavItem::LoginLink(Route::Login)],
        };
        NavView {
            brand: BRAND,
            home: Route::Home,
            items,
            menu_open: self.menu_open,
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// No confirmation, no network call.
    pub fn logout(&self, store: &Store) -> Result<(), Error> {
        info!("logging out");
        store.dispatch(Action::LogoutUser)
    }
}

impl NavView {
    pub fn is_logged_in(&self) -> bool {
        self.items.contains(&NavItem::Logout)
    }
}

impl fmt::Display for NavView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.brand)?;
        for item in &self.items {
            match item {
                NavItem::LoginLink(_) => write!(f, " | Login")?,
                NavItem::UserName(name) => write!(f, " | {name}")?,
                NavItem::Logout => write!(f, " | Logout")?,
            }
        }
        Ok(())
    }
}
