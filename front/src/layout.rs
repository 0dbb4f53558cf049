use std::fmt;

use booking::SessionState;
use chrono::Datelike;

use crate::NavShell;

pub const BRAND: &str = "Booking System Hotel";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" | "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub fn footer_text(year: i32) -> String {
    format!("© {year} {BRAND}. Todos los derechos reservados.")
}

/// Page frame: navbar on top, the routed page, footer at the bottom.
#[derive(Debug, Default)]
pub struct Layout {
    pub route: Route,
    pub nav: NavShell,
}

impl Layout {
    pub fn navigate(&mut self, route: Route) {
        self.route = route;
        self.nav.close_menu();
    }

    pub fn render(&self, state: &SessionState, page: &str) -> String {
        self.render_in_year(state, page, chrono::Local::now().year())
    }

    pub fn render_in_year(&self, state: &SessionState, page: &str, year: i32) -> String {
        let mut out = self.nav.view(state).to_string();
        out.push_str("\n\n");
        if !page.is_empty() {
            out.push_str(page.trim_end());
            out.push_str("\n\n");
        }
        out.push_str(&footer_text(year));
        out
    }
}
