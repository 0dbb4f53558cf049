//! Hotel booking front: session store wiring, the home search form, the
//! login/registration form, the navbar and the page layout, backed by the
//! hotel HTTP api.

mod api;
mod app;
mod auth;
mod layout;
pub mod messages;
mod nav;
mod results;
mod search;

#[cfg(test)]
mod test_utils;

pub use api::{
    normalize_records, HotelApi, HttpHotelApi, AVAILABILITY_PATH, AVAILABILITY_SEARCH_PATH,
    LOGIN_PATH, REGISTER_PATH,
};
pub use app::App;
pub use auth::AuthForm;
pub use layout::{footer_text, Layout, Route, BRAND};
pub use nav::{NavItem, NavShell, NavView};
pub use results::{ResultsView, RoomCard};
pub use search::{SearchDraft, SearchForm, SearchTicket};
