use std::sync::Arc;

use abi::{Config, Error};
use booking::{FileTokenStorage, SessionState, Store, TokenStorage};
use tracing::info;

use crate::{AuthForm, HotelApi, HttpHotelApi, Layout, Route, SearchForm};

/// Application context owning the store, the backend client and the forms.
pub struct App {
    store: Store,
    api: Arc<dyn HotelApi>,
    pub layout: Layout,
    pub search: SearchForm,
    pub auth: AuthForm,
}

impl App {
    pub fn new(store: Store, api: Arc<dyn HotelApi>) -> Self {
        Self {
            store,
            api,
            layout: Layout::default(),
            search: SearchForm::default(),
            auth: AuthForm::default(),
        }
    }

    /// Wire the http client and file backed token storage from `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let storage: Arc<dyn TokenStorage> =
            Arc::new(FileTokenStorage::from_config(&config.storage)?);
        let store = Store::new(storage)?;
        let api = Arc::new(HttpHotelApi::new(config.api.clone())?);
        Ok(Self::new(store, api))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        self.store.state()
    }

    pub fn route(&self) -> Route {
        self.layout.route
    }

    pub fn navigate(&mut self, route: Route) {
        info!("navigate to {route}");
        self.layout.navigate(route);
    }

    pub async fn submit_search(&mut self) -> bool {
        self.search.submit(self.api.as_ref()).await
    }

    pub async fn load_all_availability(&mut self) -> bool {
        self.search.load_all(self.api.as_ref()).await
    }

    /// Submit the auth form and follow the redirect on success.
    pub async fn submit_auth(&mut self) -> bool {
        match self.auth.submit(self.api.as_ref(), &self.store).await {
            Some(route) => {
                self.navigate(route);
                true
            }
            None => false,
        }
    }

    pub fn logout(&mut self) -> Result<(), Error> {
        self.layout.nav.logout(&self.store)
    }

    pub fn render(&self) -> String {
        self.layout.render(&self.state(), &self.render_page())
    }

    pub fn render_page(&self) -> String {
        match self.layout.route {
            Route::Home => render_home(&self.search),
            Route::Login => render_login(&self.auth),
        }
    }
}

fn render_home(search: &SearchForm) -> String {
    let draft = &search.draft;
    let mut out = String::from("Reserva tu estancia\n");
    if search.has_searched() {
        out.push_str(&format!(
            "Entrada {} · Salida {} · Adultos {} · Niños {}\n",
            draft.check_in, draft.check_out, draft.adults, draft.children
        ));
    }
    if let Some(err) = search.error() {
        out.push_str(&format!("Error: {err}\n"));
    }
    let results = search.view().to_string();
    if !results.is_empty() {
        out.push('\n');
        out.push_str(&results);
    }
    out
}

fn render_login(auth: &AuthForm) -> String {
    let mut out = format!("{}\n", auth.title());
    if let Some(err) = auth.error() {
        out.push_str(&format!("Error: {err}\n"));
    }
    out
}
