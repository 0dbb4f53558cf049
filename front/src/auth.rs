use abi::{Error, LoginRequest, LoginResponse, RegisterRequest};
use booking::{Action, Store, TokenStorage};
use tracing::{info, warn};

use crate::{messages, HotelApi, Route};

/// Login / registration form.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    is_register: bool,
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Register,
    Login,
}

impl Step {
    fn fallback(self) -> &'static str {
        match self {
            Step::Register => messages::REGISTER_FAILED,
            Step::Login => messages::LOGIN_FAILED,
        }
    }
}

impl AuthForm {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn register(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_register: true,
            error: None,
        }
    }

    pub fn is_register(&self) -> bool {
        self.is_register
    }

    /// Switch between login and registration; field values are kept.
    pub fn set_register(&mut self, is_register: bool) {
        self.is_register = is_register;
    }

    pub fn toggle_mode(&mut self) {
        self.is_register = !self.is_register;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn title(&self) -> &'static str {
        if self.is_register {
            "Crear cuenta"
        } else {
            "Iniciar sesión"
        }
    }

    /// Field labels shown for the current mode.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(4);
        if self.is_register {
            fields.extend(["Nombre", "Apellidos"]);
        }
        fields.extend(["Email", "Contraseña"]);
        fields
    }

    fn missing_required(&self) -> bool {
        self.email.trim().is_empty()
            || self.password.is_empty()
            || (self.is_register && self.first_name.trim().is_empty())
    }

    /// Submit the form. On success the session is stored and the route to
    /// navigate to is returned; on failure the error slot is filled.
    pub async fn submit(&mut self, api: &dyn HotelApi, store: &Store) -> Option<Route> {
        self.error = None;
        if self.missing_required() {
            self.error = Some(messages::MISSING_FIELDS.to_string());
            return None;
        }

        match self.run(api, store).await {
            Ok(resp) => {
                info!("user {} logged in", resp.user.email);
                Some(Route::Home)
            }
            Err((step, e)) => {
                warn!("{step:?} failed: {e}");
                self.error = Some(messages::user_message(&e, step.fallback()));
                None
            }
        }
    }

    async fn run(&self, api: &dyn HotelApi, store: &Store) -> Result<LoginResponse, (Step, Error)> {
        if self.is_register {
            let req = RegisterRequest {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
            };
            api.register(&req).await.map_err(|e| (Step::Register, e))?;
            info!("registered {}", req.email);
        }

        let req = LoginRequest::new(self.email.trim(), self.password.clone());
        let resp = api.login(&req).await.map_err(|e| (Step::Login, e))?;

        store
            .storage()
            .save(&resp.token)
            .map_err(|e| (Step::Login, e))?;
        store
            .dispatch(Action::SetUser {
                user: resp.user.clone(),
                token: resp.token.clone(),
            })
            .map_err(|e| (Step::Login, e))?;
        Ok(resp)
    }
}
