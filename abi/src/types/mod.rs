mod auth;
mod availability;
mod lenient;
mod todo;
mod user;

pub use auth::*;
pub use availability::*;
pub use todo::*;
pub use user::*;
