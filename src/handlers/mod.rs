//! HTTP commands of the gateway, one file per command.

use serde::Deserialize;

use crate::app::App;
use crate::microsvc::Service;
use crate::store::AccountStore;

pub mod ask;
pub mod login;
pub mod register;
pub mod remaining;

pub(crate) const IDENTITY: &[&str] = &["email", "identity"];
pub(crate) const CREDENTIAL: &[&str] = &["password", "credential"];
/// `(canonical, alias)` spellings folded before decoding.
pub(crate) const ALIASES: &[(&str, &str)] = &[("email", "identity"), ("password", "credential")];

/// Body of `register` and `login`.
#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Build the gateway service with every command registered.
pub fn service<S: AccountStore>(app: App<S>) -> Service<App<S>> {
    crate::register_handlers!(Service::new(app), register, login, remaining, ask)
}
