//! Handler: register

use serde_json::{json, Value};

use super::{Credentials, ALIASES, CREDENTIAL, IDENTITY};
use crate::app::App;
use crate::microsvc::{Context, HandlerError};
use crate::store::AccountStore;

pub const COMMAND: &str = "register";

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.has_any_field(IDENTITY) && ctx.has_any_field(CREDENTIAL)
}

pub async fn handle<S: AccountStore>(ctx: Context<App<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input_aliased::<Credentials>(ALIASES)?;
    ctx.state()
        .auth()
        .register(&input.email, &input.password)
        .await?;
    Ok(json!({ "success": true }))
}
