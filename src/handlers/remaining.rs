//! Handler: remaining
//!
//! Reports how many completions the identity has left today.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{ALIASES, IDENTITY};
use crate::app::App;
use crate::microsvc::{Context, HandlerError};
use crate::store::AccountStore;

pub const COMMAND: &str = "remaining";

#[derive(Deserialize)]
pub struct Input {
    pub email: String,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.has_any_field(IDENTITY)
}

pub async fn handle<S: AccountStore>(ctx: Context<App<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input_aliased::<Input>(ALIASES)?;
    let remaining = ctx.state().quota().remaining(&input.email)?;
    Ok(json!({ "remaining": remaining }))
}
