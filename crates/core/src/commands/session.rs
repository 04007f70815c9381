use serde_json::{json, Value};

use super::{arg_user, CommandContext};
use crate::{actions, errors::Result, runtime};

pub fn sign_in(ctx: &mut CommandContext<'_>, args: Value) -> Result<Value> {
    let user = arg_user(&args, "session.sign_in", "user")?;

    let outcome = runtime::block_on(actions::sign_in(ctx.library, ctx.session, user))?;
    Ok(json!(outcome))
}

pub fn sign_out(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    Ok(json!(actions::sign_out(ctx.session)))
}

/// Pick up library changes made by other sessions
pub fn sync(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    let outcome = runtime::block_on(actions::sync(ctx.library, ctx.session))?;
    Ok(json!(outcome))
}
