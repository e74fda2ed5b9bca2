use anyhow::Result;
use dialoguer::Password;
use zeroize::Zeroizing;

use crate::commands::Context;

/// Use the flag/environment override when present, otherwise prompt on the
/// controlling terminal without echo.
pub fn obtain(ctx: &Context) -> Result<Zeroizing<String>> {
    if let Some(ref password) = ctx.password_override {
        return Ok(Zeroizing::new(password.clone()));
    }

    let password = Password::new().with_prompt("Database password").interact()?;
    Ok(Zeroizing::new(password))
}
