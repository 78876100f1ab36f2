use crate::context::ExecutionContext;
use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use traceit_runtime::Session;
use traceit_types::Role;

/// Sign in and persist the session. Nothing is written on failure, so a
/// rejected login leaves the signed-out state untouched.
pub fn login(ctx: &ExecutionContext, email: &str, password: &str, role: Role) -> Result<()> {
    let backend = ctx.backend()?;

    let response = backend.login(email, password, role).map_err(|err| {
        if err.is_unauthorized() {
            anyhow!("Login failed: invalid credentials, or this account is not a {}", role)
        } else {
            err.into()
        }
    })?;

    let session = Session {
        token: response.token,
        role: response.user.role,
        email: response.user.email.clone(),
    };
    ctx.session_store().save(&session)?;

    println!("Signed in as {} ({})", email, session.role);
    match session.role {
        Role::Admin => {
            println!("Moderation queue: traceit report list --all --status pending");
        }
        Role::Student => {
            println!("Browse items: traceit report list");
        }
    }
    Ok(())
}

/// Create an account. Registration is student-only; admin accounts are
/// provisioned on the backend.
pub fn register(ctx: &ExecutionContext, name: &str, email: &str, password: &str) -> Result<()> {
    let backend = ctx.backend()?;
    backend.register(name, email, password)?;

    println!("Registered {} as a student.", email);
    println!("Sign in with: traceit auth login --email {} --password <password>", email);
    Ok(())
}

pub fn logout(ctx: &ExecutionContext) -> Result<()> {
    ctx.session_store().clear()?;
    println!("Signed out.");
    Ok(())
}

pub fn status(ctx: &ExecutionContext) -> Result<()> {
    match ctx.session_store().load()? {
        Some(session) => {
            let who = session.email.as_deref().unwrap_or("(unknown email)");
            println!("Signed in as {} ({})", who, session.role.green());
        }
        None => {
            println!("Not signed in.");
        }
    }
    Ok(())
}
