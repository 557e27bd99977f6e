//! Account commands.

use anyhow::{Context as _, Result};
use dialoguer::Password;
use serde_json::json;
use teeshack_auth::UserProfile;

use super::{AuthArgs, AuthCommand};
use crate::context::Context;

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    let mut auth = ctx.auth()?;

    match args.command {
        AuthCommand::Login { email, password } => {
            let password = password_or_prompt(password, false)?;
            simulate_latency(ctx, "Signing in...").await;
            let profile = auth.login(&email, &password)?;
            report_profile(&profile, ctx);
            ctx.output.success(&format!("Welcome back, {}", profile.name));
        }
        AuthCommand::Register {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password, true)?;
            simulate_latency(ctx, "Creating account...").await;
            let profile = auth.register(&email, &password, &name)?;
            report_profile(&profile, ctx);
            ctx.output.success(&format!("Account created for {}", profile.email));
            ctx.output
                .warn("Accounts are kept in memory only; sign-in will not work in later runs");
        }
        AuthCommand::Logout => {
            let was = auth.current_user().map(|u| u.email.clone());
            auth.logout()?;
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "signedOut": was }));
            } else if let Some(email) = was {
                ctx.output.success(&format!("Signed out {}", email));
            } else {
                ctx.output.info("Not signed in");
            }
        }
        AuthCommand::Whoami => match auth.current_user() {
            Some(profile) => {
                report_profile(profile, ctx);
                ctx.output.header(&profile.name);
                ctx.output.kv("id", profile.id.as_str());
                ctx.output.kv("email", &profile.email);
                if let Some(avatar) = &profile.avatar {
                    ctx.output.kv("avatar", avatar);
                }
            }
            None => {
                if ctx.output.is_json() {
                    ctx.output.json(&json!({ "user": null }));
                } else {
                    ctx.output.info("Not signed in");
                }
            }
        },
    }

    Ok(())
}

fn password_or_prompt(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt.interact().context("Failed to read password")
}

async fn simulate_latency(ctx: &Context, msg: &str) {
    let spinner = ctx.output.spinner(msg);
    tokio::time::sleep(ctx.config.simulation.auth_latency()).await;
    spinner.finish_and_clear();
}

fn report_profile(profile: &UserProfile, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "user": profile }));
    }
}
