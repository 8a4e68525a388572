use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use ppetrack_auth::{CredentialTable, LoginAttempt, LoginGate};
use ppetrack_infra::{AppConfig, Tracker};

mod args;
mod commands;
mod render;
mod shell;

use args::{Cli, Commands};
use shell::Shell;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "ppetrack failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let Cli {
        config,
        data_dir,
        username,
        password,
        json_logs,
        command,
    } = Cli::parse();

    if json_logs {
        ppetrack_observability::init_json();
    } else {
        ppetrack_observability::init();
    }

    let mut config = AppConfig::load(config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    let tracker = Tracker::open(config);
    let credentials = tracker.credentials();
    if credentials.is_empty() {
        anyhow::bail!("no users configured; add entries under \"users\" in the config file");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Commands::Shell = command {
        let stdin = io::stdin();
        let mut shell = Shell::new(&tracker, stdin.lock(), &mut out);
        let granted = match (username.as_deref(), password.as_deref()) {
            (Some(user), Some(pass)) => {
                authenticate(&credentials, user, pass)?;
                true
            }
            _ => shell.login(&credentials)?,
        };
        if !granted {
            return Ok(ExitCode::FAILURE);
        }
        shell.run()?;
        return Ok(ExitCode::SUCCESS);
    }

    let (Some(user), Some(pass)) = (username, password) else {
        anyhow::bail!(
            "credentials required: pass --username and --password or set PPETRACK_USER and PPETRACK_PASSWORD"
        );
    };
    authenticate(&credentials, &user, &pass)?;

    let outcome = commands::execute(&tracker, command, &mut out, &mut io::stderr().lock())?;
    Ok(outcome.into())
}

/// Single-shot credential check for non-interactive use.
fn authenticate(credentials: &CredentialTable, username: &str, password: &str) -> anyhow::Result<()> {
    match LoginGate::with_max_attempts(credentials, 1).attempt(username, password) {
        LoginAttempt::Granted => Ok(()),
        LoginAttempt::Denied { .. } | LoginAttempt::LockedOut => {
            anyhow::bail!("login failed for user '{username}'")
        }
    }
}
