//! Interactive session: the terminal stand-in for the dashboard UI.
//!
//! Every command runs to completion before the next line is read, so at
//! most one fetch or send is in flight. Command errors are printed and the
//! session carries on; only stdin failures end it early.

mod command;

use std::io::Write as _;

use stockwatch_core::{AppConfig, MailSender, Session};
use stockwatch_sheets::SheetsClient;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::pipeline;
use crate::render;
use crate::report::render_views;
use crate::View;

use self::command::{parse_command, SessionCommand, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub(crate) struct Repl<'a, M> {
    config: &'a AppConfig,
    client: SheetsClient,
    mailer: Option<M>,
    session: Session,
}

impl<'a, M: MailSender> Repl<'a, M> {
    pub(crate) fn new(
        config: &'a AppConfig,
        client: SheetsClient,
        mailer: Option<M>,
        session: Session,
    ) -> Self {
        Self {
            config,
            client,
            mailer,
            session,
        }
    }

    /// Runs one command, appending its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns the command's failure (fetch, schema, invalid watch or
    /// selection, missing data or mailer). Session state is unchanged by a
    /// failed command.
    pub(crate) async fn execute(
        &mut self,
        command: SessionCommand,
        out: &mut String,
    ) -> anyhow::Result<Flow> {
        match command {
            SessionCommand::Load => {
                let rows = pipeline::refresh(&mut self.session, &self.client, self.config).await?;
                out.push_str(&format!("Loaded {rows} products.\n"));
            }
            SessionCommand::Brands => {
                out.push_str(&render::render_brands(&self.session.brands()?));
            }
            SessionCommand::Watch { brand, email } => {
                let watch = self
                    .session
                    .watches_mut()
                    .register(&brand, email.as_deref())?;
                match &watch.notification_email {
                    Some(email) => {
                        out.push_str(&format!("Watching {} (alerts to {email}).\n", watch.brand));
                    }
                    None => out.push_str(&format!("Watching {} (no alerts).\n", watch.brand)),
                }
            }
            SessionCommand::Unwatch(brand) => match self.session.watches_mut().remove(&brand) {
                Some(watch) => out.push_str(&format!("Stopped watching {}.\n", watch.brand)),
                None => anyhow::bail!("'{brand}' is not watched"),
            },
            SessionCommand::Watches => {
                out.push_str(&render::render_watches(self.session.watches()));
            }
            SessionCommand::Select(brands) => {
                self.session.select(&brands)?;
                out.push_str(&format!(
                    "Selected: {}\n",
                    self.session.selection().join(", ")
                ));
            }
            SessionCommand::Show(view) => {
                if view != View::Raw && self.session.selection().is_empty() {
                    anyhow::bail!("no brands selected; use 'select <brand>'");
                }
                out.push_str(&render_views(&self.session, view)?);
            }
            SessionCommand::Notify => {
                let Some(mailer) = &self.mailer else {
                    anyhow::bail!("email alerts are not configured; set STOCKWATCH_SMTP_HOST");
                };
                let results = self.session.notify_watched(mailer).await?;
                out.push_str(&render::render_notify_results(&results));
            }
            SessionCommand::Clear => {
                self.session.clear();
                out.push_str("Session cleared.\n");
            }
            SessionCommand::Help => out.push_str(HELP),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn prompt() {
    print!("stockwatch> ");
    std::io::stdout().flush().ok();
}

/// Run the interactive session on stdin until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if startup wiring fails (watches file, client or
/// mailer construction) or stdin cannot be read.
pub(crate) async fn run_session(config: &AppConfig) -> anyhow::Result<()> {
    let watches = pipeline::load_watch_list(config, &[])?;
    let client = pipeline::build_sheets_client(config)?;
    let mailer = pipeline::build_mailer(config)?;
    if mailer.is_none() {
        tracing::info!("SMTP not configured; 'notify' is disabled for this session");
    }
    let mut repl = Repl::new(config, client, mailer, Session::new(watches));

    println!("stockwatch session. Type 'help' for commands.");
    prompt();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                let mut out = String::new();
                match repl.execute(command, &mut out).await {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => print!("{out}"),
                    Err(e) => eprintln!("error: {e:#}"),
                }
            }
            Err(message) => eprintln!("{message}"),
        }
        prompt();
    }
    println!();
    Ok(())
}

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;
