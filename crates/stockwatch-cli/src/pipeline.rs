//! Shared wiring for every command: building the sheet client and mailer,
//! seeding the watch list, and loading the table into a session.

use stockwatch_core::{load_watches, AppConfig, Session, WatchList};
use stockwatch_mailer::SmtpMailer;
use stockwatch_sheets::SheetsClient;

/// A `--watch BRAND[=EMAIL]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WatchArg {
    pub brand: String,
    pub email: Option<String>,
}

/// Parses `BRAND` or `BRAND=EMAIL`. The split is on the last `=`, so brand
/// names may contain one.
pub(crate) fn parse_watch_arg(raw: &str) -> Result<WatchArg, String> {
    let (brand, email) = match raw.rsplit_once('=') {
        Some((brand, email)) => (brand.trim(), Some(email.trim())),
        None => (raw.trim(), None),
    };
    if brand.is_empty() {
        return Err("brand name must be non-empty".to_string());
    }
    Ok(WatchArg {
        brand: brand.to_string(),
        email: email.filter(|e| !e.is_empty()).map(str::to_string),
    })
}

pub(crate) fn build_sheets_client(config: &AppConfig) -> anyhow::Result<SheetsClient> {
    Ok(SheetsClient::from_app_config(config)?)
}

/// The SMTP mailer, or `None` when no relay is configured.
pub(crate) fn build_mailer(config: &AppConfig) -> anyhow::Result<Option<SmtpMailer>> {
    config
        .smtp
        .as_ref()
        .map(SmtpMailer::from_config)
        .transpose()
        .map_err(Into::into)
}

/// Seeds the watch list from the watches file, then applies command-line
/// watches on top.
pub(crate) fn load_watch_list(config: &AppConfig, extra: &[WatchArg]) -> anyhow::Result<WatchList> {
    let mut list = load_watches(&config.watches_path, config.watches_required)?
        .into_watch_list(config.reset_policy)?;
    for arg in extra {
        list.register(&arg.brand, arg.email.as_deref())?;
    }
    tracing::debug!(watches = list.len(), policy = %list.policy(), "watch list ready");
    Ok(list)
}

/// Fetches the sheet and replaces the session's table. On failure the
/// session keeps whatever it had before.
pub(crate) async fn refresh(
    session: &mut Session,
    client: &SheetsClient,
    config: &AppConfig,
) -> anyhow::Result<usize> {
    let table = client
        .fetch_table(&config.sheet_id, &config.sheet_range)
        .await?;
    let rows = table.records.len();
    session.load_with_columns(table.columns, table.records);
    Ok(rows)
}
