//! One-shot commands: `brands` and `report`.

use stockwatch_core::{AppConfig, CoreError, NotifyResult, Session};

use crate::pipeline::{self, WatchArg};
use crate::render;
use crate::View;

#[derive(Debug)]
pub(crate) struct ReportOptions {
    pub brands: Vec<String>,
    pub view: View,
    pub watches: Vec<WatchArg>,
    pub notify: bool,
    pub json: bool,
}

/// Load the sheet and print every brand with its row count.
///
/// # Errors
///
/// Returns an error if the sheet cannot be fetched or fails validation.
pub(crate) async fn run_brands(config: &AppConfig) -> anyhow::Result<()> {
    let client = pipeline::build_sheets_client(config)?;
    let mut session = Session::default();
    pipeline::refresh(&mut session, &client, config).await?;
    print!("{}", render::render_brands(&session.brands()?));
    Ok(())
}

/// Render the requested views for the selected brands into one string.
/// [`View::Raw`] ignores the selection and previews the whole sheet.
///
/// # Errors
///
/// Returns an error if nothing has been loaded into `session`.
pub(crate) fn render_views(session: &Session, view: View) -> anyhow::Result<String> {
    if view == View::Raw {
        let records = session.records().ok_or(CoreError::NotLoaded)?;
        return Ok(render::render_raw(session.columns(), records));
    }

    let summaries = session.summaries()?;
    let mut out = String::new();

    if matches!(view, View::Overview | View::All) {
        out.push_str(&render::render_overview(&summaries, session.loaded_at()));
    }
    if matches!(view, View::OutOfStock | View::All) {
        for summary in summaries.values() {
            out.push('\n');
            out.push_str(&render::render_out_of_stock(summary));
        }
    }
    if matches!(view, View::Products | View::All) {
        for brand in summaries.keys() {
            out.push('\n');
            out.push_str(&render::render_products(brand, &session.brand_records(brand)?));
        }
    }
    Ok(out)
}

/// Load the sheet once, print the selected views, and optionally email
/// alerts for watched brands.
///
/// # Errors
///
/// Returns an error if the selection is invalid, the sheet cannot be
/// loaded, `--notify` is used without SMTP configuration, or any alert
/// fails to send.
pub(crate) async fn run_report(config: &AppConfig, options: ReportOptions) -> anyhow::Result<()> {
    let watches = pipeline::load_watch_list(config, &options.watches)?;
    let mut session = Session::new(watches);
    session.select(&options.brands)?;

    // Fail before touching the network when alerts cannot be delivered.
    let mailer = if options.notify {
        let Some(mailer) = pipeline::build_mailer(config)? else {
            anyhow::bail!("--notify requires STOCKWATCH_SMTP_HOST to be configured");
        };
        Some(mailer)
    } else {
        None
    };

    let client = pipeline::build_sheets_client(config)?;
    pipeline::refresh(&mut session, &client, config).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&session.summaries()?)?);
    } else {
        print!("{}", render_views(&session, options.view)?);
    }

    let Some(mailer) = mailer else {
        return Ok(());
    };

    let results = session.notify_watched(&mailer).await?;
    println!();
    print!("{}", render::render_notify_results(&results));

    let failed = results
        .iter()
        .filter(|(_, result)| matches!(result, NotifyResult::Failed(_)))
        .count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} alerts failed to send", results.len());
    }
    Ok(())
}
