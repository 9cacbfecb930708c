//! Out-of-stock alert policy.
//!
//! [`maybe_notify`] decides whether a watched brand gets an alert for the
//! current summary, composes it, and hands it to a [`MailSender`]. The
//! watch's `already_notified` flag is only set after a successful send, so a
//! transport failure leaves the alert armed for the next pass.

use std::fmt::Write as _;
use std::future::Future;

use crate::aggregate::BrandSummary;
use crate::watch::BrandWatch;
use crate::TransportError;

/// A composed alert ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers alerts. Implemented by the SMTP mailer and by test doubles.
pub trait MailSender {
    fn send(&self, mail: &AlertEmail) -> impl Future<Output = Result<(), TransportError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoEmail,
    NothingOutOfStock,
    AlreadyNotified,
    /// The summary belongs to a different brand than the watch.
    BrandMismatch,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoEmail => write!(f, "no notification email"),
            SkipReason::NothingOutOfStock => write!(f, "nothing out of stock"),
            SkipReason::AlreadyNotified => write!(f, "already notified"),
            SkipReason::BrandMismatch => write!(f, "summary is for a different brand"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyResult {
    Sent,
    Skipped(SkipReason),
    Failed(TransportError),
}

impl std::fmt::Display for NotifyResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyResult::Sent => write!(f, "sent"),
            NotifyResult::Skipped(reason) => write!(f, "skipped ({reason})"),
            NotifyResult::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Builds the alert for `summary` addressed to `to`: one line per
/// out-of-stock product with its pack and discounted price.
#[must_use]
pub fn compose_alert(summary: &BrandSummary, to: &str) -> AlertEmail {
    let count = summary.out_of_stock_rows.len();
    let noun = if count == 1 { "product" } else { "products" };
    let subject = format!(
        "Stock alert: {count} {} {noun} out of stock",
        summary.brand
    );

    let mut body = format!(
        "The following {} products are currently unavailable:\n\n",
        summary.brand
    );
    for row in &summary.out_of_stock_rows {
        // Writing to a String cannot fail.
        let _ = writeln!(
            body,
            "- {} | Pack: {} | Discounted Price: {}",
            row.product, row.pack, row.discounted_price
        );
    }
    let _ = write!(
        body,
        "\n{} of {} {} products are out of stock.\n",
        summary.out_of_stock, summary.total, summary.brand
    );

    AlertEmail {
        to: to.to_string(),
        subject,
        body,
    }
}

/// Sends an out-of-stock alert for `watch` if its policy allows it.
///
/// Skips when the watch has no address, nothing is out of stock, or the
/// watch was already notified. On a successful send the watch is marked as
/// notified; on failure it is left untouched.
pub async fn maybe_notify<S: MailSender>(
    summary: &BrandSummary,
    watch: &mut BrandWatch,
    sender: &S,
) -> NotifyResult {
    if summary.brand != watch.brand {
        return NotifyResult::Skipped(SkipReason::BrandMismatch);
    }
    let Some(address) = watch.notification_email.as_deref() else {
        return NotifyResult::Skipped(SkipReason::NoEmail);
    };
    if summary.out_of_stock == 0 {
        return NotifyResult::Skipped(SkipReason::NothingOutOfStock);
    }
    if watch.already_notified {
        return NotifyResult::Skipped(SkipReason::AlreadyNotified);
    }

    let mail = compose_alert(summary, address);
    match sender.send(&mail).await {
        Ok(()) => {
            tracing::info!(
                brand = %summary.brand,
                to = %mail.to,
                out_of_stock = summary.out_of_stock,
                "out-of-stock alert sent"
            );
            watch.already_notified = true;
            NotifyResult::Sent
        }
        Err(e) => {
            tracing::warn!(brand = %summary.brand, error = %e, "out-of-stock alert failed");
            NotifyResult::Failed(e)
        }
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
