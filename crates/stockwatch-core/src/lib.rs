pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod error;
pub mod notify;
pub mod records;
pub mod session;
pub mod watch;

pub use aggregate::{distinct_brands, summarize, BrandCount, BrandSummary};
pub use app_config::{AppConfig, Environment, SmtpConfig, SmtpTls};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError, SchemaError, TransportError};
pub use notify::{compose_alert, maybe_notify, AlertEmail, MailSender, NotifyResult, SkipReason};
pub use records::{ColumnIndex, ProductRecord, StockStatus, REQUIRED_COLUMNS};
pub use session::{Session, MAX_SELECTED_BRANDS};
pub use watch::{load_watches, BrandWatch, ResetPolicy, WatchList, WatchSeed, WatchesFile};
