pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{SheetsAuth, SheetsClient};
pub use error::SheetsError;
pub use normalize::{table_from_values, SheetTable};
pub use types::ValueRange;
