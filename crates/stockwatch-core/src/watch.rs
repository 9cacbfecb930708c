use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoreError};

/// When a watch's `already_notified` flag is cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// A new (different) notification address re-arms the alert.
    #[default]
    OnEmailChange,
    /// One alert per brand for the whole session.
    Never,
}

impl std::fmt::Display for ResetPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetPolicy::OnEmailChange => write!(f, "on-email-change"),
            ResetPolicy::Never => write!(f, "never"),
        }
    }
}

impl std::str::FromStr for ResetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-email-change" => Ok(ResetPolicy::OnEmailChange),
            "never" => Ok(ResetPolicy::Never),
            other => Err(format!(
                "unknown reset policy '{other}'; expected 'on-email-change' or 'never'"
            )),
        }
    }
}

/// A brand the user has registered interest in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandWatch {
    pub brand: String,
    pub notification_email: Option<String>,
    pub already_notified: bool,
}

impl BrandWatch {
    /// Creates a fresh watch. A blank email is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyBrand`] for a blank brand name and
    /// [`CoreError::InvalidEmail`] for an address without an `@`.
    pub fn new(brand: &str, email: Option<&str>) -> Result<Self, CoreError> {
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(CoreError::EmptyBrand);
        }
        Ok(Self {
            brand: brand.to_string(),
            notification_email: normalize_email(brand, email)?,
            already_notified: false,
        })
    }

    /// Replaces the notification address. Returns `true` when the address
    /// actually changed; under [`ResetPolicy::OnEmailChange`] that also
    /// clears `already_notified`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEmail`] for an address without an `@`.
    pub fn set_email(
        &mut self,
        email: Option<&str>,
        policy: ResetPolicy,
    ) -> Result<bool, CoreError> {
        let email = normalize_email(&self.brand, email)?;
        if email == self.notification_email {
            return Ok(false);
        }
        self.notification_email = email;
        if policy == ResetPolicy::OnEmailChange {
            self.already_notified = false;
        }
        Ok(true)
    }
}

fn normalize_email(brand: &str, email: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(CoreError::InvalidEmail {
            brand: brand.to_string(),
            email: email.to_string(),
        });
    }
    Ok(Some(email.to_string()))
}

/// The watched brands of one session, in registration order.
#[derive(Debug, Clone, Default)]
pub struct WatchList {
    policy: ResetPolicy,
    watches: Vec<BrandWatch>,
}

impl WatchList {
    #[must_use]
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            policy,
            watches: Vec::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Registers a brand, or updates the address of an existing watch.
    ///
    /// Re-registering with the same address, or with no address at all,
    /// leaves the existing watch untouched.
    ///
    /// # Errors
    ///
    /// See [`BrandWatch::new`].
    pub fn register(
        &mut self,
        brand: &str,
        email: Option<&str>,
    ) -> Result<&BrandWatch, CoreError> {
        let policy = self.policy;
        if let Some(pos) = self.position(brand) {
            let watch = &mut self.watches[pos];
            let email = email.filter(|e| !e.trim().is_empty());
            if email.is_some() && watch.set_email(email, policy)? {
                tracing::info!(
                    brand = %watch.brand,
                    already_notified = watch.already_notified,
                    "notification email changed"
                );
            }
            return Ok(&self.watches[pos]);
        }

        let watch = BrandWatch::new(brand, email)?;
        tracing::info!(
            brand = %watch.brand,
            has_email = watch.notification_email.is_some(),
            "brand watch registered"
        );
        self.watches.push(watch);
        Ok(&self.watches[self.watches.len() - 1])
    }

    pub fn remove(&mut self, brand: &str) -> Option<BrandWatch> {
        let pos = self.position(brand)?;
        Some(self.watches.remove(pos))
    }

    #[must_use]
    pub fn get(&self, brand: &str) -> Option<&BrandWatch> {
        self.position(brand).map(|pos| &self.watches[pos])
    }

    pub fn get_mut(&mut self, brand: &str) -> Option<&mut BrandWatch> {
        self.position(brand).map(|pos| &mut self.watches[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrandWatch> {
        self.watches.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BrandWatch> {
        self.watches.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Drops every watch, including notification flags.
    pub fn clear(&mut self) {
        self.watches.clear();
    }

    /// Watch brands are stored trimmed, so lookups trim too.
    fn position(&self, brand: &str) -> Option<usize> {
        let brand = brand.trim();
        self.watches.iter().position(|w| w.brand == brand)
    }
}

/// One entry of the watch seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSeed {
    pub brand: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WatchesFile {
    #[serde(default)]
    pub watches: Vec<WatchSeed>,
}

impl WatchesFile {
    /// Seeds a watch list from this file.
    ///
    /// # Errors
    ///
    /// Propagates [`CoreError`] from registration; entries are validated by
    /// [`load_watches`] beforehand, so this only fails for hand-built files.
    pub fn into_watch_list(self, policy: ResetPolicy) -> Result<WatchList, CoreError> {
        let mut list = WatchList::new(policy);
        for seed in &self.watches {
            list.register(&seed.brand, seed.email.as_deref())?;
        }
        Ok(list)
    }
}

/// Load and validate the watch seed file.
///
/// When `required` is `false` a missing file yields an empty list.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_watches(path: &Path, required: bool) -> Result<WatchesFile, ConfigError> {
    if !required && !path.exists() {
        tracing::debug!(
            path = %path.display(),
            "no watches file; starting with an empty watch list"
        );
        return Ok(WatchesFile {
            watches: Vec::new(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let watches_file: WatchesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::WatchesFileParse)?;

    validate_watches(&watches_file)?;

    Ok(watches_file)
}

fn validate_watches(watches_file: &WatchesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for seed in &watches_file.watches {
        let brand = seed.brand.trim();
        if brand.is_empty() {
            return Err(ConfigError::Validation(
                "watch brand must be non-empty".to_string(),
            ));
        }

        if !seen.insert(brand) {
            return Err(ConfigError::Validation(format!(
                "duplicate watch for brand '{brand}'"
            )));
        }

        if let Err(e) = normalize_email(brand, seed.email.as_deref()) {
            return Err(ConfigError::Validation(e.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "watch_test.rs"]
mod tests;
