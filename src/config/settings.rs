//! User settings for tally-cli
//!
//! Manages user preferences: the reference currency and any exchange rate
//! overrides the rate table is built from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::models::{Currency, CurrencyTable};
use crate::storage::file_io::{read_json, write_json_atomic};

use super::paths::TallyPaths;

/// User settings for tally-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The currency all rates are expressed against (rate 1.0)
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,

    /// Exchange rates relative to the reference currency; merged over the
    /// built-in seed table
    #[serde(default)]
    pub currency_rates: HashMap<String, f64>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_reference_currency() -> String {
    CurrencyTable::DEFAULT_REFERENCE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reference_currency: default_reference_currency(),
            currency_rates: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, creating the file with defaults if missing
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let path = paths.settings_file();
        if path.exists() {
            read_json(&path)
        } else {
            let settings = Self::default();
            paths.ensure_directories()?;
            write_json_atomic(&path, &settings)?;
            Ok(settings)
        }
    }

    /// Build the rate table this session runs with
    ///
    /// Overrides from the settings file are layered over the seed rates when
    /// the reference currency is the default one; a custom reference starts
    /// from a clean table.
    pub fn rate_table(&self) -> CurrencyTable {
        let reference = Currency::new(&self.reference_currency);
        let mut rates: HashMap<Currency, f64> =
            if self.reference_currency == CurrencyTable::DEFAULT_REFERENCE {
                CurrencyTable::seeded()
                    .rates()
                    .map(|(c, r)| (c.clone(), r))
                    .collect()
            } else {
                HashMap::new()
            };
        for (code, rate) in &self.currency_rates {
            rates.insert(Currency::new(code), *rate);
        }
        CurrencyTable::new(reference, rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.reference_currency, "SGD");
        assert!(paths.settings_file().exists());

        // second load reads the file it just wrote
        let again = Settings::load_or_create(&paths).unwrap();
        assert_eq!(again.schema_version, settings.schema_version);
    }

    #[test]
    fn test_default_rate_table_matches_seed() {
        let table = Settings::default().rate_table();
        assert_eq!(
            table.convert(
                Money::from_units(1000),
                &Currency::new("SGD"),
                &Currency::new("MYR")
            ),
            Money::from_cents(303000)
        );
    }

    #[test]
    fn test_rate_overrides_are_layered() {
        let mut settings = Settings::default();
        settings.currency_rates.insert("JPY".to_string(), 110.0);
        let table = settings.rate_table();

        assert!(table.supports(&Currency::new("JPY")));
        assert!(table.supports(&Currency::new("MYR")));
        assert_eq!(
            table.from_reference(Money::from_units(1), &Currency::new("JPY")),
            Money::from_units(110)
        );
    }
}
