// ⚙️ Settings - catalog and shop options, loaded from JSON
//
// Every field has a default, so a config file only needs what it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::pricing::AddOnPolicy;

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "PETFLOW_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: Catalog,

    #[serde(default)]
    pub add_on: AddOnPolicy,

    /// Shop number for WhatsApp deep links (digits, country code first)
    #[serde(default = "default_whatsapp_phone")]
    pub whatsapp_phone: String,

    /// Pix key shown as a QR code on the payment stage
    #[serde(default = "default_pix_key")]
    pub pix_key: String,
}

fn default_whatsapp_phone() -> String {
    "5511999999999".to_string()
}

fn default_pix_key() -> String {
    "chave-pix-aleatoria-petflow".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            catalog: Catalog::with_defaults(),
            add_on: AddOnPolicy::default(),
            whatsapp_phone: default_whatsapp_phone(),
            pix_key: default_pix_key(),
        }
    }
}

impl Settings {
    /// Load from `PETFLOW_CONFIG` if set, defaults otherwise
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                tracing::debug!("{} not set, using default settings", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a JSON settings file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;

        let settings: Settings =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;
        settings.validate()?;

        tracing::info!(
            path = ?path.as_ref(),
            services = settings.catalog.services().len(),
            employees = settings.catalog.employees().len(),
            "settings loaded"
        );

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.add_on.validate().context("Invalid add-on settings")?;

        if self.whatsapp_phone.trim_start_matches('+').is_empty()
            || !self
                .whatsapp_phone
                .trim_start_matches('+')
                .chars()
                .all(|c| c.is_ascii_digit())
        {
            anyhow::bail!(
                "WhatsApp phone must contain only digits, got {:?}",
                self.whatsapp_phone
            );
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PetSize;
    use std::io::Write;

    fn write_settings(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.catalog.services().len(), 3);
        assert!(settings.add_on.enabled);
        assert_eq!(settings.add_on.fee, 15.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = write_settings(r#"{"add_on": {"fee": 20}}"#);
        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.add_on.fee, 20.0);
        assert!(settings.add_on.enabled);
        assert_eq!(settings.whatsapp_phone, "5511999999999");
        assert_eq!(settings.catalog.services().len(), 3);
    }

    #[test]
    fn test_custom_catalog_from_file() {
        let file = write_settings(
            r#"{
                "catalog": {
                    "services": [
                        {"id": "bath", "name": "Bath", "description": "",
                         "prices": {"small": 30, "medium": 40, "large": 50}}
                    ],
                    "employees": [
                        {"id": "1", "name": "Juliana Silva", "position": "Banhista & Tosadora",
                         "working_hours": "Ter - Sáb, 09:00 - 18:00"}
                    ]
                },
                "add_on": {"enabled": false}
            }"#,
        );
        let settings = Settings::from_file(file.path()).unwrap();

        let bath = settings.catalog.service("bath").unwrap();
        assert_eq!(bath.price_for(PetSize::Medium), 40.0);
        assert!(!settings.add_on.enabled);
    }

    #[test]
    fn test_incomplete_price_table_fails_fast() {
        let file = write_settings(
            r#"{"catalog": {"services": [
                {"id": "bath", "name": "Bath", "description": "",
                 "prices": {"small": 30, "large": 50}}
            ]}}"#,
        );

        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("missing an entry for size Médio"));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let file = write_settings(r#"{"add_on": {"fee": -1}}"#);
        assert!(Settings::from_file(file.path()).is_err());
    }

    #[test]
    fn test_bad_phone_rejected() {
        let file = write_settings(r#"{"whatsapp_phone": "call me"}"#);
        assert!(Settings::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("/nonexistent/petflow.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
