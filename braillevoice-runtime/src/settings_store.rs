use crate::kv::KvStore;
use anyhow::Context;
use braillevoice_core::settings::Settings;
use std::sync::Arc;

pub const SETTINGS_KEY: &str = "appSettings";

/// Typed access to the persisted settings record. Writes merge one key at a
/// time so concurrent known and unknown keys are never disturbed.
#[derive(Clone)]
pub struct SettingsStore {
    store: Arc<dyn KvStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// A corrupted record is treated as absent and removed.
    pub fn load(&self) -> anyhow::Result<Settings> {
        let Some(raw) = self.store.get(SETTINGS_KEY)? else {
            return Ok(Settings::default());
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("discarding malformed settings record: {e}");
                self.store.remove(SETTINGS_KEY)?;
                Ok(Settings::default())
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(settings).context("encode settings JSON")?;
        self.store.set(SETTINGS_KEY, &raw)
    }

    /// Merges a single key into the record, preserving everything else.
    pub fn save_setting(&self, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
        let mut record = self.load_raw()?;
        record.insert(key.to_string(), value);
        let raw = serde_json::to_string_pretty(&serde_json::Value::Object(record))
            .context("encode settings JSON")?;
        self.store.set(SETTINGS_KEY, &raw)
    }

    fn load_raw(&self) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
        let Some(raw) = self.store.get(SETTINGS_KEY)? else {
            return Ok(serde_json::Map::new());
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            _ => Ok(serde_json::Map::new()),
        }
    }
}
