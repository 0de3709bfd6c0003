use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::toggle::ToggleResult;
use crate::port::configuration_hand_off::{
    ConfigurationHandOff, ConfigurationStoreError, StoredConfiguration,
};

/// プロセス内に設定を保持するインメモリ実装。
///
/// - 永続化は行わず、プロセス終了とともに破棄される。
/// - ローカル開発やテスト用途を想定。
#[derive(Clone, Default)]
pub struct InMemoryConfigurationStore {
    inner: Arc<Mutex<Option<StoredConfiguration>>>,
}

impl ConfigurationHandOff for InMemoryConfigurationStore {
    fn save(&self, result: &ToggleResult) -> Result<(), ConfigurationStoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| ConfigurationStoreError::Storage(e.to_string()))?;

        *guard = Some(StoredConfiguration::from(result));
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredConfiguration>, ConfigurationStoreError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| ConfigurationStoreError::Storage(e.to_string()))?;

        Ok(guard.clone())
    }
}

/// sled を用いた設定ストア実装。
///
/// - キー: 固定文字列 `"trigger:configuration"`
/// - 値: `StoredConfiguration` の JSON
pub struct SledConfigurationStore {
    db: sled::Db,
}

impl SledConfigurationStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationStoreError> {
        let db = sled::open(path).map_err(|e| ConfigurationStoreError::Storage(e.to_string()))?;
        Ok(Self { db })
    }

    fn sled_key() -> &'static str {
        "trigger:configuration"
    }
}

impl ConfigurationHandOff for SledConfigurationStore {
    fn save(&self, result: &ToggleResult) -> Result<(), ConfigurationStoreError> {
        let value = serde_json::to_vec(&StoredConfiguration::from(result))
            .map_err(|e| ConfigurationStoreError::InvalidData(e.to_string()))?;

        self.db
            .insert(Self::sled_key(), value)
            .map_err(|e| ConfigurationStoreError::Storage(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| ConfigurationStoreError::Storage(e.to_string()))?;

        Ok(())
    }

    fn load(&self) -> Result<Option<StoredConfiguration>, ConfigurationStoreError> {
        let opt = self
            .db
            .get(Self::sled_key())
            .map_err(|e| ConfigurationStoreError::Storage(e.to_string()))?;

        let Some(ivec) = opt else {
            return Ok(None);
        };

        let stored = serde_json::from_slice(ivec.as_ref())
            .map_err(|e| ConfigurationStoreError::InvalidData(e.to_string()))?;
        Ok(Some(stored))
    }
}
