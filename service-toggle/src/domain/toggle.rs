use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// トリガー元と受け渡しする不透明なキー・バリュー束。
///
/// 中身の解釈は `payload_codec` だけが行う。未知のキーは保持されるが無視される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueBundle(Map<String, Value>);

impl OpaqueBundle {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// 任意の JSON 値から束を作る。オブジェクト以外は空の束として扱う。
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for OpaqueBundle {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// 単一のスイッチ状態を持つ設定。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPayload {
    switch_state: bool,
}

impl ConfigPayload {
    pub fn new(switch_state: bool) -> Self {
        Self { switch_state }
    }

    pub fn switch_state(&self) -> bool {
        self.switch_state
    }
}

/// トリガー元から届く通知。束が無い場合は空の束と同じ扱いになる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleEvent {
    pub bundle: Option<OpaqueBundle>,
}

impl ToggleEvent {
    pub fn new(bundle: Option<OpaqueBundle>) -> Self {
        Self { bundle }
    }

    pub fn with_bundle(bundle: OpaqueBundle) -> Self {
        Self {
            bundle: Some(bundle),
        }
    }

    pub fn empty() -> Self {
        Self { bundle: None }
    }
}

/// 設定画面のスイッチ状態。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub checked: bool,
}

/// 設定確定時の出力。説明文と送り返す束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleResult {
    pub description: String,
    pub bundle: OpaqueBundle,
}

/// サービスに対して発行されるコマンド。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCommand {
    Start,
    Stop,
}

impl From<ConfigPayload> for ServiceCommand {
    fn from(payload: ConfigPayload) -> Self {
        if payload.switch_state() {
            ServiceCommand::Start
        } else {
            ServiceCommand::Stop
        }
    }
}

/// サービス起動・停止に明示的に渡す実行コンテキスト。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceContext {
    /// ログ出力に使うサービス名
    pub service_name: String,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

#[cfg(test)]
mod toggle_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_value_becomes_empty_bundle() {
        assert!(OpaqueBundle::from_value(json!(true)).is_empty());
        assert!(OpaqueBundle::from_value(json!([1, 2])).is_empty());
        assert!(OpaqueBundle::from_value(Value::Null).is_empty());
    }

    #[test]
    fn object_value_keeps_all_keys() {
        let bundle = OpaqueBundle::from_value(json!({"switch_state": true, "other": 1}));
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("other"), Some(&json!(1)));
    }

    #[test]
    fn payload_maps_to_command() {
        assert_eq!(
            ServiceCommand::from(ConfigPayload::new(true)),
            ServiceCommand::Start
        );
        assert_eq!(
            ServiceCommand::from(ConfigPayload::new(false)),
            ServiceCommand::Stop
        );
    }

    #[test]
    fn bundle_serializes_as_plain_object() {
        let mut bundle = OpaqueBundle::new();
        bundle.insert("switch_state", json!(false));
        let text = serde_json::to_string(&bundle).unwrap();
        assert_eq!(text, r#"{"switch_state":false}"#);
    }
}
