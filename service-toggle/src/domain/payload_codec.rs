//! `ConfigPayload` と `OpaqueBundle` の相互変換。
//!
//! 束の緩い型付けを扱うのはこのモジュールだけにする。

use serde_json::Value;

use super::toggle::{ConfigPayload, OpaqueBundle};

/// 保存済みの束との互換のため変更しないこと。
pub const SWITCH_STATE_KEY: &str = "switch_state";

/// 束からスイッチ状態を読み出す。
///
/// 束が無い、キーが無い、値が真偽値でない場合はいずれも `false` になる。
pub fn decode(bundle: Option<&OpaqueBundle>) -> ConfigPayload {
    let switch_state = bundle
        .and_then(|b| b.get(SWITCH_STATE_KEY))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    ConfigPayload::new(switch_state)
}

pub fn encode(payload: ConfigPayload) -> OpaqueBundle {
    let mut bundle = OpaqueBundle::new();
    bundle.insert(SWITCH_STATE_KEY, Value::Bool(payload.switch_state()));
    bundle
}
