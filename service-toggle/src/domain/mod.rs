pub mod payload_codec;
pub mod toggle;
