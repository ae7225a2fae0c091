use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Manifest envelope version (e.g., "1.0").
const MANIFEST_VERSION: &str = "1.0";

/// Compute SHA-256 etag from compact JSON representation.
pub fn compute_etag(lifecycle: &Value) -> String {
    // Value serialization cannot fail: map keys are always strings.
    let canonical = serde_json::to_string(lifecycle).unwrap_or_default();
    let hash = Sha256::digest(canonical.as_bytes());
    format!("{:x}", hash)
}

/// Wrap a lifecycle export in a manifest envelope.
///
/// `serde_json::Map` is backed by `BTreeMap` (the default when the
/// `preserve_order` feature is not enabled), so keys come out sorted and
/// the etag of a given export is stable.
pub fn build_manifest(lifecycle: Value) -> Value {
    let etag = compute_etag(&lifecycle);
    let mut map = Map::new();
    map.insert(
        "autorenta".to_string(),
        Value::String(MANIFEST_VERSION.to_string()),
    );
    map.insert("etag".to_string(), Value::String(etag));
    map.insert("lifecycle".to_string(), lifecycle);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etag_is_hex_sha256() {
        let etag = compute_etag(&serde_json::json!({}));
        // sha256("{}")
        assert_eq!(
            etag,
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn envelope_wraps_export() {
        let export = serde_json::json!({ "initial": "DRAFT" });
        let manifest = build_manifest(export.clone());
        assert_eq!(manifest["lifecycle"], export);
        assert_eq!(manifest["autorenta"], "1.0");
        assert_eq!(manifest["etag"], compute_etag(&export));
    }
}
