// Weak entity tags for dev server responses

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const HASH_LEN: usize = 27;

/// Compute a weak ETag: `W/"<byte length in hex>-<truncated base64 blake3>"`
pub fn weak_etag(content: &str) -> String {
    let hash = blake3::hash(content.as_bytes());
    let encoded = STANDARD.encode(hash.as_bytes());

    format!("W/\"{:x}-{}\"", content.len(), &encoded[..HASH_LEN])
}
