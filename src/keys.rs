//! Cache key derivation
//!
//! Builds one stable key from a group of source identifiers, e.g. the file
//! URLs that were merged into a single PDF.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Separator between escaped identifiers. Escaping guarantees it never
/// appears inside one.
pub const KEY_SEPARATOR: &str = "|";

/// Derives an order-independent key from `ids`.
///
/// Identifiers are sorted, percent-encoded, joined with [`KEY_SEPARATOR`] and
/// base64 encoded with the URL-safe alphabet, so the key can sit in a URL
/// path segment. Duplicates are kept: `["a", "a"]` and `["a"]` differ.
pub fn derive_key<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<String> = ids.into_iter().map(|id| id.as_ref().to_owned()).collect();
    sorted.sort_unstable();

    let joined = sorted
        .iter()
        .map(|id| urlencoding::encode(id))
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR);

    URL_SAFE_NO_PAD.encode(joined.as_bytes())
}
