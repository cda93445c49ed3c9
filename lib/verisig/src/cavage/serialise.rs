use super::SignatureHeader;
use std::fmt::Write;

/// Serialise a signature header into its wire form
///
/// `keyId="…",algorithm="…",headers="…",signature="…"`
#[inline]
#[must_use]
pub fn serialise(header: &SignatureHeader<'_>) -> String {
    let mut buffer = String::new();

    let _ = write!(
        buffer,
        "keyId=\"{}\",algorithm=\"{}\",headers=\"{}\",signature=\"{}\"",
        header.key_id, header.algorithm, header.headers, header.signature,
    );

    buffer
}
