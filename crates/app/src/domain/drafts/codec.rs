//! Draft serialization.
//!
//! Drafts are stored as a versioned JSON envelope:
//!
//! ```json
//! { "version": 1, "draft": { "agency_uuid": "…", "items": [ … ] } }
//! ```
//!
//! Only raw fields are written; points and step predicates are recomputed
//! after decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::drafts::{errors::DraftCodecError, models::OrderDraft};

/// Format version written by [`encode`].
pub const DRAFT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    draft: &'a OrderDraft,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    draft: Value,
}

/// Encode a draft for storage.
///
/// # Errors
///
/// Returns an error if the draft cannot be serialized.
pub fn encode(draft: &OrderDraft) -> Result<String, DraftCodecError> {
    Ok(serde_json::to_string(&EnvelopeRef {
        version: DRAFT_FORMAT_VERSION,
        draft,
    })?)
}

/// Decode a stored draft.
///
/// # Errors
///
/// Returns an error for malformed payloads or an unknown format version.
pub fn decode(payload: &str) -> Result<OrderDraft, DraftCodecError> {
    let envelope: Envelope = serde_json::from_str(payload)?;

    if envelope.version != DRAFT_FORMAT_VERSION {
        return Err(DraftCodecError::UnsupportedVersion(envelope.version));
    }

    Ok(serde_json::from_value(envelope.draft)?)
}
