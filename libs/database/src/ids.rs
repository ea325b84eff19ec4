//! Parsing of caller-supplied record identifiers.
//!
//! External callers hand identifiers around as opaque strings; internally the
//! store keys every document by `ObjectId`. Parsing is the first step of
//! every directory operation that takes an id, so a garbled id fails here,
//! before any lookup runs.

use mongodb::bson::oid::ObjectId;

/// A caller-supplied identifier that could not be parsed into the store's
/// internal `ObjectId` form.
///
/// Deliberately distinct from any "not found" error: a malformed id never
/// reaches the store, while "not found" means a well-formed id matched no
/// document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed identifier: '{0}'")]
pub struct MalformedIdentifier(pub String);

/// Parse an external string identifier into an [`ObjectId`].
pub fn parse_oid(raw: &str) -> Result<ObjectId, MalformedIdentifier> {
    ObjectId::parse_str(raw).map_err(|_| MalformedIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_hex() {
        let id = parse_oid("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_parse_roundtrips_generated_id() {
        let id = ObjectId::new();
        assert_eq!(parse_oid(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_oid("not-an-id").unwrap_err();
        assert_eq!(err, MalformedIdentifier("not-an-id".to_string()));
    }

    #[test]
    fn test_parse_rejects_truncated_hex() {
        assert!(parse_oid("507f1f77bcf86cd79943901").is_err());
        assert!(parse_oid("").is_err());
    }
}
