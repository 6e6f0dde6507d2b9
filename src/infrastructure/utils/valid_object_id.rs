use mongodb::bson::oid::ObjectId;

use crate::errors::AppError;

/// Validates if a string is a well-formed ObjectId (24 hex characters)
pub fn valid_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidIdentifier("Invalid ID format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hex_object_ids() {
        let id = ObjectId::new();
        assert_eq!(valid_object_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["", "123", "not-an-object-id", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert!(matches!(valid_object_id(bad), Err(AppError::InvalidIdentifier(_))));
        }
    }
}
