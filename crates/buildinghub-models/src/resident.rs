//! Residents fetched from the backend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of a resident as returned by the residents listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "phone")]
    pub phone_number: String,
    pub room_number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_phone_alias() {
        let json = r#"{
            "id": "6f1c2a8e-8d7b-4a53-9c44-0d6b1f4f2e10",
            "fullName": "Trần Thị B",
            "email": "b@example.com",
            "phone": "0909000000",
            "roomNumber": 1202
        }"#;
        let resident: Resident = serde_json::from_str(json).unwrap();
        assert_eq!(resident.full_name, "Trần Thị B");
        assert_eq!(resident.phone_number, "0909000000");
        assert_eq!(resident.room_number, 1202);
    }

    #[test]
    fn test_missing_room_number_is_an_error() {
        let json = r#"{"id": "6f1c2a8e-8d7b-4a53-9c44-0d6b1f4f2e10", "fullName": "X"}"#;
        assert!(serde_json::from_str::<Resident>(json).is_err());
    }
}
