use serde::{Deserialize, Serialize};

/// A registered account as stored in the users record file.
///
/// The username is the identity: unique and compared case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    /// bcrypt digest of the password. Serialized as `password` to stay compatible
    /// with existing record files.
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_record_format() {
        let user = User::new("ana".into(), "$2b$10$abc".into());
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value, json!({ "username": "ana", "password": "$2b$10$abc" }));
    }
}
