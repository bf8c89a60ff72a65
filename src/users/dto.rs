use serde::Deserialize;

use crate::users::repo::User;

/// Partial-update payload: only keys present in the request are applied,
/// everything else keeps its stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub mobile_number: Option<String>,
}

impl UpdateUserRequest {
    pub fn apply_to(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(mobile_number) = self.mobile_number {
            user.mobile_number = mobile_number;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn stored_user() -> User {
        User {
            id: 7,
            first_name: "yamajala".into(),
            last_name: "madhumitha".into(),
            email: "madhu@example.com".into(),
            password: "Welcome@1234".into(),
            mobile_number: "9012390123".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn absent_keys_deserialize_to_none() {
        let payload: UpdateUserRequest =
            serde_json::from_str(r#"{"first_name": "UpdatedFirstName"}"#).unwrap();
        assert_eq!(payload.first_name.as_deref(), Some("UpdatedFirstName"));
        assert!(payload.last_name.is_none());
        assert!(payload.email.is_none());
        assert!(payload.password.is_none());
        assert!(payload.mobile_number.is_none());
    }

    #[test]
    fn apply_changes_only_present_fields() {
        let mut user = stored_user();
        let payload: UpdateUserRequest =
            serde_json::from_str(r#"{"first_name": "UpdatedFirstName"}"#).unwrap();
        payload.apply_to(&mut user);

        assert_eq!(user.first_name, "UpdatedFirstName");
        assert_eq!(user.last_name, "madhumitha");
        assert_eq!(user.email, "madhu@example.com");
        assert_eq!(user.mobile_number, "9012390123");
    }

    #[test]
    fn empty_payload_changes_nothing() {
        let mut user = stored_user();
        let payload: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        payload.apply_to(&mut user);

        assert_eq!(user.first_name, "yamajala");
        assert_eq!(user.email, "madhu@example.com");
        assert_eq!(user.password, "Welcome@1234");
    }
}
