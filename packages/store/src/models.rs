//! # Domain records held by the data provider
//!
//! These types are `Serialize + Deserialize` so they can be written to the
//! key-value store as JSON and exchanged with the remote document database.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`UserRecord`] | The signed-in user's profile. The default (empty) record means "signed out". `id` is serialised as `uid`, matching the remote `users` documents. |
//! | [`Transaction`] / [`Card`] / [`Bank`] | Opaque records whose shape belongs to the domain SDK. They wrap a JSON value and are persisted verbatim. |
//!
//! [`current_timestamp_ms`] is platform-aware: it uses `js_sys::Date::now()` on
//! the web and `std::time::SystemTime` on native, and seeds the rehydrate token.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile of the authenticated user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Identity-provider user id. Empty for a signed-out record.
    #[serde(rename = "uid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Whether first-time setup has been completed. Unknown until the remote
    /// profile has been checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding: Option<bool>,
}

impl UserRecord {
    /// True for the signed-out record.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The id, if it can scope a fetch.
    pub fn uid(&self) -> Option<&str> {
        (!self.id.is_empty()).then_some(self.id.as_str())
    }

    /// Get display name, falling back to email, then id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Value);

        impl $name {
            /// Read a top-level field of the record.
            pub fn field(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

opaque_record!(
    /// A financial transaction as returned by the domain SDK.
    Transaction
);
opaque_record!(
    /// A payment card as returned by the domain SDK.
    Card
);
opaque_record!(
    /// A linked bank as returned by the domain SDK.
    Bank
);

/// Milliseconds since the Unix epoch.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn current_timestamp_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Milliseconds since the Unix epoch.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn current_timestamp_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_user() {
        let user = UserRecord::default();
        assert!(user.is_empty());
        assert!(user.uid().is_none());

        // Onboarding flag alone still counts as non-empty
        let flagged = UserRecord {
            onboarding: Some(false),
            ..Default::default()
        };
        assert!(!flagged.is_empty());
        assert!(flagged.uid().is_none());
    }

    #[test]
    fn test_user_wire_format() {
        let user = UserRecord {
            id: "g-123".to_string(),
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            avatar: None,
            onboarding: Some(false),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "uid": "g-123",
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "onboarding": false,
            })
        );

        // `{}` is the persisted form of a signed-out user
        let empty: UserRecord = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = UserRecord {
            id: "u1".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "u1");

        user.email = Some("a@b.c".to_string());
        assert_eq!(user.display_name(), "a@b.c");

        user.name = Some("Ada".to_string());
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_opaque_records_are_transparent() {
        let card: Card = serde_json::from_value(json!({"last4": "4242", "brand": "visa"})).unwrap();
        assert_eq!(card.field("last4"), Some(&json!("4242")));
        assert_eq!(
            serde_json::to_value(&card).unwrap(),
            json!({"last4": "4242", "brand": "visa"})
        );
    }

    #[test]
    fn test_timestamp_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(current_timestamp_ms() > 1_577_836_800_000);
    }
}
