mod post;
mod reaction;
mod user;

pub use post::*;
pub use reaction::{ReactionKind, Reactions};
pub use user::{User, UserId};

use serde::{Deserialize, Deserializer};

/// Helper to deserialize a post id as either string or integer, keeping
/// whichever form the server used
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<PostId, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = PostId;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<PostId, E>
        where
            E: de::Error,
        {
            Ok(PostId::Text(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<PostId, E>
        where
            E: de::Error,
        {
            Ok(PostId::Text(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<PostId, E>
        where
            E: de::Error,
        {
            Ok(match u64::try_from(value) {
                Ok(id) => PostId::Num(id),
                Err(_) => PostId::Text(value.to_string()),
            })
        }

        fn visit_u64<E>(self, value: u64) -> Result<PostId, E>
        where
            E: de::Error,
        {
            Ok(PostId::Num(value))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Deserialize a user id that the server may send as a number or as a
/// numeric string (form inputs are echoed back as text).
pub(crate) fn deserialize_user_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct UserIdVisitor;

    impl<'de> Visitor<'de> for UserIdVisitor {
        type Value = UserId;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer or numeric string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<UserId, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<UserId, E>
        where
            E: de::Error,
        {
            UserId::try_from(value)
                .map_err(|_| E::custom(format!("negative user id: {}", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<UserId, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse::<UserId>()
                .map_err(|_| E::custom(format!("invalid user id: {:?}", value)))
        }
    }

    deserializer.deserialize_any(UserIdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct IdHolder {
        #[serde(deserialize_with = "deserialize_id")]
        id: PostId,
    }

    #[derive(Debug, Deserialize)]
    struct UserIdHolder {
        #[serde(deserialize_with = "deserialize_user_id")]
        user_id: UserId,
    }

    #[test]
    fn test_deserialize_id_accepts_string_and_integer() {
        let from_str: IdHolder = serde_json::from_str(r#"{"id": "abc-1"}"#).unwrap();
        assert_eq!(from_str.id, PostId::Text("abc-1".to_string()));

        let from_int: IdHolder = serde_json::from_str(r#"{"id": 101}"#).unwrap();
        assert_eq!(from_int.id, PostId::Num(101));

        let numeric_text: IdHolder = serde_json::from_str(r#"{"id": "101"}"#).unwrap();
        assert_ne!(numeric_text.id, from_int.id);
    }

    #[test]
    fn test_deserialize_user_id_coerces_numeric_string() {
        let holder: UserIdHolder = serde_json::from_str(r#"{"user_id": "3"}"#).unwrap();
        assert_eq!(holder.user_id, 3);

        let holder: UserIdHolder = serde_json::from_str(r#"{"user_id": 7}"#).unwrap();
        assert_eq!(holder.user_id, 7);
    }

    #[test]
    fn test_deserialize_user_id_rejects_garbage() {
        assert!(serde_json::from_str::<UserIdHolder>(r#"{"user_id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<UserIdHolder>(r#"{"user_id": -1}"#).is_err());
    }
}
