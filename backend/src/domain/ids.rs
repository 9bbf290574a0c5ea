//! Integer primary keys for the persisted entities.
//!
//! Each table uses a `SERIAL` key. The newtypes keep a post id from being
//! passed where a user id is expected; they serialise as bare integers.

use std::fmt;

macro_rules! define_entity_id {
    (
        $(#[$outer:meta])*
        $name:ident
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw primary key value.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Return the raw primary key value.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id! {
    /// Primary key of a `user` row.
    UserId
}

define_entity_id! {
    /// Primary key of a `post` row.
    PostId
}

define_entity_id! {
    /// Primary key of a `media` row.
    MediaId
}

define_entity_id! {
    /// Primary key of a `comment` row.
    CommentId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_serialise_as_plain_integers() {
        let value = serde_json::to_value(UserId::new(7)).expect("serialise id");
        assert_eq!(value, serde_json::json!(7));

        let parsed: PostId = serde_json::from_value(serde_json::json!(12)).expect("parse id");
        assert_eq!(parsed, PostId::new(12));
    }

    #[rstest]
    fn ids_order_by_raw_value() {
        let mut ids = vec![CommentId::new(3), CommentId::new(1), CommentId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![CommentId::new(1), CommentId::new(2), CommentId::new(3)]);
    }
}
