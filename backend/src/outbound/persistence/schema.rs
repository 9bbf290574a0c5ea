//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered users. `username` and `email` carry unique constraints.
    user (id) {
        id -> Int4,
        /// Unique handle (`user_username_key`).
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 50]
        firstname -> Varchar,
        #[max_length = 50]
        lastname -> Varchar,
        /// Unique address (`user_email_key`).
        #[max_length = 120]
        email -> Varchar,
        /// Opaque password hash; never serialised.
        password -> Varchar,
        is_active -> Bool,
    }
}

diesel::table! {
    /// Directed follower edges keyed by `(user_from_id, user_to_id)`.
    follower (user_from_id, user_to_id) {
        user_from_id -> Int4,
        user_to_id -> Int4,
    }
}

diesel::table! {
    /// Posts owned by a single user.
    post (id) {
        id -> Int4,
        user_id -> Int4,
    }
}

diesel::table! {
    /// Media attached to posts. `type` is checked against the three literals.
    media (id) {
        id -> Int4,
        #[sql_name = "type"]
        #[max_length = 5]
        kind -> Varchar,
        #[max_length = 255]
        url -> Varchar,
        post_id -> Int4,
    }
}

diesel::table! {
    /// Comments written by a user on a post.
    comment (id) {
        id -> Int4,
        comment_text -> Text,
        author_id -> Int4,
        post_id -> Int4,
    }
}

diesel::joinable!(post -> user (user_id));
diesel::joinable!(media -> post (post_id));
diesel::joinable!(comment -> post (post_id));
diesel::joinable!(comment -> user (author_id));

diesel::allow_tables_to_appear_in_same_query!(user, follower, post, media, comment);
