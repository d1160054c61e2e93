//! Diesel schema for users and authentication-provider sessions.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Provider-issued user identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Optional display name.
        #[max_length = 255]
        name -> Nullable<Varchar>,
        /// Lowercased unique email address.
        #[max_length = 320]
        email -> Varchar,
        /// Optional avatar URL.
        image -> Nullable<Text>,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sessions written by the authentication provider.
    sessions (session_token) {
        /// Opaque session token.
        #[max_length = 255]
        session_token -> Varchar,
        /// Owning user.
        #[max_length = 255]
        user_id -> Varchar,
        /// Expiry timestamp.
        expires -> Timestamptz,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, sessions);
