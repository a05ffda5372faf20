//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Accounts able to obtain bearer tokens.
    users (id) {
        id -> Int8,
        /// Unique login name (max 50 characters).
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Registered clients.
    clients (id) {
        id -> Int8,
        name -> Varchar,
        date_of_birth -> Date,
        gender -> Varchar,
        contact_info -> Varchar,
    }
}

diesel::table! {
    /// Health programs. `name` carries a unique index.
    programs (id) {
        id -> Int8,
        name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Client/program links with a unique (client_id, program_id) index.
    enrollments (id) {
        id -> Int8,
        client_id -> Int8,
        program_id -> Int8,
    }
}

diesel::joinable!(enrollments -> clients (client_id));
diesel::joinable!(enrollments -> programs (program_id));

diesel::allow_tables_to_appear_in_same_query!(clients, enrollments, programs, users);
