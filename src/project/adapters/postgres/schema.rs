//! Diesel schema for project persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Internal project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional long description.
        description -> Nullable<Text>,
        /// Optional start date.
        start_date -> Nullable<Date>,
        /// Optional end date.
        end_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
