//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional long description.
        description -> Nullable<Text>,
        /// Canonical status value.
        #[max_length = 20]
        status -> Varchar,
        /// Canonical priority value.
        #[max_length = 20]
        priority -> Varchar,
        /// Free-form tags.
        tags -> Nullable<Text>,
        /// Optional start date.
        start_date -> Nullable<Date>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Optional story points.
        points -> Nullable<Int4>,
        /// Author user identifier.
        #[max_length = 255]
        author_user_id -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Assignment links between tasks and users.
    task_assignees (task_id, user_id) {
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned user.
        #[max_length = 255]
        user_id -> Varchar,
    }
}

diesel::joinable!(task_assignees -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_assignees);
