//! Diesel schema for task board persistence.

diesel::table! {
    /// Top-level task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Insertion sequence used for ordering.
        seq -> Int8,
        /// Task title.
        title -> Text,
        /// Task deadline.
        deadline -> Timestamptz,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Subtask records; `task_id` cascades on parent deletion.
    subtasks (id) {
        /// Subtask identifier.
        id -> Uuid,
        /// Insertion sequence used for ordering.
        seq -> Int8,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Subtask title.
        title -> Text,
        /// Subtask deadline.
        deadline -> Timestamptz,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(subtasks -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, subtasks);
