//! `PostgreSQL` store implementation for tasks and subtasks.

use super::{
    models::{NewSubtaskRow, NewTaskRow, SubtaskChangeset, SubtaskRow, TaskChangeset, TaskRow},
    schema::{subtasks, tasks},
};
use crate::task::{
    domain::{
        PersistedSubtaskData, PersistedTaskData, RecordId, Subtask, SubtaskId, Task, TaskId,
        TaskWithSubtasks,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the task board tables.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_tasks/up.sql");

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it in a store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the pool cannot open its
    /// initial connections.
    pub fn connect(database_url: &str, max_size: u32) -> TaskStoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(TaskStoreError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the task board tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the DDL fails.
    pub async fn sync_schema(&self) -> TaskStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateRecord(RecordId::Task(task_id))
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn insert_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()> {
        let subtask_id = subtask.id();
        let task_id = subtask.task_id();
        let new_row = to_new_subtask_row(subtask);

        self.run_blocking(move |connection| {
            // The foreign key decides parent existence atomically with the
            // insert, so a concurrent parent delete cannot leave an orphan.
            diesel::insert_into(subtasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskStoreError::NotFound(RecordId::Task(task_id))
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateRecord(RecordId::Subtask(subtask_id))
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_tasks(&self) -> TaskStoreResult<Vec<TaskWithSubtasks>> {
        self.run_blocking(|connection| {
            let task_rows = tasks::table
                .order(tasks::seq.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            let subtask_rows = SubtaskRow::belonging_to(&task_rows)
                .order(subtasks::seq.asc())
                .select(SubtaskRow::as_select())
                .load::<SubtaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            let grouped = subtask_rows.grouped_by(&task_rows);

            Ok(task_rows
                .into_iter()
                .zip(grouped)
                .map(|(task_row, children)| {
                    TaskWithSubtasks::new(
                        row_to_task(task_row),
                        children.into_iter().map(row_to_subtask).collect(),
                    )
                })
                .collect())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn find_subtask(&self, id: SubtaskId) -> TaskStoreResult<Option<Subtask>> {
        self.run_blocking(move |connection| {
            let row = subtasks::table
                .find(id.into_inner())
                .select(SubtaskRow::as_select())
                .first::<SubtaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            Ok(row.map(row_to_subtask))
        })
        .await
    }

    async fn list_subtasks(&self, task_id: TaskId) -> TaskStoreResult<Vec<Subtask>> {
        self.run_blocking(move |connection| {
            let rows = subtasks::table
                .filter(subtasks::task_id.eq(task_id.into_inner()))
                .order(subtasks::seq.asc())
                .select(SubtaskRow::as_select())
                .load::<SubtaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(rows.into_iter().map(row_to_subtask).collect())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> TaskStoreResult<()> {
        let id = task.id();
        let changeset = TaskChangeset {
            title: task.title().to_owned(),
            deadline: task.deadline(),
            completed: task.completed(),
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(RecordId::Task(id)));
            }
            Ok(())
        })
        .await
    }

    async fn update_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()> {
        let id = subtask.id();
        let changeset = SubtaskChangeset {
            title: subtask.title().to_owned(),
            deadline: subtask.deadline(),
            completed: subtask.completed(),
            updated_at: subtask.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected = diesel::update(subtasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(RecordId::Subtask(id)));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            // Subtasks go with the parent via ON DELETE CASCADE.
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(RecordId::Task(id)));
            }
            Ok(())
        })
        .await
    }

    async fn delete_subtask(&self, id: SubtaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(subtasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(RecordId::Subtask(id)));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        deadline: task.deadline(),
        completed: task.completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_new_subtask_row(subtask: &Subtask) -> NewSubtaskRow {
    NewSubtaskRow {
        id: subtask.id().into_inner(),
        task_id: subtask.task_id().into_inner(),
        title: subtask.title().to_owned(),
        deadline: subtask.deadline(),
        completed: subtask.completed(),
        created_at: subtask.created_at(),
        updated_at: subtask.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        title,
        deadline,
        completed,
        created_at,
        updated_at,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        deadline,
        completed,
        created_at,
        updated_at,
    })
}

fn row_to_subtask(row: SubtaskRow) -> Subtask {
    let SubtaskRow {
        id,
        task_id,
        title,
        deadline,
        completed,
        created_at,
        updated_at,
    } = row;

    Subtask::from_persisted(PersistedSubtaskData {
        id: SubtaskId::from_uuid(id),
        task_id: TaskId::from_uuid(task_id),
        title,
        deadline,
        completed,
        created_at,
        updated_at,
    })
}
