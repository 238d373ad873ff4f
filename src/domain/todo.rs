use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use chrono::Utc;

/// Timestamp format for the created_at column. Lexicographic order on the stored
/// string matches chronological order.
const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A stored todo record
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoItem {
    pub id: i64,
    pub task: String,
    pub completed: bool,
    pub created_at: String,
}

/// Data required to create a new todo
#[cfg_attr(test, derive(Clone))]
pub struct NewTodo {
    pub task: String,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoReader {
        /// Fetches every stored todo, newest first
        async fn all(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;

        async fn todo_by_id(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoItem>, anyhow::Error>;
    }

    pub trait TodoWriter {
        /// Inserts a new incomplete todo, returning its assigned ID
        async fn create(
            &self,
            task: &str,
            created_at: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i64, anyhow::Error>;

        async fn set_completed(
            &self,
            todo_id: i64,
            completed: bool,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        /// Removes the todo with the given ID, returning the number of rows removed
        async fn delete(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<u64, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("The requested todo did not exist.")]
        NotFound,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn list_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;

        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, anyhow::Error>;

        async fn toggle_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<bool, TodoError>;

        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<(), TodoError>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn list_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<TodoItem>, anyhow::Error> {
        let todos = todo_read
            .all(&mut *ext_cxn)
            .await
            .context("listing todos")?;
        Ok(todos)
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, anyhow::Error> {
        let task = new_todo.task.trim();
        let created_at = Utc::now().format(CREATED_AT_FORMAT).to_string();
        let new_id = todo_write
            .create(task, &created_at, &mut *ext_cxn)
            .await
            .context("creating a todo")?;

        Ok(TodoItem {
            id: new_id,
            task: task.to_owned(),
            completed: false,
            created_at,
        })
    }

    async fn toggle_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<bool, driving_ports::TodoError> {
        let current_todo = todo_read
            .todo_by_id(todo_id, &mut *ext_cxn)
            .await
            .context("looking up a todo to toggle")?;
        let Some(todo) = current_todo else {
            return Err(driving_ports::TodoError::NotFound);
        };

        // Read-then-write is unguarded: concurrent toggles of the same row may lose an
        // update, but the stored value is always a valid boolean.
        let now_completed = !todo.completed;
        todo_write
            .set_completed(todo_id, now_completed, &mut *ext_cxn)
            .await
            .context("flipping a todo's completion state")?;

        Ok(now_completed)
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<(), driving_ports::TodoError> {
        let removed_rows = todo_write
            .delete(todo_id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;
        if removed_rows == 0 {
            return Err(driving_ports::TodoError::NotFound);
        }

        Ok(())
    }
}
