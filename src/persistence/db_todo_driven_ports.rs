use crate::domain;
use crate::domain::todo::TodoItem;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::FromRow;

pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoRow {
    id: i64,
    task: String,
    completed: bool,
    created_at: String,
}

impl From<TodoRow> for TodoItem {
    fn from(value: TodoRow) -> Self {
        TodoItem {
            id: value.id,
            task: value.task,
            completed: value.completed,
            created_at: value.created_at,
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn
            .database_cxn()
            .await
            .context("acquiring a connection to list todos")?;

        let todos: Vec<TodoItem> = sqlx::query_as::<_, TodoRow>(
            "SELECT id, task, completed, created_at FROM todos ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch the stored todos")?
        .into_iter()
        .map(TodoItem::from)
        .collect();

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoItem>, Error> {
        let mut cxn = ext_cxn
            .database_cxn()
            .await
            .context("acquiring a connection to look up a todo")?;

        let todo: Option<TodoItem> = sqlx::query_as::<_, TodoRow>(
            "SELECT id, task, completed, created_at FROM todos WHERE id = ?",
        )
        .bind(todo_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a todo by ID")?
        .map(TodoItem::from);

        Ok(todo)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create(
        &self,
        task: &str,
        created_at: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i64, Error> {
        let mut cxn = ext_cxn
            .database_cxn()
            .await
            .context("acquiring a connection to create a todo")?;

        let new_id: super::NewId = sqlx::query_as(
            "INSERT INTO todos (task, completed, created_at) VALUES (?, 0, ?) RETURNING id",
        )
        .bind(task)
        .bind(created_at)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(new_id.id)
    }

    async fn set_completed(
        &self,
        todo_id: i64,
        completed: bool,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn
            .database_cxn()
            .await
            .context("acquiring a connection to update a todo")?;

        sqlx::query("UPDATE todos SET completed = ? WHERE id = ?")
            .bind(completed)
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to update a todo's completion state")?;

        Ok(())
    }

    async fn delete(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<u64, Error> {
        let mut cxn = ext_cxn
            .database_cxn()
            .await
            .context("acquiring a connection to delete a todo")?;

        let delete_result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(delete_result.rows_affected())
    }
}
