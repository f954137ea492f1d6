//! Todo CRUD handlers.
//!
//! Thin routing glue: JSON binding, three fixed SQL statements, status
//! mapping. The availability gate has already bound a healthy [`Db`]
//! handle by the time any of these run.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::{Db, DbError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    #[serde(default)]
    pub id: i32,
    pub title: String,
    pub done: bool,
}

/// `POST /` — insert a todo.
pub async fn create_todo(db: Db, Json(input): Json<Todo>) -> Response {
    let query = sqlx::query("insert into public.todos (title, done) values ($1, $2)")
        .bind(&input.title)
        .bind(input.done);

    match db.execute(query).await {
        Ok(0) => (StatusCode::INTERNAL_SERVER_ERROR, "no rows affected").into_response(),
        Ok(_) => StatusCode::ACCEPTED.into_response(),
        Err(e) => statement_error(e),
    }
}

/// `GET /` — list all todos.
pub async fn list_todos(db: Db) -> Response {
    let query =
        sqlx::query_as::<_, Todo>("select id, title, done from public.todos order by id");

    match db.fetch_all(query).await {
        Ok(todos) => Json(todos).into_response(),
        Err(e) => statement_error(e),
    }
}

/// `POST /{id}` — update a todo; 404 when the row does not exist.
pub async fn update_todo(db: Db, Path(id): Path<i32>, Json(input): Json<Todo>) -> Response {
    let query = sqlx::query("update public.todos set title = $1, done = $2 where id = $3")
        .bind(&input.title)
        .bind(input.done)
        .bind(id);

    match db.execute(query).await {
        Ok(0) => (StatusCode::NOT_FOUND, "no rows affected").into_response(),
        Ok(_) => StatusCode::ACCEPTED.into_response(),
        Err(e) => statement_error(e),
    }
}

fn statement_error(err: DbError) -> Response {
    tracing::error!(error = %err, "todo statement failed");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}
