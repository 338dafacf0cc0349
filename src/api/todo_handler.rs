use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::dtos::todo::TodoPayload;
use super::errors::TodoApiError;
use crate::models::todo_model::{NewTodo, Todo};
use crate::models::Pool;

use diesel::prelude::*;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: Option<String>,
}

/// GET: a non-empty `id` query parameter selects a single todo,
/// otherwise the whole list is returned
pub async fn find_todos(
    query: web::Query<IdQuery>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    match query.into_inner().id {
        Some(raw) if !raw.is_empty() => {
            let todo_id = parse_id(&raw)?;

            let found = web::block(move || get_todo_by_id(pool, todo_id)).await??;

            Ok(HttpResponse::Ok().json(&found))
        }
        _ => {
            let list = web::block(move || get_all_todos(pool)).await??;

            Ok(HttpResponse::Ok().json(&list))
        }
    }
}

/// Create a new todo, responds with the inserted row and its generated id
pub async fn create_todo(
    request_data: web::Json<TodoPayload>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let inserted = web::block(move || insert_new_todo(pool, request_data.into_inner())).await??;

    Ok(HttpResponse::Created().json(&inserted))
}

/// Replace title/description/completed of the todo named by the `id` query
pub async fn update_todo(
    query: web::Query<IdQuery>,
    request_data: web::Json<TodoPayload>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let todo_id = require_id(query.into_inner().id)?;

    let updated =
        web::block(move || replace_todo(pool, todo_id, request_data.into_inner())).await??;

    Ok(HttpResponse::Ok().json(&updated))
}

/// Delete the todo named by the `id` query
pub async fn delete_todo(
    query: web::Query<IdQuery>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let todo_id = require_id(query.into_inner().id)?;

    web::block(move || remove_todo(pool, todo_id)).await??;

    Ok(HttpResponse::Ok().finish())
}

fn parse_id(raw: &str) -> Result<i32, TodoApiError> {
    raw.parse::<i32>()
        .map_err(|_| TodoApiError::BadRequest(String::from("Invalid Todo Id")))
}

fn require_id(raw: Option<String>) -> Result<i32, TodoApiError> {
    match raw {
        Some(raw) => parse_id(&raw),
        None => Err(TodoApiError::BadRequest(String::from("Missing Todo Id"))),
    }
}

/// Get all todos, in no particular order
fn get_all_todos(pool: web::Data<Pool>) -> Result<Vec<Todo>, TodoApiError> {
    use crate::schema::todo::dsl::*;

    let conn = &pool.get()?;

    let list = todo.load::<Todo>(conn)?;

    Ok(list)
}

fn get_todo_by_id(pool: web::Data<Pool>, todo_id: i32) -> Result<Todo, TodoApiError> {
    use crate::schema::todo::dsl::*;

    let conn = &pool.get()?;

    let found = todo.filter(id.eq(todo_id)).first::<Todo>(conn)?;

    Ok(found)
}

fn insert_new_todo(pool: web::Data<Pool>, payload: TodoPayload) -> Result<Todo, TodoApiError> {
    use crate::schema::todo::dsl::*;

    let conn = &pool.get()?;

    let new_todo = NewTodo::from(payload);

    // single statement, the row comes back with its generated id
    let inserted = diesel::insert_into(todo)
        .values(&new_todo)
        .get_result::<Todo>(conn);

    match inserted {
        Ok(row) => Ok(row),
        Err(e) => {
            eprintln!("Error {}", e);
            Err(TodoApiError::InternalServerError)
        }
    }
}

/// Replace a todo's mutable fields. `completed_at` is carried in the payload
/// but is not part of the update column set.
fn replace_todo(
    pool: web::Data<Pool>,
    todo_id: i32,
    payload: TodoPayload,
) -> Result<Todo, TodoApiError> {
    use crate::schema::todo::dsl::*;

    let conn = &pool.get()?;

    let updated = diesel::update(todo.filter(id.eq(todo_id)))
        .set((
            title.eq(payload.title),
            description.eq(payload.description),
            completed.eq(payload.completed),
        ))
        .get_result::<Todo>(conn)?;

    Ok(updated)
}

fn remove_todo(pool: web::Data<Pool>, todo_id: i32) -> Result<(), TodoApiError> {
    use crate::schema::todo::dsl::*;

    let conn = &pool.get()?;

    let delete_count = diesel::delete(todo.filter(id.eq(todo_id))).execute(conn)?;

    if delete_count > 0 {
        Ok(())
    } else {
        Err(TodoApiError::NotFound(String::from("Todo")))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::api::routes;
    use actix_web::{http::StatusCode, test as actix_test, App};
    use diesel::r2d2::ConnectionManager;

    // A pool that never checks connectivity. The tests below fail before any
    // query is issued, so no database is needed.
    fn unconnected_pool() -> Pool {
        let manager =
            ConnectionManager::<diesel::PgConnection>::new("postgres://localhost/unreachable");

        r2d2::Pool::builder().max_size(1).build_unchecked(manager)
    }

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("abc"), Err(TodoApiError::BadRequest(_))));
        assert!(matches!(parse_id(""), Err(TodoApiError::BadRequest(_))));
    }

    #[test]
    fn require_id_rejects_missing() {
        assert!(matches!(require_id(None), Err(TodoApiError::BadRequest(_))));
    }

    #[actix_web::test]
    async fn get_with_bad_id_is_400() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(unconnected_pool()))
                .configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/api/todo?id=abc").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_without_id_is_400() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(unconnected_pool()))
                .configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::delete().uri("/api/todo").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_json_body_is_400() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(unconnected_pool()))
                .configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/todo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unrouted_method_is_405() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(unconnected_pool()))
                .configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::patch().uri("/api/todo").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
