use actix_web::{self, middleware, web, App, HttpResponse, HttpServer};
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use r2d2::Pool;

use crate::models;

use super::todo_handler;

const CREATE_TABLE_QUERY: &str = "CREATE TABLE IF NOT EXISTS todo (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    completed_at TIMESTAMP WITH TIME ZONE
)";

/// Create the todo table if it is missing. Issued once at startup, not per
/// request.
fn ensure_schema(pool: &models::Pool) -> anyhow::Result<()> {
    let conn = pool.get()?;

    diesel::sql_query(CREATE_TABLE_QUERY).execute(&conn)?;

    Ok(())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").service(
            web::resource("/todo")
                .route(web::get().to(todo_handler::find_todos))
                .route(web::post().to(todo_handler::create_todo))
                .route(web::put().to(todo_handler::update_todo))
                .route(web::delete().to(todo_handler::delete_todo))
                .default_service(web::route().to(HttpResponse::MethodNotAllowed)),
        ),
    );
}

#[actix_web::main]
pub async fn start_server(bind: String) -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var(
            "RUST_LOG",
            "todo_api=debug,actix_web=info,actix_server=info",
        );
    }

    env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let manager = ConnectionManager::<diesel::PgConnection>::new(database_url);

    let pool: models::Pool = Pool::builder()
        .build(manager)
        .expect("Failed to connect to PG database");

    ensure_schema(&pool)?;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(bind.as_str())?
    .run()
    .await?;

    Ok(())
}
