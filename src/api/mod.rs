pub mod api;
pub(crate) mod dtos;
pub(crate) mod errors;
mod todo_handler;
