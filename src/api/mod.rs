//! HTTP layer: route handlers, middleware, request/response DTOs and the
//! OpenAPI document.

mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
