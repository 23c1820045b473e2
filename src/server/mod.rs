pub mod routes;

pub use routes::{router, serve, AdaptRequest, AdaptResponse};
