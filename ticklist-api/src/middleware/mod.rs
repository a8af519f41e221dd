/// Middleware modules for the API server
///
/// - `auth`: bearer-token auth gate protecting the task routes

pub mod auth;
