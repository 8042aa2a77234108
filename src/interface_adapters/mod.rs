pub mod cookies;
pub mod handlers;
pub mod memory;
pub mod password;
pub mod postgres;
pub mod protocol;
pub mod routes;
pub mod session_store;
pub mod state;
