pub mod cleanup;
pub mod dispatch;
pub mod import;
pub mod schema;
