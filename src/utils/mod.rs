/// Constants
pub mod constants;
/// Database connection pool
pub mod db_connect;
/// Logger
pub mod logger;
