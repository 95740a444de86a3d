//! Record store: connection pool, migrations and repositories.

pub mod db;
pub mod subscription;
