//! `SeaORM` entities for the tracking database.

pub mod creation_log;
pub mod deletion_log;
pub mod subdomain;
