//! SeaORM entities for the users and posts tables.

pub mod post;
pub mod user;
