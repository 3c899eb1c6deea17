//! SeaORM entities for the `profiles` and `posts` tables.

pub mod post;
pub mod profile;
pub mod sea_orm_active_enums;
