pub mod memory;
pub mod sea_orm;
