use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "url_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub short_name: String,
    /// Trimmed + lowercased copy of `short_name`; carries the unique index.
    #[sea_orm(unique)]
    pub short_name_norm: String,
    #[sea_orm(column_type = "Text")]
    pub long_url: String,
    pub created_by: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
    pub is_system_entry: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
