use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UrlEntry::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UrlEntry::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UrlEntry::ShortName).string().not_null())
                    .col(ColumnDef::new(UrlEntry::ShortNameNorm).string().not_null())
                    .col(ColumnDef::new(UrlEntry::LongUrl).text().not_null())
                    .col(ColumnDef::new(UrlEntry::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(UrlEntry::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UrlEntry::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(UrlEntry::UpdatedBy).string().null())
                    .col(
                        ColumnDef::new(UrlEntry::IsSystemEntry)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Uniqueness of short names is enforced by the index on the normalized column
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_name_norm")
                    .table(UrlEntry::Table)
                    .col(UrlEntry::ShortNameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_entries_created_at")
                    .table(UrlEntry::Table)
                    .col(UrlEntry::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_url_entries_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_short_name_norm").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UrlEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UrlEntry {
    #[sea_orm(iden = "url_entries")]
    Table,
    Id,
    ShortName,
    ShortNameNorm,
    LongUrl,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    UpdatedBy,
    IsSystemEntry,
}
