use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogUser::Table)
                    .if_not_exists()
                    .col(uuid(CatalogUser::Id).primary_key())
                    .col(string_len(CatalogUser::Username, 128).not_null().unique_key())
                    .col(string_len(CatalogUser::PasswordHash, 256).not_null())
                    .col(string_len(CatalogUser::Role, 16).not_null())
                    .col(timestamp_with_time_zone(CatalogUser::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CatalogUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CatalogUser {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    CreatedAt,
}
