use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entry_name")
                    .table(Entry::Table)
                    .col(Entry::Name)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_catalog_user_username")
                    .table(CatalogUser::Table)
                    .col(CatalogUser::Username)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_entry_name").table(Entry::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_catalog_user_username")
                    .table(CatalogUser::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Entry {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum CatalogUser {
    Table,
    Username,
}
