//! Create dishes table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dishes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Dishes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Dishes::Name).string().not_null())
                    .col(ColumnDef::new(Dishes::Tag).string().not_null().default(""))
                    .col(ColumnDef::new(Dishes::Canteen).json_binary().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dishes_name")
                    .table(Dishes::Table)
                    .col(Dishes::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dishes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Dishes {
    Table,
    Id,
    Name,
    Tag,
    Canteen,
}
