//! Migration to create the special_programs table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SpecialPrograms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpecialPrograms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SpecialPrograms::Title).string().not_null())
                    .col(
                        ColumnDef::new(SpecialPrograms::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpecialPrograms::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SpecialPrograms::EndDate).date().not_null())
                    .col(ColumnDef::new(SpecialPrograms::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(SpecialPrograms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SpecialPrograms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SpecialPrograms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SpecialPrograms::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_special_programs_start_date")
                    .table(SpecialPrograms::Table)
                    .col(SpecialPrograms::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SpecialPrograms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SpecialPrograms {
    Table,
    Id,
    Title,
    Description,
    StartDate,
    EndDate,
    ImageUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
