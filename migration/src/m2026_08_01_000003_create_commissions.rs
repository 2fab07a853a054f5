//! Migration to create the commissions table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Commissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Commissions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Commissions::ClientName).string().not_null())
                    .col(ColumnDef::new(Commissions::Email).string().not_null())
                    .col(ColumnDef::new(Commissions::Phone).string().null())
                    .col(
                        ColumnDef::new(Commissions::CommissionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Commissions::Description).text().not_null())
                    .col(ColumnDef::new(Commissions::Budget).double().null())
                    .col(
                        ColumnDef::new(Commissions::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Commissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Commissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Commissions::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_commissions_status")
                    .table(Commissions::Table)
                    .col(Commissions::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Commissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Commissions {
    Table,
    Id,
    ClientName,
    Email,
    Phone,
    CommissionType,
    Description,
    Budget,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
