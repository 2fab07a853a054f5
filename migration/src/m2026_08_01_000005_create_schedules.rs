//! Migration to create the schedules table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::Title).string().not_null())
                    .col(ColumnDef::new(Schedules::Description).text().null())
                    .col(ColumnDef::new(Schedules::ScheduleDate).date().not_null())
                    .col(ColumnDef::new(Schedules::StartTime).string().not_null())
                    .col(ColumnDef::new(Schedules::EndTime).string().null())
                    .col(ColumnDef::new(Schedules::Location).string().null())
                    .col(ColumnDef::new(Schedules::ScheduleType).string().not_null())
                    .col(
                        ColumnDef::new(Schedules::Status)
                            .string()
                            .not_null()
                            .default("tentative"),
                    )
                    .col(
                        ColumnDef::new(Schedules::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Schedules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Schedules::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_schedule_date")
                    .table(Schedules::Table)
                    .col(Schedules::ScheduleDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Schedules {
    Table,
    Id,
    Title,
    Description,
    ScheduleDate,
    StartTime,
    EndTime,
    Location,
    ScheduleType,
    Status,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
