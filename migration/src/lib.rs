//! Database migrations for the choir API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_08_01_000001_create_users;
mod m2026_08_01_000002_create_events;
mod m2026_08_01_000003_create_commissions;
mod m2026_08_01_000004_create_bookings;
mod m2026_08_01_000005_create_schedules;
mod m2026_08_01_000006_create_special_programs;
mod m2026_08_01_000007_create_contacts;
mod m2026_08_01_000008_create_videos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_08_01_000001_create_users::Migration),
            Box::new(m2026_08_01_000002_create_events::Migration),
            Box::new(m2026_08_01_000003_create_commissions::Migration),
            Box::new(m2026_08_01_000004_create_bookings::Migration),
            Box::new(m2026_08_01_000005_create_schedules::Migration),
            Box::new(m2026_08_01_000006_create_special_programs::Migration),
            Box::new(m2026_08_01_000007_create_contacts::Migration),
            Box::new(m2026_08_01_000008_create_videos::Migration),
        ]
    }
}
