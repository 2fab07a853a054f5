//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities. Every repository borrows the pooled
//! connection handle carried in application state; none of them own global
//! connection singletons.
//!
//! Shared conventions: default reads exclude soft-deleted rows, updates go
//! through explicit patch types whose fields are applied only when present,
//! and `soft_delete`/`restore` flip the `deleted_at` marker instead of
//! removing rows.

pub mod booking;
pub mod commission;
pub mod contact;
pub mod event;
pub mod schedule;
pub mod special_program;
pub mod user;
pub mod video;

pub use booking::BookingRepository;
pub use commission::CommissionRepository;
pub use contact::ContactRepository;
pub use event::EventRepository;
pub use schedule::ScheduleRepository;
pub use special_program::SpecialProgramRepository;
pub use user::UserRepository;
pub use video::VideoRepository;
