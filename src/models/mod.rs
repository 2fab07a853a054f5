//! # Data Models
//!
//! This module contains the SeaORM entities persisted by the choir API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod booking;
pub mod commission;
pub mod contact;
pub mod event;
pub mod schedule;
pub mod special_program;
pub mod user;
pub mod video;

pub use booking::Entity as Booking;
pub use commission::Entity as Commission;
pub use contact::Entity as Contact;
pub use event::Entity as Event;
pub use schedule::Entity as Schedule;
pub use special_program::Entity as SpecialProgram;
pub use user::Entity as User;
pub use video::Entity as Video;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "choir-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
