pub mod record;
pub mod registry;
pub mod citizen;
pub mod criminal;
