// Service module exports

pub mod calendar;
pub mod export;
pub mod holiday;
pub mod settings;
pub mod snapshot;
