// Module exports for models

pub mod calendar;
pub mod holiday;
pub mod settings;
