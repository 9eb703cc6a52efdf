//! Helper functions shared by the generator and templates

pub mod date;
pub mod reading_time;
