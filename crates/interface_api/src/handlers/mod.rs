//! Request handlers

pub mod health;
pub mod cars;
pub mod claims;
pub mod history;
