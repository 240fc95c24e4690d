//! Request and response bodies

pub mod cars;
pub mod claims;
pub mod history;
