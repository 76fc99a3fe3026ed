pub mod aggregate;
pub mod availability;
