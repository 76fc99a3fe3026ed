pub mod actions;
pub mod aggregate;
pub mod dirty_set;
pub mod lines;
