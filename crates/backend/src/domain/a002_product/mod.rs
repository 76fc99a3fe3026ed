pub mod movements;
pub mod repository;
pub mod service;
