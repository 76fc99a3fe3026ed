pub mod items_repository;
pub mod repository;
pub mod service;
