pub mod a001_client;
pub mod a002_product;
pub mod a003_order;
