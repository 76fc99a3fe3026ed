pub mod api_error;
pub mod color_map;
pub mod dates;
pub mod money;
pub mod pagination;
pub mod text;
