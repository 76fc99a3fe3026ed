pub mod auth;
pub mod prefs;
pub mod users;
