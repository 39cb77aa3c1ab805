pub mod app;
pub mod elapsed;
