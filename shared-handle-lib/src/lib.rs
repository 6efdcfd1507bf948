pub mod app;
pub mod mem;
