pub mod label;
pub mod record;
pub mod settings;
pub mod summary;
