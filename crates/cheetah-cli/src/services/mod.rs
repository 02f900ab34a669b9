// crates/cheetah-cli/src/services/mod.rs - Service layer modules
pub mod clipboard;

pub use clipboard::ClipboardService;
