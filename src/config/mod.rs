pub mod proc_loader;
pub mod settings;

pub use settings::ClientConfig;
