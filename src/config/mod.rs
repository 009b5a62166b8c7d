pub mod inventory;
pub mod settings;

pub use inventory::Inventory;
pub use settings::Settings;
