pub mod confirmation;
pub mod notifier;
pub mod render;
