// HTTP handlers, one module per resource
pub mod studies;
pub mod system;
