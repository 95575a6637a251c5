pub mod _dashboard;
pub mod commands;

pub use _dashboard::{Dashboard, DashboardError, DashboardView};
pub use commands::{Command, CommandOutput};
