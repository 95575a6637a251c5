pub mod confirm;
pub mod loading;
pub mod notify;
pub mod table;

pub use confirm::{Confirm, FixedAnswer, StdinConfirm};
pub use loading::{LoadingGuard, LoadingIndicator};
pub use notify::{ConsoleNotifier, Level, Notification, NotificationBoard, Notifier};
pub use table::{StudentTable, TableState};
