mod manager;
mod surface;
pub use manager::NotificationManager;
pub use surface::MemorySurface;
pub use surface::MountedNotification;
pub use surface::NotificationSurface;
pub use surface::TerminalSurface;
