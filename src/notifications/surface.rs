use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::Notification;
use crate::domain::NotificationPhase;
use crate::utils::lock;

/// The notification mount point. `NotificationManager` decides what is shown
/// and when; a surface only draws it.
///
/// Calls for an id that isn't mounted must be no-ops.
pub trait NotificationSurface: Send + Sync {
    fn mount(
        &self,
        notification: &Notification,
        phase: NotificationPhase,
    );

    fn set_phase(
        &self,
        id: Uuid,
        phase: NotificationPhase,
    );

    fn remove(
        &self,
        id: Uuid,
    );
}

#[derive(Debug, Clone)]
pub struct MountedNotification {
    pub notification: Notification,
    pub phase: NotificationPhase,
}

impl MountedNotification {
    pub fn html(&self) -> String { self.notification.render_html(self.phase) }
}

/// Headless surface that keeps the mounted elements in memory. Clones share
/// the same elements.
#[derive(Clone, Default)]
pub struct MemorySurface {
    inner: Arc<Mutex<MemoryElements>>,
}

#[derive(Default)]
struct MemoryElements {
    mounted: Vec<MountedNotification>,
    /// every `mount` ever, including evicted ones
    history: Vec<Notification>,
}

impl MemorySurface {
    pub fn new() -> Self { Self::default() }

    pub fn elements(&self) -> Vec<MountedNotification> { lock(&self.inner).mounted.clone() }

    pub fn len(&self) -> usize { lock(&self.inner).mounted.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Everything that was ever mounted, oldest first
    pub fn history(&self) -> Vec<Notification> { lock(&self.inner).history.clone() }
}

impl NotificationSurface for MemorySurface {
    fn mount(
        &self,
        notification: &Notification,
        phase: NotificationPhase,
    ) {
        let mut inner = lock(&self.inner);
        inner.history.push(notification.clone());
        inner.mounted.push(MountedNotification {
            notification: notification.clone(),
            phase,
        });
    }

    fn set_phase(
        &self,
        id: Uuid,
        phase: NotificationPhase,
    ) {
        if let Some(el) = lock(&self.inner)
            .mounted
            .iter_mut()
            .find(|el| el.notification.id == id)
        {
            el.phase = phase;
        }
    }

    fn remove(
        &self,
        id: Uuid,
    ) {
        lock(&self.inner)
            .mounted
            .retain(|el| el.notification.id != id);
    }
}

/// Prints each toast as one line on stdout when it is mounted. Phase changes
/// only show up in the logs.
#[derive(Default)]
pub struct TerminalSurface;

impl NotificationSurface for TerminalSurface {
    fn mount(
        &self,
        notification: &Notification,
        _phase: NotificationPhase,
    ) {
        let mut stdout = std::io::stdout().lock();
        // a closed stdout is not worth failing over
        let _ = writeln!(
            stdout,
            "[{}] {}",
            notification.kind.glyph(),
            notification.message
        );
    }

    fn set_phase(
        &self,
        id: Uuid,
        phase: NotificationPhase,
    ) {
        tracing::debug!(%id, ?phase, "notification phase changed");
    }

    fn remove(
        &self,
        id: Uuid,
    ) {
        tracing::debug!(%id, "notification removed");
    }
}
