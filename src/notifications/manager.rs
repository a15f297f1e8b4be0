use std::sync::Arc;
use std::sync::Mutex;

use uuid::Uuid;

use super::NotificationSurface;
use crate::configuration::NotificationSettings;
use crate::domain::Notification;
use crate::domain::NotificationKind;
use crate::domain::NotificationPhase;
use crate::utils::lock;

/// The single notification slot.
struct Slot {
    id: Uuid,
    phase: NotificationPhase,
}

/// Shows one toast at a time on a `NotificationSurface`.
///
/// Clones share the slot and the surface. Timers are spawned tokio tasks, so
/// `notify` and `dismiss` must be called from within a runtime. Every timer
/// re-checks the slot before touching the surface; a timer for a toast that
/// was already dismissed or replaced does nothing.
#[derive(Clone)]
pub struct NotificationManager {
    surface: Arc<dyn NotificationSurface>,
    slot: Arc<Mutex<Option<Slot>>>,
    timings: NotificationSettings,
}

impl NotificationManager {
    pub fn new(
        surface: Arc<dyn NotificationSurface>,
        timings: NotificationSettings,
    ) -> Self {
        Self {
            surface,
            slot: Arc::new(Mutex::new(None)),
            timings,
        }
    }

    pub fn timings(&self) -> &NotificationSettings { &self.timings }

    /// Replace whatever is shown with a new toast. The previous one is removed
    /// on the spot, without its exit transition.
    ///
    /// The new toast is mounted off-screen and slid in after the enter delay;
    /// starting the transition in the same step as mounting would skip it.
    #[tracing::instrument(
        name = "Showing notification",
        skip(self, message),
        fields(id = tracing::field::Empty)
    )]
    pub fn notify(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Uuid {
        let notification = Notification::new(message, kind);
        let id = notification.id;
        tracing::Span::current().record("id", tracing::field::display(id));

        {
            let mut slot = lock(&self.slot);
            if let Some(previous) = slot.take() {
                self.surface.remove(previous.id);
            }
            self.surface.mount(&notification, NotificationPhase::Entering);
            *slot = Some(Slot {
                id,
                phase: NotificationPhase::Entering,
            });
        }

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.timings.enter_delay()).await;
            this.advance(id, NotificationPhase::Entering, NotificationPhase::Visible);
        });

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.timings.lifetime()).await;
            this.dismiss(id);
        });

        id
    }

    /// Slide the toast out and remove it once the transition is over. Used by
    /// the close button and by the auto-dismiss timer; a no-op if `id` is not
    /// the current toast or is already leaving.
    pub fn dismiss(
        &self,
        id: Uuid,
    ) {
        let leaving = self.advance(id, NotificationPhase::Entering, NotificationPhase::Leaving)
            || self.advance(id, NotificationPhase::Visible, NotificationPhase::Leaving);
        if !leaving {
            return;
        }

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.timings.transition()).await;
            this.remove(id);
        });
    }

    /// Remove the current toast immediately, no transition (Escape key).
    pub fn dismiss_current(&self) {
        if let Some(current) = lock(&self.slot).take() {
            self.surface.remove(current.id);
        }
    }

    pub fn current(&self) -> Option<(Uuid, NotificationPhase)> {
        lock(&self.slot)
            .as_ref()
            .map(|slot| (slot.id, slot.phase))
    }

    /// Resolve once nothing is shown. Polls every transition period.
    pub async fn wait_until_clear(&self) {
        while self.current().is_some() {
            tokio::time::sleep(self.timings.transition()).await;
        }
    }

    /// Move `id` from `from` to `to`, if that is where it still is.
    fn advance(
        &self,
        id: Uuid,
        from: NotificationPhase,
        to: NotificationPhase,
    ) -> bool {
        let mut slot = lock(&self.slot);
        match slot.as_mut() {
            Some(current) if current.id == id && current.phase == from => {
                current.phase = to;
                self.surface.set_phase(id, to);
                true
            }
            _ => false,
        }
    }

    fn remove(
        &self,
        id: Uuid,
    ) {
        let mut slot = lock(&self.slot);
        if slot.as_ref().is_some_and(|current| current.id == id) {
            *slot = None;
            self.surface.remove(id);
        }
    }
}
