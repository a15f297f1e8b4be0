use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// Font Awesome icon class
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error => "fa-exclamation-circle",
            Self::Info => "fa-info-circle",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => "#00ff88",
            Self::Error => "#ff4757",
            Self::Info => "#00d4ff",
        }
    }

    /// Single-char glyph for surfaces that can't show icons
    pub fn glyph(&self) -> char {
        match self {
            Self::Success => '✓',
            Self::Error => '!',
            Self::Info => 'i',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Where a mounted toast is in its lifecycle:
///
/// entering -> visible -> leaving -> (removed)
///
/// `Entering` and `Leaving` are both drawn off-screen; the CSS transition
/// between them and `Visible` is the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Entering,
    Visible,
    Leaving,
}

impl NotificationPhase {
    pub fn transform(&self) -> &'static str {
        match self {
            Self::Visible => "translateX(0)",
            Self::Entering | Self::Leaving => "translateX(400px)",
        }
    }
}

const TOAST_BASE_STYLE: &str = "position: fixed; top: 100px; right: 20px; color: #000; \
    padding: 1rem 1.5rem; border-radius: 8px; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.2); \
    z-index: 10000; max-width: 400px; font-weight: 500;";

/// A transient message. Not persisted anywhere.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    /// When the toast was created; its lifetime is measured from here
    pub visible_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            visible_at: Utc::now(),
        }
    }

    /// Markup of the toast element in the given phase. The message is escaped;
    /// callers may pass arbitrary text.
    pub fn render_html(
        &self,
        phase: NotificationPhase,
    ) -> String {
        let kind = self.kind.as_str();
        let icon = self.kind.icon();
        let color = self.kind.color();
        let transform = phase.transform();
        let message = htmlescape::encode_minimal(&self.message);
        let style = format!(
            "{base} background: {color}; transform: {transform}; \
             transition: transform 0.3s ease-in-out;",
            base = TOAST_BASE_STYLE,
        );
        format!(
            r#"<div class="notification notification-{kind}" data-id="{id}" style="{style}">
  <div class="notification-content">
    <i class="fas {icon}"></i>
    <span>{message}</span>
    <button class="notification-close"><i class="fas fa-times"></i></button>
  </div>
</div>"#,
            id = self.id,
        )
    }
}
