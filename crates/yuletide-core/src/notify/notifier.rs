//! Notification delivery capability.
//!
//! Platform delivery (desktop toasts, service workers) lives outside the
//! core; implementations here either log or record.

use serde::{Deserialize, Serialize};

use super::Threshold;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// Not decided yet; a request may still be granted.
    Prompt,
    /// The platform has no notification support.
    Unsupported,
}

pub trait Notifier {
    fn permission(&self) -> Permission;

    /// Ask for permission. Denied and unsupported are final.
    fn request_permission(&mut self) -> Permission {
        self.permission()
    }

    /// Fire-and-forget display.
    fn show(&mut self, title: &str, body: &str);
}

/// Emits notifications as log records. Always granted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn show(&mut self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
    }
}

/// Records everything shown.
#[derive(Debug, Clone)]
pub struct MemoryNotifier {
    permission: Permission,
    /// Permission a pending request resolves to.
    grant_on_request: bool,
    sent: Vec<(String, String)>,
}

impl MemoryNotifier {
    pub fn granted() -> Self {
        Self::with_permission(Permission::Granted)
    }

    pub fn with_permission(permission: Permission) -> Self {
        Self {
            permission,
            grant_on_request: true,
            sent: Vec::new(),
        }
    }

    /// A prompt that the user will decline.
    pub fn declining() -> Self {
        Self {
            permission: Permission::Prompt,
            grant_on_request: false,
            sent: Vec::new(),
        }
    }

    pub fn sent(&self) -> &[(String, String)] {
        &self.sent
    }

    /// Count of shown bodies that match the default text for `threshold`.
    pub fn count_default(&self, threshold: Threshold) -> usize {
        self.sent
            .iter()
            .filter(|(_, body)| body == threshold.default_message())
            .count()
    }
}

impl Notifier for MemoryNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        if self.permission == Permission::Prompt {
            self.permission = if self.grant_on_request {
                Permission::Granted
            } else {
                Permission::Denied
            };
        }
        self.permission
    }

    fn show(&mut self, title: &str, body: &str) {
        self.sent.push((title.to_string(), body.to_string()));
    }
}
