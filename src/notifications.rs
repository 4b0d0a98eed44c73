//! Desktop notification support.
//! macOS goes through osascript, everything else through notify-send.
use std::cell::OnceCell;
use std::process::Command;

/// Title of the due-today reminder
pub const TASK_DUE_TITLE: &str = "📝 Task Due Today";

/// Best-effort, one-way notification channel
pub trait Notifier {
    /// Ask for permission to notify. Implementations cache the answer for
    /// the session, so repeated calls never prompt again.
    fn request_permission(&self) -> bool;

    /// Emit a notification. Failures are swallowed.
    fn notify(&self, title: &str, body: &str);
}

/// Notifier that shells out to the platform notification helper
#[derive(Debug, Default)]
pub struct DesktopNotifier {
    permission: OnceCell<bool>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for DesktopNotifier {
    fn request_permission(&self) -> bool {
        *self.permission.get_or_init(|| {
            let granted = helper_available();
            if granted {
                tracing::info!("desktop notifications available");
            } else {
                tracing::info!(
                    "desktop notifications unavailable, reminders disabled for this session"
                );
            }
            granted
        })
    }

    fn notify(&self, title: &str, body: &str) {
        if !self.request_permission() {
            return;
        }
        if let Err(e) = send(title, body) {
            tracing::debug!(error = %e, "notification not delivered");
        }
    }
}

/// Notifier used when reminders are switched off in settings
#[derive(Debug, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn request_permission(&self) -> bool {
        false
    }

    fn notify(&self, _title: &str, _body: &str) {}
}

#[cfg(target_os = "macos")]
fn helper_available() -> bool {
    Command::new("osascript").arg("-e").arg("return").output().is_ok_and(|o| o.status.success())
}

#[cfg(not(target_os = "macos"))]
fn helper_available() -> bool {
    Command::new("notify-send").arg("--version").output().is_ok_and(|o| o.status.success())
}

#[cfg(target_os = "macos")]
fn send(title: &str, body: &str) -> std::io::Result<()> {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        escape_applescript(body),
        escape_applescript(title)
    );
    Command::new("osascript").arg("-e").arg(&script).output().map(|_| ())
}

#[cfg(not(target_os = "macos"))]
fn send(title: &str, body: &str) -> std::io::Result<()> {
    Command::new("notify-send").arg(title).arg(body).output().map(|_| ())
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
pub mod testing {
    use super::Notifier;
    use std::cell::{Cell, RefCell};

    /// Records notifications instead of sending them
    #[derive(Debug)]
    pub struct RecordingNotifier {
        pub granted: bool,
        pub permission_requests: Cell<usize>,
        pub sent: RefCell<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        pub fn granting() -> Self {
            Self {
                granted: true,
                permission_requests: Cell::new(0),
                sent: RefCell::new(Vec::new()),
            }
        }

        pub fn denying() -> Self {
            Self {
                granted: false,
                ..Self::granting()
            }
        }

        pub fn bodies(&self) -> Vec<String> {
            self.sent.borrow().iter().map(|(_, body)| body.clone()).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn request_permission(&self) -> bool {
            self.permission_requests.set(self.permission_requests.get() + 1);
            self.granted
        }

        fn notify(&self, title: &str, body: &str) {
            self.sent.borrow_mut().push((title.to_string(), body.to_string()));
        }
    }

    impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
        fn request_permission(&self) -> bool {
            (**self).request_permission()
        }

        fn notify(&self, title: &str, body: &str) {
            (**self).notify(title, body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notifier_denies() {
        let notifier = DisabledNotifier;
        assert!(!notifier.request_permission());
    }

    #[test]
    fn test_desktop_permission_is_cached() {
        let notifier = DesktopNotifier::new();
        let first = notifier.request_permission();
        assert_eq!(notifier.permission.get(), Some(&first));
        assert_eq!(notifier.request_permission(), first);
    }

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_applescript(r"a\b"), r"a\\b");
    }
}
