//! Desktop notification dispatch
//!
//! The timer only knows the [`Notifier`] capability. Concrete backends are
//! picked once at process start from the configured [`NotifierKind`].

use std::{fmt, process::Command, sync::Arc};

use clap::ValueEnum;
use notify_rust::Notification;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::utils::format_hours_text;

pub const APP_NAME: &str = "TaskPomodoro";

/// Something that can put a (title, message) pair in front of the user
pub trait Notifier: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Deliver a notification, returning whether delivery succeeded
    fn send(&self, title: &str, message: &str) -> bool;
}

impl fmt::Debug for dyn Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notifier({})", self.name())
    }
}

/// Notification backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Native notifications where supported, log-only elsewhere
    #[default]
    Auto,
    /// Native notification service via notify-rust
    Desktop,
    /// Platform command line tools (notify-send, osascript, PowerShell)
    Command,
    /// Only write notifications to the log
    Log,
}

/// A ready-made notification title and body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Milestone message for `hours` of continuous work
    pub fn hourly_update(hours: u64) -> Self {
        Self::new(
            format!("{} - Work Update", APP_NAME),
            format!(
                "You have been working for {}! Keep it up!",
                format_hours_text(hours)
            ),
        )
    }

    /// Message sent when the rest countdown runs out
    pub fn rest_complete() -> Self {
        Self::new(
            format!("{} - Rest Complete!", APP_NAME),
            "Your rest time is over. Time to get back to work!",
        )
    }
}

/// Send a message and swallow any failure after logging it
pub fn dispatch_notification(notifier: &dyn Notifier, message: &NotificationMessage) -> bool {
    debug!(
        "Dispatching notification via {}: {}",
        notifier.name(),
        message.title
    );
    let delivered = notifier.send(&message.title, &message.body);
    if !delivered {
        warn!(
            "Notification '{}' was not delivered by {} backend",
            message.title,
            notifier.name()
        );
    }
    delivered
}

/// Dispatch on the blocking pool so a slow backend never stalls the caller.
///
/// Must be called from within a tokio runtime. The returned handle may be
/// dropped; delivery then completes detached.
pub fn dispatch_in_background(
    notifier: &Arc<dyn Notifier>,
    message: NotificationMessage,
) -> JoinHandle<bool> {
    let notifier = Arc::clone(notifier);
    tokio::task::spawn_blocking(move || dispatch_notification(notifier.as_ref(), &message))
}

/// Build the notifier for the configured backend
pub fn select_notifier(kind: NotifierKind) -> Arc<dyn Notifier> {
    let notifier: Arc<dyn Notifier> = match kind {
        NotifierKind::Auto => {
            if cfg!(any(target_os = "linux", target_os = "macos", target_os = "windows")) {
                Arc::new(DesktopNotifier)
            } else {
                Arc::new(LogNotifier)
            }
        }
        NotifierKind::Desktop => Arc::new(DesktopNotifier),
        NotifierKind::Command => Arc::new(CommandNotifier),
        NotifierKind::Log => Arc::new(LogNotifier),
    };
    info!("Using {} notification backend", notifier.name());
    notifier
}

/// Native notifications through the platform notification service
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn send(&self, title: &str, message: &str) -> bool {
        match Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(message)
            .show()
        {
            Ok(_) => true,
            Err(e) => {
                warn!("Desktop notification failed: {}", e);
                false
            }
        }
    }
}

/// Notifications through each platform's command line tooling
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandNotifier;

impl CommandNotifier {
    /// Program probed at startup to check the backend can work
    pub fn program() -> &'static str {
        if cfg!(target_os = "windows") {
            "powershell"
        } else if cfg!(target_os = "macos") {
            "osascript"
        } else {
            "notify-send"
        }
    }

    #[cfg(target_os = "windows")]
    fn send_platform(title: &str, message: &str) -> bool {
        use std::os::windows::process::CommandExt;

        const CREATE_NO_WINDOW: u32 = 0x0800_0000;

        let script = powershell_balloon_script(title, message);
        match Command::new("powershell")
            .args(["-WindowStyle", "Hidden", "-Command", &script])
            .creation_flags(CREATE_NO_WINDOW)
            .spawn()
        {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to spawn PowerShell notification: {}", e);
                false
            }
        }
    }

    #[cfg(target_os = "macos")]
    fn send_platform(title: &str, message: &str) -> bool {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_applescript(message),
            escape_applescript(title)
        );
        run_to_completion(Command::new("osascript").args(["-e", &script]))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn send_platform(title: &str, message: &str) -> bool {
        run_to_completion(Command::new("notify-send").args([title, message]))
    }
}

impl Notifier for CommandNotifier {
    fn name(&self) -> &'static str {
        "command"
    }

    fn send(&self, title: &str, message: &str) -> bool {
        Self::send_platform(title, message)
    }
}

#[cfg(not(target_os = "windows"))]
fn run_to_completion(command: &mut Command) -> bool {
    match command.output() {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Notification command failed: {}", stderr.trim());
            false
        }
        Err(e) => {
            warn!("Failed to execute notification command: {}", e);
            false
        }
    }
}

/// Writes notifications to the log instead of the desktop
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    fn send(&self, title: &str, message: &str) -> bool {
        info!("[notification] {}: {}", title, message);
        true
    }
}

/// Escape text for a double-quoted AppleScript string literal
pub fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape text for embedding in the PowerShell balloon script
pub fn escape_powershell(text: &str) -> String {
    text.replace('\'', "''").replace('"', "`\"")
}

/// PowerShell script that shows a tray balloon for five seconds
pub fn powershell_balloon_script(title: &str, message: &str) -> String {
    format!(
        r#"
Add-Type -AssemblyName System.Windows.Forms
$balloon = New-Object System.Windows.Forms.NotifyIcon
$balloon.Icon = [System.Drawing.SystemIcons]::Information
$balloon.BalloonTipIcon = "Info"
$balloon.BalloonTipTitle = "{}"
$balloon.BalloonTipText = "{}"
$balloon.Visible = $true
$balloon.ShowBalloonTip(5000)
Start-Sleep -Seconds 5
$balloon.Dispose()
"#,
        escape_powershell(title),
        escape_powershell(message)
    )
}
