//! Host capability checks

use tokio::process::Command;
use tracing::info;

use super::notifications::{CommandNotifier, NotifierKind};

/// Check that a program can be launched on this host
pub async fn check_program_available(program: &str) -> Result<(), String> {
    let probe = if program == "osascript" {
        // osascript has no version flag, an empty script is enough
        Command::new(program).args(["-e", "return"]).output().await
    } else {
        Command::new(program).arg("--version").output().await
    };

    probe.map_err(|_| format!("{} is not available on this system", program))?;

    info!("{} is available", program);
    Ok(())
}

/// Verify the chosen notification backend can deliver on this host
pub async fn check_notifier_available(kind: NotifierKind) -> Result<(), String> {
    match kind {
        NotifierKind::Command => check_program_available(CommandNotifier::program()).await,
        NotifierKind::Auto | NotifierKind::Desktop | NotifierKind::Log => Ok(()),
    }
}
