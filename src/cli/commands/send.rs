use anyhow::Context;

use crate::notify::Notifier;

pub fn handle_send(message: &str, title: &str, notifier: &dyn Notifier) -> anyhow::Result<()> {
    notifier
        .send(message, title)
        .with_context(|| format!("failed to send notification via {}", notifier.name()))?;
    println!("Notification sent via {}", notifier.name());
    Ok(())
}
