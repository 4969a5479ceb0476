use tracing::info;

/// Blocking `window.alert`, the one way the dashboard reports outcomes.
pub fn alert(message: &str) {
    info!("alert: {}", message);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
