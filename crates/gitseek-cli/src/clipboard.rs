use tracing::warn;

/// Put text on the system clipboard. Failure is logged, never fatal.
pub fn copy(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_owned())) {
        Ok(()) => true,
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            false
        }
    }
}
