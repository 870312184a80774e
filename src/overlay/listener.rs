//! Host callbacks fired by the overlay.

use super::entry::TextEntry;

pub type TextsChangedFn = Box<dyn FnMut(&[TextEntry]) + Send + Sync>;
pub type TextTappedFn = Box<dyn FnMut(&TextEntry) + Send + Sync>;

/// Pair of optional callbacks. A missing callback is simply skipped.
#[derive(Default)]
pub struct OverlayListener {
    texts_changed: Option<TextsChangedFn>,
    text_tapped: Option<TextTappedFn>,
}

impl OverlayListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with every entry after any mutation
    pub fn on_texts_changed(
        mut self,
        callback: impl FnMut(&[TextEntry]) + Send + Sync + 'static,
    ) -> Self {
        self.texts_changed = Some(Box::new(callback));
        self
    }

    /// Called when a confirmed single tap lands on the selected text
    pub fn on_text_tapped(mut self, callback: impl FnMut(&TextEntry) + Send + Sync + 'static) -> Self {
        self.text_tapped = Some(Box::new(callback));
        self
    }

    pub fn wants_changes(&self) -> bool {
        self.texts_changed.is_some()
    }

    pub(crate) fn texts_changed(&mut self, texts: &[TextEntry]) {
        if let Some(callback) = self.texts_changed.as_mut() {
            callback(texts);
        }
    }

    pub(crate) fn text_tapped(&mut self, text: &TextEntry) {
        if let Some(callback) = self.text_tapped.as_mut() {
            callback(text);
        }
    }
}

impl std::fmt::Debug for OverlayListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayListener")
            .field("texts_changed", &self.texts_changed.is_some())
            .field("text_tapped", &self.text_tapped.is_some())
            .finish()
    }
}
