pub const LOADING_LABEL: &str = "Loading...";

/// Submit button state: its label and whether a request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingIndicator {
    label: String,
    loading: bool,
}

impl LoadingIndicator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            loading: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switch to the loading label. The original label comes back when the
    /// guard is dropped.
    pub fn start(&mut self) -> LoadingGuard<'_> {
        let original = std::mem::replace(&mut self.label, LOADING_LABEL.to_string());
        self.loading = true;
        LoadingGuard {
            indicator: self,
            original,
        }
    }
}

pub struct LoadingGuard<'a> {
    indicator: &'a mut LoadingIndicator,
    original: String,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.indicator.loading = false;
        self.indicator.label = std::mem::take(&mut self.original);
    }
}
