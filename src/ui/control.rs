use tracing::debug;

/// A triggering control such as the "Analyze Captured Image" button.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    idle_label: String,
    busy_label: String,
    label: String,
    enabled: bool,
}

impl Control {
    pub fn new(idle_label: impl Into<String>, busy_label: impl Into<String>) -> Self {
        let idle_label = idle_label.into();
        Self {
            label: idle_label.clone(),
            idle_label,
            busy_label: busy_label.into(),
            enabled: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disables the control until the returned guard is dropped.
    pub fn busy(&mut self) -> BusyGuard<'_> {
        self.enabled = false;
        self.label = self.busy_label.clone();
        debug!("Control '{}' busy", self.idle_label);
        BusyGuard { control: self }
    }

    fn restore(&mut self) {
        self.enabled = true;
        self.label = self.idle_label.clone();
        debug!("Control '{}' idle", self.idle_label);
    }
}

pub struct BusyGuard<'a> {
    control: &'a mut Control,
}

impl BusyGuard<'_> {
    pub fn control(&self) -> &Control {
        self.control
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.restore();
    }
}

/// Full-page loading indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadingOverlay {
    visible: bool,
}

impl LoadingOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) -> OverlayGuard<'_> {
        self.visible = true;
        OverlayGuard { overlay: self }
    }
}

pub struct OverlayGuard<'a> {
    overlay: &'a mut LoadingOverlay,
}

impl OverlayGuard<'_> {
    pub fn is_visible(&self) -> bool {
        self.overlay.visible
    }
}

impl Drop for OverlayGuard<'_> {
    fn drop(&mut self) {
        self.overlay.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_guard_restores_on_drop() {
        let mut control = Control::new("Analyze Captured Image", "Processing...");
        {
            let guard = control.busy();
            assert!(!guard.control().is_enabled());
            assert_eq!(guard.control().label(), "Processing...");
        }
        assert!(control.is_enabled());
        assert_eq!(control.label(), "Analyze Captured Image");
    }

    #[test]
    fn busy_guard_restores_on_early_return() {
        fn fails(control: &mut Control) -> Result<(), &'static str> {
            let _busy = control.busy();
            Err("network down")
        }
        let mut control = Control::new("Get AI Recommendations", "Generating...");
        assert!(fails(&mut control).is_err());
        assert!(control.is_enabled());
    }

    #[test]
    fn overlay_hides_on_drop() {
        let mut overlay = LoadingOverlay::default();
        {
            let guard = overlay.show();
            assert!(guard.is_visible());
        }
        assert!(!overlay.is_visible());
    }
}
