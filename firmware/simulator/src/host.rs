//! Screen host for the simulator window.

use bed_mesh_common::ScreenHost;

/// Collects refresh and navigation requests until the main loop acts on them.
pub struct SimHost {
    active: bool,
    refresh: bool,
    exit: bool,
}

impl SimHost {
    pub const fn new() -> Self {
        Self {
            active: true,
            refresh: true,
            exit: false,
        }
    }

    /// Take a pending refresh request.
    pub fn take_refresh(&mut self) -> bool { core::mem::take(&mut self.refresh) }

    /// The screen navigated back; there is nothing behind it, so the window closes.
    #[inline]
    pub const fn should_exit(&self) -> bool { self.exit }
}

impl ScreenHost for SimHost {
    fn is_active(&self) -> bool { self.active }

    fn request_refresh(&mut self) { self.refresh = true; }

    fn go_back(&mut self) {
        self.active = false;
        self.exit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_is_taken_once() {
        let mut host = SimHost::new();
        assert!(host.take_refresh(), "First frame is always drawn");
        assert!(!host.take_refresh());

        host.request_refresh();
        assert!(host.take_refresh());
        assert!(!host.take_refresh());
    }

    #[test]
    fn test_go_back_exits() {
        let mut host = SimHost::new();
        assert!(host.is_active());
        host.go_back();
        assert!(!host.is_active());
        assert!(host.should_exit());
    }
}
