//! Scroll container measurements, decoupled from any UI toolkit's events.

/// Scroll offset and visible height of the container hosting a table, in
/// pixels. A height of zero means the container has not been measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    pub scroll_top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Scrolled(f32),
    Resized(f32),
}

impl ViewportState {
    /// Negative values clamp to zero. NaN passes through so the windowing
    /// assertions still catch it.
    pub fn new(scroll_top: f32, height: f32) -> Self {
        Self {
            scroll_top: if scroll_top < 0.0 { 0.0 } else { scroll_top },
            height: if height < 0.0 { 0.0 } else { height },
        }
    }

    pub fn unmeasured() -> Self {
        Self::default()
    }

    pub fn is_measured(&self) -> bool {
        self.height > 0.0
    }

    pub fn apply(self, event: ViewportEvent) -> Self {
        match event {
            ViewportEvent::Scrolled(top) => Self::new(top, self.height),
            ViewportEvent::Resized(height) => Self::new(self.scroll_top, height),
        }
    }
}

type Observer = Box<dyn FnMut(&ViewportState)>;

/// Owns the current viewport and fans changes out to registered observers.
#[derive(Default)]
pub struct ViewportTracker {
    state: ViewportState,
    observers: Vec<Observer>,
}

impl ViewportTracker {
    pub fn new(state: ViewportState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ViewportState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Applies `event` and notifies observers. Returns `false` and stays
    /// silent when the event leaves the state unchanged.
    pub fn dispatch(&mut self, event: ViewportEvent) -> bool {
        let next = self.state.apply(event);
        if next == self.state {
            return false;
        }
        self.state = next;
        for observer in &mut self.observers {
            observer(&next);
        }
        true
    }
}

impl std::fmt::Debug for ViewportTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn t_vp_001_events_update_state() {
        let state = ViewportState::unmeasured();
        assert!(!state.is_measured());

        let state = state.apply(ViewportEvent::Resized(480.0));
        let state = state.apply(ViewportEvent::Scrolled(880.0));
        assert_eq!(state, ViewportState::new(880.0, 480.0));
        assert!(state.is_measured());
    }

    #[test]
    fn t_vp_002_overscroll_clamps_to_zero() {
        let state = ViewportState::new(100.0, 300.0).apply(ViewportEvent::Scrolled(-40.0));
        assert_eq!(state.scroll_top, 0.0);
    }

    #[test]
    fn t_vp_003_tracker_notifies_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ViewportTracker::default();
        let sink = Rc::clone(&seen);
        tracker.subscribe(move |state| sink.borrow_mut().push(*state));

        assert!(tracker.dispatch(ViewportEvent::Resized(480.0)));
        assert!(!tracker.dispatch(ViewportEvent::Resized(480.0)));
        assert!(tracker.dispatch(ViewportEvent::Scrolled(44.0)));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], ViewportState::new(44.0, 480.0));
        assert_eq!(tracker.state(), seen[1]);
    }
}
