use crate::{Extent, Window, geometry};

/// Default quiet period after the last scroll/resize event before focus is restored.
pub const DEFAULT_FOCUS_RESTORE_DELAY_MS: u64 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

/// Scroll offset and viewport geometry read from the host for one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollSample {
    pub scroll_top: u64,
    pub viewport: Extent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEvent {
    Scroll(ScrollSample),
    Resize(ScrollSample),
    /// Clock advance; fires the debounce timer when its quiet period has elapsed.
    Tick,
    /// Unmount: drops any pending timer.
    Cancel,
}

/// Inputs to the window computation that do not come from the event itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowParams {
    pub row_height: u32,
    pub row_count: usize,
    pub overscan_factor: f32,
}

impl WindowParams {
    pub fn window_for(&self, sample: ScrollSample) -> Window {
        geometry::compute_window(
            sample.scroll_top,
            sample.viewport.height,
            self.row_height,
            self.row_count,
            self.overscan_factor,
        )
    }
}

/// Outcome of feeding one event to a [`ScrollMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: ScrollPhase,
    pub to: ScrollPhase,
    pub window_changed: bool,
    /// The debounce timer fired: the caller should run focus restoration now.
    pub restore_focus: bool,
}

/// A single cancellable deadline, owned by one table instance.
///
/// Restarting replaces the pending deadline, so at most one firing is ever pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTimer {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl DebounceTimer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Returns `true` exactly once, on the first call at or after the deadline.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// Owns the current window and the scrolling phase of one table instance.
///
/// Transition table:
///
/// | phase     | event            | next      | effects                            |
/// |-----------|------------------|-----------|------------------------------------|
/// | any       | `Scroll`/`Resize`| Scrolling | recompute window, restart timer    |
/// | Scrolling | `Tick`, due      | Idle      | request focus restoration          |
/// | Scrolling | `Tick`, not due  | Scrolling | none                               |
/// | Idle      | `Tick`           | Idle      | none                               |
/// | any       | `Cancel`         | Idle      | cancel timer                       |
///
/// Window recomputation is synchronous: after [`ScrollMachine::handle`] returns,
/// [`ScrollMachine::window`] reflects the event. The timer only gates focus restoration.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollMachine {
    phase: ScrollPhase,
    window: Window,
    sample: ScrollSample,
    timer: DebounceTimer,
}

impl ScrollMachine {
    pub fn new(focus_restore_delay_ms: u64) -> Self {
        Self {
            phase: ScrollPhase::Idle,
            window: Window::EMPTY,
            sample: ScrollSample::default(),
            timer: DebounceTimer::new(focus_restore_delay_ms),
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// The scroll offset and viewport of the last applied event.
    pub fn sample(&self) -> ScrollSample {
        self.sample
    }

    pub fn timer(&self) -> &DebounceTimer {
        &self.timer
    }

    pub fn set_focus_restore_delay_ms(&mut self, delay_ms: u64) {
        self.timer.set_delay_ms(delay_ms);
    }

    pub fn handle(&mut self, event: ScrollEvent, params: &WindowParams, now_ms: u64) -> Transition {
        let from = self.phase;
        match event {
            ScrollEvent::Scroll(sample) | ScrollEvent::Resize(sample) => {
                self.sample = sample;
                let window_changed = self.replace_window(params.window_for(sample));
                self.phase = ScrollPhase::Scrolling;
                self.timer.restart(now_ms);
                ttrace!(
                    scroll_top = sample.scroll_top,
                    viewport_height = sample.viewport.height,
                    start_index = self.window.start_index,
                    end_index = self.window.end_index,
                    "scroll event"
                );
                Transition {
                    from,
                    to: self.phase,
                    window_changed,
                    restore_focus: false,
                }
            }
            ScrollEvent::Tick => {
                let fired = self.phase == ScrollPhase::Scrolling && self.timer.fire_if_due(now_ms);
                if fired {
                    self.phase = ScrollPhase::Idle;
                }
                Transition {
                    from,
                    to: self.phase,
                    window_changed: false,
                    restore_focus: fired,
                }
            }
            ScrollEvent::Cancel => {
                self.timer.cancel();
                self.phase = ScrollPhase::Idle;
                Transition {
                    from,
                    to: self.phase,
                    window_changed: false,
                    restore_focus: false,
                }
            }
        }
    }

    /// Recomputes the window from the last sample, e.g. after the row count changed.
    ///
    /// Does not touch the phase or the timer. Returns whether the window changed.
    pub fn recompute(&mut self, params: &WindowParams) -> bool {
        self.replace_window(params.window_for(self.sample))
    }

    fn replace_window(&mut self, next: Window) -> bool {
        let changed = self.window != next;
        self.window = next;
        changed
    }
}
