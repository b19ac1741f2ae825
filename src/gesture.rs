use crate::queue::Decision;

pub const SWIPE_THRESHOLD: f64 = 80.0;
pub const DRAG_TAP_SLOP: f64 = 20.0;
pub const TOUCH_TAP_SLOP: f64 = 40.0;
pub const DIRECTION_HINT_SLOP: f64 = 10.0;
pub const WHEEL_THRESHOLD: f64 = 60.0;
pub const WHEEL_IDLE_MS: f64 = 200.0;
pub const WHEEL_MIN_DELTA_X: f64 = 5.0;
pub const WHEEL_VISUAL_SCALE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Commit(Decision),
    Tap,
    SnapBack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pointer_id: i32,
    start_x: f64,
    current_x: f64,
}

impl DragGesture {
    pub fn begin(pointer_id: i32, x: f64) -> Self {
        Self {
            pointer_id,
            start_x: x,
            current_x: x,
        }
    }

    pub fn matches(&self, pointer_id: i32) -> bool {
        self.pointer_id == pointer_id
    }

    pub fn track(&mut self, pointer_id: i32, x: f64) -> bool {
        if !self.matches(pointer_id) {
            return false;
        }
        self.current_x = x;
        true
    }

    pub fn delta(&self) -> f64 {
        self.current_x - self.start_x
    }

    pub fn hint(&self) -> Option<Decision> {
        let delta = self.delta();
        if delta > DIRECTION_HINT_SLOP {
            Some(Decision::Like)
        } else if delta < -DIRECTION_HINT_SLOP {
            Some(Decision::Dislike)
        } else {
            None
        }
    }

    pub fn release(&self, pointer_id: i32) -> Option<SwipeOutcome> {
        if !self.matches(pointer_id) {
            return None;
        }
        let delta = self.delta();
        Some(if delta > SWIPE_THRESHOLD {
            SwipeOutcome::Commit(Decision::Like)
        } else if delta < -SWIPE_THRESHOLD {
            SwipeOutcome::Commit(Decision::Dislike)
        } else if delta.abs() < DRAG_TAP_SLOP {
            SwipeOutcome::Tap
        } else {
            SwipeOutcome::SnapBack
        })
    }
}

// Touch moves stay with the browser; only the start and end x matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchGesture {
    start_x: f64,
}

impl TouchGesture {
    pub fn begin(x: f64) -> Self {
        Self { start_x: x }
    }

    // A second concurrent finger voids the pending swipe; it must not
    // commit on release.
    pub fn arm(active_touches: u32, x: f64) -> Option<Self> {
        (active_touches == 1).then(|| Self::begin(x))
    }

    pub fn release(&self, x: f64) -> SwipeOutcome {
        let delta = x - self.start_x;
        if delta > SWIPE_THRESHOLD {
            SwipeOutcome::Commit(Decision::Like)
        } else if delta < -SWIPE_THRESHOLD {
            SwipeOutcome::Commit(Decision::Dislike)
        } else if delta.abs() < TOUCH_TAP_SLOP {
            SwipeOutcome::Tap
        } else {
            SwipeOutcome::SnapBack
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelOutcome {
    Ignored,
    Tracking(f64),
    Commit(Decision),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelAccumulator {
    accum: f64,
    last_event_ms: f64,
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self {
            accum: 0.0,
            last_event_ms: f64::NEG_INFINITY,
        }
    }

    pub fn feed(&mut self, delta_x: f64, delta_y: f64, now_ms: f64) -> WheelOutcome {
        let horizontal = delta_x.abs() > delta_y.abs();
        // Vertical scroll passes through and must not extend the idle window.
        if !horizontal && delta_x.abs() < WHEEL_MIN_DELTA_X {
            return WheelOutcome::Ignored;
        }
        if now_ms - self.last_event_ms > WHEEL_IDLE_MS {
            self.accum = 0.0;
        }
        self.last_event_ms = now_ms;
        self.accum += delta_x;
        if self.accum > WHEEL_THRESHOLD {
            self.accum = 0.0;
            WheelOutcome::Commit(Decision::Like)
        } else if self.accum < -WHEEL_THRESHOLD {
            self.accum = 0.0;
            WheelOutcome::Commit(Decision::Dislike)
        } else {
            WheelOutcome::Tracking(self.offset())
        }
    }

    pub fn offset(&self) -> f64 {
        self.accum * WHEEL_VISUAL_SCALE
    }

    pub fn reset(&mut self) {
        self.accum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_past_the_threshold_commits_a_like() {
        let mut drag = DragGesture::begin(7, 100.0);
        assert!(drag.track(7, 190.0));
        assert_eq!(drag.release(7), Some(SwipeOutcome::Commit(Decision::Like)));
    }

    #[test]
    fn drag_left_past_the_threshold_commits_a_dislike() {
        let mut drag = DragGesture::begin(7, 100.0);
        drag.track(7, 10.0);
        assert_eq!(
            drag.release(7),
            Some(SwipeOutcome::Commit(Decision::Dislike))
        );
    }

    #[test]
    fn mid_range_drag_snaps_back_with_no_commit() {
        let mut drag = DragGesture::begin(7, 100.0);
        drag.track(7, 150.0);
        assert_eq!(drag.release(7), Some(SwipeOutcome::SnapBack));
    }

    #[test]
    fn short_drag_is_a_tap() {
        let mut drag = DragGesture::begin(7, 100.0);
        drag.track(7, 110.0);
        assert_eq!(drag.release(7), Some(SwipeOutcome::Tap));
    }

    #[test]
    fn other_pointers_neither_move_nor_finish_the_drag() {
        let mut drag = DragGesture::begin(7, 100.0);
        assert!(!drag.track(9, 400.0));
        assert_eq!(drag.delta(), 0.0);
        assert_eq!(drag.release(9), None);
    }

    #[test]
    fn hint_appears_past_the_direction_slop() {
        let mut drag = DragGesture::begin(1, 0.0);
        drag.track(1, 8.0);
        assert_eq!(drag.hint(), None);
        drag.track(1, 12.0);
        assert_eq!(drag.hint(), Some(Decision::Like));
        drag.track(1, -15.0);
        assert_eq!(drag.hint(), Some(Decision::Dislike));
    }

    #[test]
    fn touch_swipe_thresholds_mirror_the_drag_commit_band() {
        assert_eq!(
            TouchGesture::begin(50.0).release(140.0),
            SwipeOutcome::Commit(Decision::Like)
        );
        assert_eq!(
            TouchGesture::begin(150.0).release(60.0),
            SwipeOutcome::Commit(Decision::Dislike)
        );
    }

    #[test]
    fn touch_tap_band_is_wider_than_the_drag_one() {
        assert_eq!(TouchGesture::begin(100.0).release(130.0), SwipeOutcome::Tap);
        assert_eq!(
            TouchGesture::begin(100.0).release(160.0),
            SwipeOutcome::SnapBack
        );
    }

    #[test]
    fn a_second_concurrent_touch_voids_the_pending_swipe() {
        let mut pending = TouchGesture::arm(1, 100.0);
        assert!(pending.is_some());

        // The second finger lands while the first is mid-swipe, past
        // the commit threshold. Nothing is left to release.
        pending = TouchGesture::arm(2, 230.0);
        assert_eq!(pending, None);

        assert_eq!(TouchGesture::arm(1, 60.0), Some(TouchGesture::begin(60.0)));
    }

    #[test]
    fn quick_wheel_ticks_accumulate_into_a_commit() {
        let mut wheel = WheelAccumulator::new();
        assert_eq!(wheel.feed(20.0, 0.0, 0.0), WheelOutcome::Tracking(10.0));
        assert_eq!(wheel.feed(25.0, 0.0, 50.0), WheelOutcome::Tracking(22.5));
        assert_eq!(
            wheel.feed(20.0, 0.0, 100.0),
            WheelOutcome::Commit(Decision::Like)
        );
        assert_eq!(wheel.offset(), 0.0);
    }

    #[test]
    fn leftward_wheel_travel_commits_a_dislike() {
        let mut wheel = WheelAccumulator::new();
        wheel.feed(-40.0, 0.0, 0.0);
        assert_eq!(
            wheel.feed(-30.0, 0.0, 80.0),
            WheelOutcome::Commit(Decision::Dislike)
        );
    }

    #[test]
    fn idle_gap_discards_earlier_travel() {
        let mut wheel = WheelAccumulator::new();
        assert_eq!(wheel.feed(40.0, 0.0, 0.0), WheelOutcome::Tracking(20.0));
        assert_eq!(wheel.feed(40.0, 0.0, 301.0), WheelOutcome::Tracking(20.0));
    }

    #[test]
    fn vertical_scroll_is_ignored_and_does_not_keep_travel_alive() {
        let mut wheel = WheelAccumulator::new();
        wheel.feed(40.0, 0.0, 0.0);
        assert_eq!(wheel.feed(2.0, 50.0, 100.0), WheelOutcome::Ignored);
        // The ignored event left the window closed, so this starts over.
        assert_eq!(wheel.feed(30.0, 0.0, 250.0), WheelOutcome::Tracking(15.0));
    }

    #[test]
    fn diagonal_scroll_with_real_horizontal_travel_accumulates() {
        let mut wheel = WheelAccumulator::new();
        assert_eq!(wheel.feed(10.0, 50.0, 0.0), WheelOutcome::Tracking(5.0));
    }

    #[test]
    fn reset_clears_the_visual_offset() {
        let mut wheel = WheelAccumulator::new();
        wheel.feed(40.0, 0.0, 0.0);
        wheel.reset();
        assert_eq!(wheel.offset(), 0.0);
    }
}
