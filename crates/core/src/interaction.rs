use std::time::Duration;

// std's Instant on native, a Performance-clock shim on wasm32.
use web_time::Instant;

use simview_protocol::{ControlIntent, PixelPos, Point};

use crate::viewport::Viewport;

/// Window in which a second click turns a pending single click into a
/// double click.
pub const CLICK_DELAY: Duration = Duration::from_millis(250);

/// Pointer travel (pixels) beyond which a press becomes a drag and the
/// click is suppressed.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

#[derive(Debug, Clone, Copy)]
struct DragState {
    press_pixel: PixelPos,
    press_offset: (f64, f64),
    /// Still a candidate click; cleared once the pointer travels past the
    /// drag threshold.
    clicking: bool,
}

/// Click-gesture debounce state. The deadline is plain data, not a timer:
/// cancellation is a field reset, so a cancelled gesture can never fire
/// and a fired gesture can never fire twice.
#[derive(Debug, Clone, Copy)]
enum ClickGesture {
    Idle,
    PendingSingle { deadline: Instant, world: Point },
}

/// Pointer/wheel gesture state machine.
///
/// Pan and zoom mutate the [`Viewport`] directly; click gestures emit
/// [`ControlIntent`]s. Single and double click are disambiguated with a
/// two-level debounce: the first clean release arms a deadline, and only
/// `poll` past that deadline emits the single-click intent — a second
/// clean release inside the window cancels it and emits the double-click
/// intent instead. This is the only mechanism telling the two gestures
/// apart on the same input device without racing against drags.
#[derive(Debug)]
pub struct InteractionController {
    drag: Option<DragState>,
    gesture: ClickGesture,
    /// An intent displaced by a new gesture before the host polled for it.
    pending_emit: Option<ControlIntent>,
    /// Cleared on teardown; a dead controller emits nothing.
    active: bool,
    click_delay: Duration,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            drag: None,
            gesture: ClickGesture::Idle,
            pending_emit: None,
            active: true,
            click_delay: CLICK_DELAY,
        }
    }

    /// Whether a drag is in progress (useful for cursor feedback).
    pub fn dragging(&self) -> bool {
        self.drag.is_some_and(|d| !d.clicking)
    }

    /// Pointer pressed: anchor a potential drag and mark a candidate click.
    pub fn on_press(&mut self, viewport: &Viewport, pixel: PixelPos) {
        self.drag = Some(DragState {
            press_pixel: pixel,
            press_offset: viewport.offset(),
            clicking: true,
        });
    }

    /// Pointer moved while pressed: past the threshold the press becomes a
    /// drag, the click is suppressed, and the offset is re-derived from the
    /// press anchor (not accumulated) so the view tracks the pointer
    /// exactly.
    pub fn on_move(&mut self, viewport: &mut Viewport, pixel: PixelPos) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let dx = pixel.x - drag.press_pixel.x;
        let dy = pixel.y - drag.press_pixel.y;
        if drag.clicking && (dx * dx + dy * dy).sqrt() > DRAG_THRESHOLD_PX {
            drag.clicking = false;
        }
        if !drag.clicking {
            viewport.set_offset(drag.press_offset.0 - dx, drag.press_offset.1 - dy);
        }
    }

    /// Wheel event: delegate to the transform's clamped zoom.
    pub fn on_wheel(&mut self, viewport: &mut Viewport, wheel_delta: f64) {
        viewport.zoom(wheel_delta);
    }

    /// Pointer released. A release that ends a drag emits nothing. A clean
    /// click either arms the single-click deadline or, inside the window,
    /// resolves to the double-click intent.
    pub fn on_release(
        &mut self,
        viewport: &Viewport,
        pixel: PixelPos,
        now: Instant,
    ) -> Option<ControlIntent> {
        let drag = self.drag.take()?;
        if !drag.clicking || !self.active {
            return None;
        }
        let world = viewport.to_world(pixel);
        match self.gesture {
            ClickGesture::PendingSingle { deadline, .. } if now < deadline => {
                // Second click inside the window: cancel the deadline.
                self.gesture = ClickGesture::Idle;
                Some(ControlIntent::SetGoal { x: world.x, y: world.y })
            }
            ClickGesture::PendingSingle { world: first, .. } => {
                // The deadline already expired but the host has not polled
                // yet; stash the single-click intent and start over.
                self.pending_emit = Some(ControlIntent::AddObstacle {
                    x: first.x,
                    y: first.y,
                });
                self.gesture = ClickGesture::PendingSingle {
                    deadline: now + self.click_delay,
                    world,
                };
                None
            }
            ClickGesture::Idle => {
                self.gesture = ClickGesture::PendingSingle {
                    deadline: now + self.click_delay,
                    world,
                };
                None
            }
        }
    }

    /// Drive the debounce clock; call once per frame. Emits the pending
    /// single-click intent when its deadline passes. Guaranteed no-op after
    /// teardown and after a cancellation.
    pub fn poll(&mut self, now: Instant) -> Option<ControlIntent> {
        if !self.active {
            self.pending_emit = None;
            self.gesture = ClickGesture::Idle;
            return None;
        }
        if let Some(intent) = self.pending_emit.take() {
            return Some(intent);
        }
        match self.gesture {
            ClickGesture::PendingSingle { deadline, world } if now >= deadline => {
                self.gesture = ClickGesture::Idle;
                Some(ControlIntent::AddObstacle { x: world.x, y: world.y })
            }
            _ => None,
        }
    }

    /// The sidebar's algorithm picker routes through the same intent
    /// stream as the click gestures.
    pub fn select_algorithm(name: &str) -> ControlIntent {
        ControlIntent::SelectAlgorithm {
            name: name.to_string(),
        }
    }

    /// Tear the controller down (view closed). Any armed deadline is
    /// cancelled; subsequent polls and releases are no-ops, not faults.
    pub fn teardown(&mut self) {
        self.active = false;
        self.drag = None;
        self.gesture = ClickGesture::Idle;
        self.pending_emit = None;
    }
}
