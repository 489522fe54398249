use simview_protocol::{PixelPos, Point, ScreenSize, ViewConfig};

/// Wheel delta divisor: `scale` changes by `delta * scale / 2500` per event.
const WHEEL_ZOOM_DIVISOR: f64 = 2500.0;

/// The world↔pixel mapping for the viewport.
///
/// `scale` is pixels per world unit; `offset` is the pixel displacement of
/// the world origin from the screen center. World y points up, screen y
/// points down, so the y axis flips in both conversions. The transform is
/// mutated only by the interaction layer and read by the render loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
    initial_scale: f64,
    min_scale: f64,
    max_scale: f64,
    screen: ScreenSize,
}

impl Viewport {
    pub fn new(config: &ViewConfig, screen: ScreenSize) -> Self {
        let scale = config
            .initial_scale
            .clamp(config.min_scale, config.max_scale);
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale,
            initial_scale: scale,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            screen,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Follow a host resize notification.
    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    /// Pixel position of the world origin.
    pub fn origin_pixel(&self) -> PixelPos {
        PixelPos::new(
            self.screen.width / 2.0 - self.offset_x,
            self.screen.height / 2.0 - self.offset_y,
        )
    }

    pub fn to_pixel(&self, world: Point) -> PixelPos {
        PixelPos::new(
            self.screen.width / 2.0 - self.offset_x + world.x * self.scale,
            self.screen.height / 2.0 - self.offset_y - world.y * self.scale,
        )
    }

    pub fn to_world(&self, pixel: PixelPos) -> Point {
        Point::new(
            (pixel.x - self.screen.width / 2.0 + self.offset_x) / self.scale,
            -(pixel.y - self.screen.height / 2.0 + self.offset_y) / self.scale,
        )
    }

    /// Shift the view by a pixel delta; dragging right moves the view right.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.offset_x -= delta_x;
        self.offset_y -= delta_y;
    }

    /// Set the offset directly (used by the drag gesture, which re-derives
    /// the offset from the press anchor instead of accumulating deltas).
    pub fn set_offset(&mut self, offset_x: f64, offset_y: f64) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
    }

    /// Apply a wheel event. A positive delta (wheel down) zooms out.
    ///
    /// When the new scale is inside the bounds, the offset is rescaled so
    /// the world point at the viewport's pixel origin stays put — zoom is
    /// anchored to the origin-relative pan, not the cursor. When the scale
    /// clamps at a bound, the offset is deliberately left unchanged to
    /// avoid a visual jump at the limit.
    pub fn zoom(&mut self, wheel_delta: f64) {
        let raw = self.scale - wheel_delta * self.scale / WHEEL_ZOOM_DIVISOR;
        let clamped = raw.clamp(self.min_scale, self.max_scale);
        if clamped == raw {
            let factor = clamped / self.scale;
            self.offset_x *= factor;
            self.offset_y *= factor;
        }
        self.scale = clamped;
    }

    /// Reset to the default view (the "home" command).
    pub fn home(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.scale = self.initial_scale;
    }
}
