//! Where the popover form goes relative to the control that opened it.
//!
//! Coordinates are document coordinates in logical pixels: the trigger
//! rectangle is on-screen, and the viewport scroll offsets are added back.

/// Viewports narrower than this are laid out as mobile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
/// Distance from the viewport edges of the mobile form.
pub const MOBILE_INSET: f64 = 20.0;
/// Vertical gap between the trigger and the desktop form.
pub const ANCHOR_GAP: f64 = 8.0;
pub const DESKTOP_MIN_WIDTH: f64 = 300.0;
/// Desktop form width limit, as a share of the viewport width.
pub const DESKTOP_MAX_WIDTH_RATIO: f64 = 0.9;

/// On-screen bounding box of a control.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width() / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(self, scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            scroll_x,
            scroll_y,
            ..self
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }
}

/// Computed position of the form. `top`/`left` are fixed when the form
/// opens; only `is_mobile` follows later viewport changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub is_mobile: bool,
}

/// Box the form should be drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    /// Stretched across the viewport, `inset` from the left and right edges.
    FullWidth { inset: f64, width: f64 },
    /// Horizontally centred on `left` (shifted by half its own width).
    Anchored { min_width: f64, max_width: f64 },
}

/// Places the form for a click on `trigger`.
pub fn place(trigger: &Rect, viewport: &Viewport) -> Placement {
    if viewport.is_mobile() {
        Placement {
            top: MOBILE_INSET,
            left: MOBILE_INSET,
            is_mobile: true,
        }
    } else {
        Placement {
            top: trigger.bottom + viewport.scroll_y + ANCHOR_GAP,
            left: trigger.center_x() + viewport.scroll_x,
            is_mobile: false,
        }
    }
}

impl Placement {
    /// Re-classifies the viewport without moving the form.
    pub fn resized(self, viewport: &Viewport) -> Self {
        Self {
            is_mobile: viewport.is_mobile(),
            ..self
        }
    }

    pub fn layout(&self, viewport: &Viewport) -> Layout {
        if self.is_mobile {
            Layout::FullWidth {
                inset: MOBILE_INSET,
                width: (viewport.width - 2.0 * MOBILE_INSET).max(0.0),
            }
        } else {
            Layout::Anchored {
                min_width: DESKTOP_MIN_WIDTH,
                max_width: viewport.width * DESKTOP_MAX_WIDTH_RATIO,
            }
        }
    }
}
