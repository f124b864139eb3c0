//! Mouse pointer and arrow-key cursor positions.

use keyrepl_hid::{Key, RolloverTracker};

/// Smallest pointer size the wheel can shrink to.
pub const MIN_POINTER_SIZE: i16 = 10;
/// Largest pointer size the wheel can grow to.
pub const MAX_POINTER_SIZE: i16 = 100;

/// Integer screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamps the point into `[0, width) x [0, height)`.
    #[must_use]
    pub fn clamp(self, bounds: Bounds) -> Self {
        Self {
            x: self.x.clamp(0, bounds.width.saturating_sub(1).max(0)),
            y: self.y.clamp(0, bounds.height.saturating_sub(1).max(0)),
        }
    }

    /// Returns the point offset by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Size of the drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Bounds {
    /// Centre of the area.
    pub const fn center(self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

/// Mouse pointer driven by relative HID mouse reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    /// Current position.
    pub position: Point,
    /// Drawn size, adjusted by the wheel.
    pub size: i16,
    /// Button bits from the last report.
    pub buttons: u8,
}

impl Pointer {
    /// Creates a pointer at the centre of `bounds`.
    pub const fn new(bounds: Bounds) -> Self {
        Self {
            position: bounds.center(),
            size: MIN_POINTER_SIZE,
            buttons: 0,
        }
    }

    /// Applies one mouse report.
    ///
    /// Scrolling up (positive wheel) shrinks the pointer.
    pub fn apply(&mut self, dx: i8, dy: i8, buttons: u8, wheel: i8, bounds: Bounds) {
        self.position = self
            .position
            .offset(i32::from(dx), i32::from(dy))
            .clamp(bounds);
        self.size = self
            .size
            .saturating_sub(i16::from(wheel))
            .clamp(MIN_POINTER_SIZE, MAX_POINTER_SIZE);
        self.buttons = buttons;
    }
}

/// Cursor moved one step per frame by held arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCursor {
    /// Current position.
    pub position: Point,
}

impl KeyCursor {
    /// Creates a cursor at the centre of `bounds`.
    pub const fn new(bounds: Bounds) -> Self {
        Self {
            position: bounds.center(),
        }
    }

    /// Moves one step for every arrow key that is down.
    pub fn step(&mut self, keys: &RolloverTracker, bounds: Bounds) {
        let mut position = self.position;
        if keys.is_pressed_or_held(Key::ArrowUp) {
            position = position.offset(0, -1);
        }
        if keys.is_pressed_or_held(Key::ArrowDown) {
            position = position.offset(0, 1);
        }
        if keys.is_pressed_or_held(Key::ArrowLeft) {
            position = position.offset(-1, 0);
        }
        if keys.is_pressed_or_held(Key::ArrowRight) {
            position = position.offset(1, 0);
        }
        self.position = position.clamp(bounds);
    }
}
