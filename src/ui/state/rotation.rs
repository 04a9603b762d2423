// SPDX-License-Identifier: MPL-2.0
//! Quarter-turn rotation of the previewed image.
//!
//! Rotation is purely presentational: it changes neither the scale nor the
//! pan offset, and always returns to 0° after a full turn.

use crate::domain::{Size, Vector};

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation angle restricted to 0°, 90°, 180° and 270°.
///
/// # Example
///
/// ```
/// use picture_selector::ui::state::{RotationAngle, RotationDirection};
///
/// let mut angle = RotationAngle::default();
/// for _ in 0..4 {
///     angle = angle.rotate(RotationDirection::Clockwise);
/// }
/// assert_eq!(angle, RotationAngle::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    /// No rotation.
    pub const ZERO: Self = Self(0);

    /// Builds an angle from a signed number of clockwise quarter turns.
    #[must_use]
    pub fn from_quarter_turns(turns: i32) -> Self {
        // rem_euclid keeps the result in 0..4 for negative turns
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let quarter = turns.rem_euclid(4) as u16;
        Self(quarter * 90)
    }

    /// The angle in degrees, one of 0, 90, 180 or 270.
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// The angle in degrees for a CSS-style `rotate()` transform.
    #[must_use]
    pub fn as_degrees_f32(self) -> f32 {
        f32::from(self.0)
    }

    /// Turns the angle a quarter in `direction`.
    #[must_use]
    pub fn rotate(self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => Self((self.0 + 90) % 360),
            RotationDirection::CounterClockwise => Self((self.0 + 270) % 360),
        }
    }

    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0
    }

    /// Applies the rotation to an offset in screen space (y axis down), so
    /// a positive angle turns clockwise on screen.
    #[must_use]
    pub fn apply(self, offset: Vector) -> Vector {
        match self.0 {
            90 => Vector::new(-offset.y, offset.x),
            180 => Vector::new(-offset.x, -offset.y),
            270 => Vector::new(offset.y, -offset.x),
            _ => offset,
        }
    }

    /// Undoes [`RotationAngle::apply`].
    #[must_use]
    pub fn invert(self, offset: Vector) -> Vector {
        Self((360 - self.0) % 360).apply(offset)
    }

    /// The on-screen bounding size of an image of `size` after rotation.
    #[must_use]
    pub fn oriented(self, size: Size) -> Size {
        if self.0 == 90 || self.0 == 270 {
            size.transposed()
        } else {
            size
        }
    }
}
