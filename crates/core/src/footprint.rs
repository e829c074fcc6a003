//! Rectangular footprint requests.

use crate::error::{Error, Result};
use crate::geometry::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a footprint, resolved by the caller's catalog.
pub type FootprintId = String;

/// One way of laying a footprint along a lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Extent along the lane direction.
    pub along: f64,
    /// Extent perpendicular to the lane, into the interior.
    pub across: f64,
    /// True if local X is turned 90° away from the lane direction.
    pub quarter_turn: bool,
}

/// A rectangular space requirement plus how many copies to place.
///
/// `length` runs along local X and `width` along local Y.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    id: FootprintId,
    length: f64,
    width: f64,

    /// `None` places as many as fit.
    count: Option<usize>,

    /// Gap after each copy; overrides the configured gap.
    gap: Option<f64>,

    /// Insertion point relative to the footprint center, in the local frame.
    base_offset: Vector2,

    rotatable: bool,
}

impl Footprint {
    /// Creates a footprint placed once.
    pub fn new(id: impl Into<FootprintId>, length: f64, width: f64) -> Self {
        Self {
            id: id.into(),
            length,
            width,
            count: Some(1),
            gap: None,
            base_offset: Vector2::zeros(),
            rotatable: true,
        }
    }

    /// Sets a fixed number of copies.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Places as many copies as the lanes hold.
    pub fn with_fill(mut self) -> Self {
        self.count = None;
        self
    }

    /// Overrides the configured gap for this footprint.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Sets the insertion point offset from the footprint center (local frame).
    pub fn with_base_offset(mut self, dx: f64, dy: f64) -> Self {
        self.base_offset = Vector2::new(dx, dy);
        self
    }

    /// Allows or forbids the 90° alternative orientation.
    pub fn with_rotation(mut self, rotatable: bool) -> Self {
        self.rotatable = rotatable;
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> &FootprintId {
        &self.id
    }

    /// Returns the length (local X).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the width (local Y).
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the requested count, `None` for fill.
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Returns true for a fill request.
    pub fn is_fill(&self) -> bool {
        self.count.is_none()
    }

    /// Returns the gap override.
    pub fn gap(&self) -> Option<f64> {
        self.gap
    }

    /// Returns the insertion point offset.
    pub fn base_offset(&self) -> &Vector2 {
        &self.base_offset
    }

    /// Returns whether the 90° alternative is allowed.
    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }

    /// Orientations in preference order: long axis along the lane first.
    ///
    /// A square or non-rotatable footprint has a single orientation.
    pub fn orientations(&self) -> Vec<Orientation> {
        let natural = Orientation {
            along: self.length,
            across: self.width,
            quarter_turn: false,
        };
        if !self.rotatable {
            return vec![natural];
        }

        let turned = Orientation {
            along: self.width,
            across: self.length,
            quarter_turn: true,
        };
        if self.length == self.width {
            vec![natural]
        } else if self.length > self.width {
            vec![natural, turned]
        } else {
            vec![turned, natural]
        }
    }

    /// Validates dimensions and gap.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.length) || !positive(self.width) {
            return Err(Error::DegenerateFootprint(format!(
                "Footprint '{}' has size {} x {}; length and width must be positive",
                self.id, self.length, self.width
            )));
        }

        if let Some(gap) = self.gap {
            if !gap.is_finite() || gap < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "Gap for footprint '{}' must be non-negative, got {}",
                    self.id, gap
                )));
            }
        }

        if !self.base_offset.x.is_finite() || !self.base_offset.y.is_finite() {
            return Err(Error::DegenerateFootprint(format!(
                "Footprint '{}' has a non-finite base offset",
                self.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientations_long_axis_first() {
        let wide = Footprint::new("wide", 2.0, 1.0);
        let o = wide.orientations();
        assert_eq!(o.len(), 2);
        assert_eq!((o[0].along, o[0].across, o[0].quarter_turn), (2.0, 1.0, false));
        assert_eq!((o[1].along, o[1].across, o[1].quarter_turn), (1.0, 2.0, true));

        let deep = Footprint::new("deep", 1.0, 3.0);
        let o = deep.orientations();
        assert_eq!((o[0].along, o[0].quarter_turn), (3.0, true));
        assert_eq!((o[1].along, o[1].quarter_turn), (1.0, false));
    }

    #[test]
    fn test_orientations_single() {
        assert_eq!(Footprint::new("sq", 2.0, 2.0).orientations().len(), 1);

        let fixed = Footprint::new("fixed", 1.0, 3.0).with_rotation(false);
        let o = fixed.orientations();
        assert_eq!(o.len(), 1);
        assert_eq!((o[0].along, o[0].quarter_turn), (1.0, false));
    }

    #[test]
    fn test_builders() {
        let fp = Footprint::new("rack", 2.0, 0.6)
            .with_count(4)
            .with_gap(0.5)
            .with_base_offset(-1.0, -0.3);
        assert_eq!(fp.id(), "rack");
        assert_eq!(fp.count(), Some(4));
        assert!(!fp.is_fill());
        assert_eq!(fp.gap(), Some(0.5));
        assert_eq!(*fp.base_offset(), Vector2::new(-1.0, -0.3));

        assert!(fp.with_fill().is_fill());
    }

    #[test]
    fn test_validation() {
        assert!(Footprint::new("ok", 2.0, 1.0).validate().is_ok());
        assert!(matches!(
            Footprint::new("zero", 0.0, 1.0).validate(),
            Err(Error::DegenerateFootprint(_))
        ));
        assert!(matches!(
            Footprint::new("neg", 2.0, -1.0).validate(),
            Err(Error::DegenerateFootprint(_))
        ));
        assert!(matches!(
            Footprint::new("inf", f64::INFINITY, 1.0).validate(),
            Err(Error::DegenerateFootprint(_))
        ));
        assert!(matches!(
            Footprint::new("gap", 2.0, 1.0).with_gap(-0.1).validate(),
            Err(Error::InvalidConfig(_))
        ));
    }
}
