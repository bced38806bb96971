//! Flag sets selecting render passes and redraw layers.

use core::ops::{BitOr, BitOrAssign};

/// Passes drawn by [`MeshPlot::draw`](crate::plot::MeshPlot::draw).
///
/// The wireframe is always drawn; everything else is opt-in.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawOptions(u8);

impl DrawOptions {
    /// Wireframe only.
    pub const NONE: Self = Self(0);
    /// Draw a point at every set sample.
    pub const POINTS: Self = Self(1 << 0);
    /// Color points by deviation from the mean.
    pub const COLORS: Self = Self(1 << 1);
    /// Invisible enlarged points carrying hit-test tags.
    pub const TAGS: Self = Self(1 << 2);
    /// Translucent marker over the highlighted point.
    pub const HIGHLIGHT: Self = Self(1 << 3);
    /// Scale heights to the sample range.
    pub const AUTOSCALE: Self = Self(1 << 4);

    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 != 0
    }

    /// `self` plus `other` when `enabled`.
    #[inline]
    #[must_use]
    pub const fn with_if(
        self,
        other: Self,
        enabled: bool,
    ) -> Self {
        if enabled { Self(self.0 | other.0) } else { self }
    }

    #[inline]
    pub const fn bits(self) -> u8 { self.0 }
}

impl BitOr for DrawOptions {
    type Output = Self;

    fn bitor(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DrawOptions {
    fn bitor_assign(
        &mut self,
        rhs: Self,
    ) {
        self.0 |= rhs.0;
    }
}

/// Screen layers requested by a redraw.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawPass(u8);

impl RedrawPass {
    /// Static content: cleared background and the touch skeleton.
    pub const BACKGROUND: Self = Self(1 << 0);
    /// Live content: readout and the sampled mesh.
    pub const FOREGROUND: Self = Self(1 << 1);
    /// Both layers.
    pub const ALL: Self = Self(Self::BACKGROUND.0 | Self::FOREGROUND.0);

    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for RedrawPass {
    type Output = Self;

    fn bitor(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0 | rhs.0)
    }
}
