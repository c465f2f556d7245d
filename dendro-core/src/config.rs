use std::f32::consts::{FRAC_PI_2, PI};

/// Direction the dendrogram grows towards, starting from its root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    /// Rotation angle in radians applied to the laid out lines.
    pub fn angle(self) -> f32 {
        match self {
            Self::Right => 0.0,
            Self::Left => PI,
            Self::Up => FRAC_PI_2,
            Self::Down => -FRAC_PI_2,
        }
    }

    /// Whether path length ends up on the vertical axis.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DendrogramConfig {
    /// Scale line widths by segment diameter instead of drawing them uniform.
    pub show_diameters: bool,
    pub rotation: Rotation,
}

impl Default for DendrogramConfig {
    fn default() -> Self {
        Self {
            show_diameters: false,
            rotation: Rotation::Right,
        }
    }
}
