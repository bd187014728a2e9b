//! Screen identifiers.

use std::fmt;

use netpulse_config::View;

/// The two interchangeable views over the device set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Grid,
    Topology,
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 2] = [Self::Grid, Self::Topology];

    /// Number key that jumps to this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Grid => 1,
            Self::Topology => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Grid),
            2 => Some(Self::Topology),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Grid => Self::Topology,
            Self::Topology => Self::Grid,
        }
    }

    pub fn prev(self) -> Self {
        // Two screens: previous and next coincide.
        self.next()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::Topology => "Topology",
        }
    }
}

impl From<View> for ScreenId {
    fn from(view: View) -> Self {
        match view {
            View::Grid => Self::Grid,
            View::Topology => Self::Topology,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(3), None);
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(ScreenId::Grid.next(), ScreenId::Topology);
        assert_eq!(ScreenId::Topology.next(), ScreenId::Grid);
        assert_eq!(ScreenId::Grid.prev(), ScreenId::Topology);
    }

    #[test]
    fn configured_view_maps_to_screen() {
        assert_eq!(ScreenId::from(View::Topology), ScreenId::Topology);
        assert_eq!(ScreenId::from(View::default()), ScreenId::Grid);
    }
}
