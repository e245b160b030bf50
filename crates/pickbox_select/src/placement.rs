//! Popover placement
//!
//! The popover drops below the control unless there is not enough room for
//! a full-height popover below and there is room above. Placement is
//! resolved once per open so the popover never flips while it is showing.

use pickbox_core::geometry::Rect;

/// Maximum popover height; also the room required on either side
pub const POPOVER_MAX_HEIGHT: f32 = 250.0;

/// Which side of the control the popover renders on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    Up,
    #[default]
    Down,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Up => "up",
            Placement::Down => "down",
        }
    }
}

/// Resolve placement from the control's viewport-relative bounds
pub fn resolve_placement(control: Rect, viewport_height: f32) -> Placement {
    let space_below = viewport_height - control.bottom();
    let space_above = control.top();
    if space_below < POPOVER_MAX_HEIGHT && space_above > POPOVER_MAX_HEIGHT {
        Placement::Up
    } else {
        Placement::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: f32 = 800.0;

    #[test]
    fn test_top_of_viewport_drops_down() {
        let control = Rect::new(24.0, 80.0, 250.0, 40.0);
        assert_eq!(resolve_placement(control, VIEWPORT), Placement::Down);
    }

    #[test]
    fn test_bottom_of_viewport_drops_up() {
        let control = Rect::new(24.0, 736.0, 250.0, 40.0);
        assert_eq!(resolve_placement(control, VIEWPORT), Placement::Up);
    }

    #[test]
    fn test_cramped_both_ways_drops_down() {
        // 200 above, 160 below: neither side fits, keep the default
        let control = Rect::new(0.0, 200.0, 250.0, 40.0);
        assert_eq!(resolve_placement(control, 400.0), Placement::Down);
    }

    #[test]
    fn test_exact_cap_boundaries() {
        // exactly 250 below is enough room
        let control = Rect::new(0.0, 510.0, 250.0, 40.0);
        assert_eq!(resolve_placement(control, VIEWPORT), Placement::Down);

        // 249 below but exactly 250 above is not "more than" the cap
        let control = Rect::new(0.0, 250.0, 250.0, 40.0);
        assert_eq!(resolve_placement(control, 539.0), Placement::Down);

        let control = Rect::new(0.0, 251.0, 250.0, 40.0);
        assert_eq!(resolve_placement(control, 540.0), Placement::Up);
    }

    #[test]
    fn test_placement_names() {
        assert_eq!(Placement::Up.as_str(), "up");
        assert_eq!(Placement::default().as_str(), "down");
    }
}
