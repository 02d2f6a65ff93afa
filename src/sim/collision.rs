//! Catch/miss detection
//!
//! Pure functions over entity rectangles; the tick applies the outcome.

use super::state::Entity;

/// What happened to the falling object this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Still falling, nothing touched
    None,
    /// Passed the bottom edge uncaught
    Miss,
    /// Landed in the crate
    Catch,
}

/// Axis-aligned overlap test; touching edges do not count
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// The object's top edge is strictly below the screen
///
/// Fires up to one frame's fall after the object leaves the visible area.
#[inline]
pub fn is_miss(object: &Entity, screen_height: f32) -> bool {
    object.pos.y > screen_height
}

/// Classify a frame. Miss wins over catch.
pub fn evaluate(player: &Entity, object: &Entity, screen_height: f32) -> Outcome {
    if is_miss(object, screen_height) {
        Outcome::Miss
    } else if overlaps(player, object) {
        Outcome::Catch
    } else {
        Outcome::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32) -> Entity {
        Entity::new(Vec2::new(x, 340.0), 60.0)
    }

    fn object_at(x: f32, y: f32) -> Entity {
        Entity::new(Vec2::new(x, y), 40.0)
    }

    #[test]
    fn test_overlap_catch() {
        let result = evaluate(&player_at(270.0), &object_at(270.0, 304.0), 400.0);
        assert_eq!(result, Outcome::Catch);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Object bottom exactly on player top
        assert!(!overlaps(&player_at(270.0), &object_at(270.0, 300.0)));
        // Object right edge exactly on player left
        assert!(!overlaps(&player_at(270.0), &object_at(230.0, 350.0)));
        // One pixel in on each axis
        assert!(overlaps(&player_at(270.0), &object_at(231.0, 301.0)));
    }

    #[test]
    fn test_miss_threshold_is_strict() {
        assert!(!is_miss(&object_at(0.0, 400.0), 400.0));
        assert!(is_miss(&object_at(0.0, 400.5), 400.0));
    }

    #[test]
    fn test_miss_beats_catch() {
        // A tall player reaching past the bottom edge still loses to the miss rule
        let player = Entity {
            pos: Vec2::new(0.0, 340.0),
            size: Vec2::new(60.0, 200.0),
        };
        let object = object_at(0.0, 404.0);
        assert!(overlaps(&player, &object));
        assert_eq!(evaluate(&player, &object, 400.0), Outcome::Miss);
    }

    #[test]
    fn test_nothing_while_falling() {
        assert_eq!(
            evaluate(&player_at(270.0), &object_at(0.0, 100.0), 400.0),
            Outcome::None
        );
    }
}
