use crate::model::Element;

/// Elemental strength/weakness cycle. Unlisted pairings (and anything
/// involving Neutral) are 1.0.
pub fn modifier(attacker: Element, defender: Element) -> f64 {
    use Element::{Air, Earth, Fire, Water};
    match (attacker, defender) {
        (Fire, Earth) | (Water, Fire) | (Air, Water) | (Earth, Air) => 1.2,
        (Fire, Water) | (Water, Air) | (Air, Earth) | (Earth, Fire) => 0.8,
        _ => 1.0,
    }
}
