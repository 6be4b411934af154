//! Identifiers for loaded animations.

use serde::{Deserialize, Serialize};

/// Identifies one loaded animation. Library callbacks carry the id of the
/// animation that raised them so stale callbacks can be told apart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u32);

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for `AnimationId`.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_animation: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_animation(&mut self) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation = self.next_animation.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.alloc_animation(), AnimationId(0));
        assert_eq!(ids.alloc_animation(), AnimationId(1));
        assert_eq!(AnimationId(7).to_string(), "#7");
    }
}
