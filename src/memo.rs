use glam::IVec2;

use crate::types::*;

/// Last queried position of one entity and the directions found blocked there.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoEntry {
    pub last: IVec2,
    pub flags: DirectionFlags,
}

impl MemoEntry {
    /// True only if `dir` was found blocked at exactly `pos` and not invalidated since.
    pub fn hit(&self, pos: IVec2, dir: Direction) -> bool {
        self.last == pos && self.flags.contains(dir)
    }

    /// Record a fresh verdict for `dir`.
    ///
    /// Other direction bits are kept while the entity stays put. Moving
    /// drops them: they describe the old position.
    pub fn record(&mut self, pos: IVec2, dir: Direction, blocked: bool) {
        if self.last != pos {
            self.last = pos;
            self.flags = DirectionFlags::empty();
        }
        self.flags.set(dir, blocked);
    }
}

/// Fixed-capacity table of memo entries, one per entity slot.
#[derive(Clone, Debug)]
pub struct CollisionMemo {
    entries: Box<[MemoEntry]>,
}

impl CollisionMemo {
    pub fn new(capacity: usize) -> Self {
        Self { entries: vec![MemoEntry::default(); capacity].into_boxed_slice() }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Result<&MemoEntry, CollisionError> {
        let capacity = self.capacity();
        self.entries.get(index).ok_or(CollisionError::InvalidEntityIndex { index, capacity })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut MemoEntry, CollisionError> {
        let capacity = self.capacity();
        self.entries.get_mut(index).ok_or(CollisionError::InvalidEntityIndex { index, capacity })
    }

    /// Forget one entity's cached verdicts (e.g. after a respawn).
    pub fn reset(&mut self, index: usize) -> Result<(), CollisionError> {
        *self.get_mut(index)? = MemoEntry::default();
        log::debug!("collision memo slot {index} reset");
        Ok(())
    }

    /// Forget everything; call when the level grid changes.
    pub fn clear(&mut self) {
        self.entries.fill(MemoEntry::default());
        log::debug!("collision memo cleared ({} slots)", self.capacity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let m = CollisionMemo::new(2);
        for i in 0..2 {
            let e = m.get(i).unwrap();
            assert_eq!(e.last, IVec2::ZERO);
            assert_eq!(e.flags.bits(), 0);
        }
    }

    #[test]
    fn test_out_of_range_slot() {
        let mut m = CollisionMemo::new(2);
        assert_eq!(m.get(2), Err(CollisionError::InvalidEntityIndex { index: 2, capacity: 2 }));
        assert!(m.get_mut(7).is_err());
        assert!(m.reset(2).is_err());
    }

    #[test]
    fn test_record_and_hit() {
        let mut e = MemoEntry::default();
        let p = IVec2::new(0, 16);
        e.record(p, Direction::Left, true);
        e.record(p, Direction::Down, false);
        assert!(e.hit(p, Direction::Left));
        assert!(!e.hit(p, Direction::Down));
        assert!(!e.hit(IVec2::new(1, 16), Direction::Left));
        e.record(IVec2::new(1, 16), Direction::Up, false);
        assert_eq!(e.flags.bits(), 0);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut m = CollisionMemo::new(2);
        m.get_mut(0).unwrap().record(IVec2::new(5, 5), Direction::Up, true);
        m.get_mut(1).unwrap().record(IVec2::new(6, 6), Direction::Up, true);
        m.reset(0).unwrap();
        assert_eq!(*m.get(0).unwrap(), MemoEntry::default());
        assert!(m.get(1).unwrap().hit(IVec2::new(6, 6), Direction::Up));
        m.clear();
        assert_eq!(*m.get(1).unwrap(), MemoEntry::default());
    }
}
