use std::collections::{BTreeSet, HashMap};

use blake3::Hash;

use crate::error::{FolioError, Result};
use crate::geometry::Rect;
use crate::layout::ZoneId;

/// Last known rect and lines for one zone. `lines` are already fitted to the
/// zone width by the caller.
#[derive(Debug, Clone)]
pub struct ZoneState {
    pub rect: Rect,
    pub lines: Vec<String>,
    hash: Option<Hash>,
    pub is_dirty: bool,
}

impl ZoneState {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            lines: Vec::new(),
            hash: None,
            is_dirty: true,
        }
    }

    fn update_lines(&mut self, lines: Vec<String>) {
        let new_hash = hash_lines(&lines);
        if self.hash != Some(new_hash) {
            self.lines = lines;
            self.hash = Some(new_hash);
            self.is_dirty = true;
        }
    }
}

fn hash_lines(lines: &[String]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for line in lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize()
}

/// Registry mapping frame zones to their last rendered state. Only zones whose
/// rect or content hash changed are handed back for repainting.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    entries: HashMap<ZoneId, ZoneState>,
    dirty: BTreeSet<ZoneId>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_layout(&mut self, solved: &HashMap<ZoneId, Rect>) {
        for (&id, rect) in solved {
            let state = self.entries.entry(id).or_insert_with(|| ZoneState::new(*rect));
            if state.rect != *rect || state.hash.is_none() {
                state.rect = *rect;
                state.is_dirty = true;
                self.dirty.insert(id);
            }
        }

        self.entries.retain(|id, _| solved.contains_key(id));
        self.dirty.retain(|id| solved.contains_key(id));
    }

    pub fn apply_lines(&mut self, zone: ZoneId, lines: Vec<String>) -> Result<()> {
        let entry = self
            .entries
            .get_mut(zone)
            .ok_or(FolioError::ZoneNotFound(zone))?;
        entry.update_lines(lines);
        if entry.is_dirty {
            self.dirty.insert(zone);
        }
        Ok(())
    }

    /// Mark every zone dirty so the next render repaints the whole screen.
    pub fn invalidate(&mut self) {
        for (id, state) in self.entries.iter_mut() {
            state.is_dirty = true;
            self.dirty.insert(*id);
        }
    }

    pub fn take_dirty(&mut self) -> Vec<(ZoneId, ZoneState)> {
        let ids: Vec<_> = std::mem::take(&mut self.dirty).into_iter().collect();
        ids.into_iter()
            .filter_map(|id| {
                self.entries.get_mut(id).map(|state| {
                    state.is_dirty = false;
                    (id, state.clone())
                })
            })
            .collect()
    }

    pub fn rect_of(&self, zone: ZoneId) -> Option<Rect> {
        self.entries.get(zone).map(|state| state.rect)
    }

    pub fn lines_of(&self, zone: ZoneId) -> Option<&[String]> {
        self.entries.get(zone).map(|state| state.lines.as_slice())
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BODY_ZONE, HEADER_ZONE};

    fn solved(rect: Rect) -> HashMap<ZoneId, Rect> {
        HashMap::from([(BODY_ZONE, rect)])
    }

    #[test]
    fn sync_layout_flags_new_zones_as_dirty() {
        let mut registry = ZoneRegistry::new();
        registry.sync_layout(&solved(Rect::new(0, 0, 10, 5)));
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].0, BODY_ZONE);
        assert!(!registry.has_dirty());
    }

    #[test]
    fn identical_lines_are_not_repainted() {
        let mut registry = ZoneRegistry::new();
        registry.sync_layout(&solved(Rect::new(0, 0, 10, 5)));
        registry.apply_lines(BODY_ZONE, vec!["hello".into()]).unwrap();
        assert_eq!(registry.take_dirty().len(), 1);

        registry.apply_lines(BODY_ZONE, vec!["hello".into()]).unwrap();
        assert!(registry.take_dirty().is_empty());

        registry.apply_lines(BODY_ZONE, vec!["hello!".into()]).unwrap();
        assert_eq!(registry.take_dirty().len(), 1);
    }

    #[test]
    fn resize_marks_zone_dirty_and_drops_missing() {
        let mut registry = ZoneRegistry::new();
        registry.sync_layout(&HashMap::from([
            (BODY_ZONE, Rect::new(0, 0, 10, 5)),
            (HEADER_ZONE, Rect::new(0, 0, 10, 1)),
        ]));
        registry.apply_lines(BODY_ZONE, vec!["x".into()]).unwrap();
        registry.apply_lines(HEADER_ZONE, vec!["h".into()]).unwrap();
        registry.take_dirty();

        registry.sync_layout(&solved(Rect::new(0, 0, 12, 5)));
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert!(registry.rect_of(HEADER_ZONE).is_none());
        assert_eq!(registry.lines_of(BODY_ZONE).unwrap(), ["x".to_string()]);
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let mut registry = ZoneRegistry::new();
        let err = registry.apply_lines(HEADER_ZONE, Vec::new()).unwrap_err();
        assert!(matches!(err, FolioError::ZoneNotFound("shell.header")));
    }
}
