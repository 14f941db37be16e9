//! Ordered collection of overlay entities sharing one lifecycle pass

use std::cell::Cell;
use std::rc::Rc;

use super::{OverlayEntity, OverlayId, OverlayKind};

/// Id counter that several layers can draw from
///
/// Clones share the counter, so layers built from the same source never hand
/// out the same id.
#[derive(Clone, Debug)]
pub struct OverlayIds(Rc<Cell<OverlayId>>);

impl OverlayIds {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(1)))
    }

    pub fn next(&self) -> OverlayId {
        let id = self.0.get();
        self.0.set(id + 1);
        id
    }
}

impl Default for OverlayIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrival-ordered overlays with purge-on-update
#[derive(Clone, Debug, Default)]
pub struct OverlayLayer {
    entries: Vec<OverlayEntity>,
    ids: OverlayIds,
}

impl OverlayLayer {
    /// Layer with its own id counter
    pub fn new() -> Self {
        Self::sharing(&OverlayIds::new())
    }

    /// Layer drawing ids from a shared counter
    pub fn sharing(ids: &OverlayIds) -> Self {
        Self {
            entries: Vec::new(),
            ids: ids.clone(),
        }
    }

    /// Append a new visible entity
    pub fn push(
        &mut self,
        kind: OverlayKind,
        now_ms: f64,
        duration_ms: f64,
        dismiss_duration_ms: f64,
        slide_distance: f32,
    ) -> OverlayId {
        let id = self.ids.next();
        self.entries.push(
            OverlayEntity::new(id, kind, now_ms, duration_ms, dismiss_duration_ms)
                .with_slide_distance(slide_distance),
        );
        id
    }

    /// Advance every entity and purge removed ones; returns how many were purged
    pub fn update(&mut self, now_ms: f64) -> usize {
        for entity in &mut self.entries {
            entity.update(now_ms);
        }
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_removed());
        before - self.entries.len()
    }

    /// Start dismissing one entity now
    pub fn dismiss(&mut self, id: OverlayId, now_ms: f64) -> bool {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .is_some_and(|e| e.dismiss(now_ms))
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayEntity> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut OverlayEntity> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[OverlayEntity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner(threshold: u32) -> OverlayKind {
        OverlayKind::MilestoneBanner {
            threshold,
            text: format!("{}%", threshold),
        }
    }

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut layer = OverlayLayer::new();
        let a = layer.push(banner(25), 0.0, 2500.0, 500.0, 0.0);
        let b = layer.push(banner(50), 0.0, 2500.0, 500.0, 0.0);
        assert!(b > a);
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn test_update_purges_removed() {
        let mut layer = OverlayLayer::new();
        layer.push(banner(25), 0.0, 2500.0, 500.0, 0.0);
        let late = layer.push(banner(50), 1000.0, 2500.0, 500.0, 0.0);

        assert_eq!(layer.update(3000.0), 1);
        assert_eq!(layer.entries()[0].id, late);
        assert_eq!(layer.update(4000.0), 1);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_shared_counter_keeps_ids_apart() {
        let ids = OverlayIds::new();
        let mut banners = OverlayLayer::sharing(&ids);
        let mut popups = OverlayLayer::sharing(&ids);
        let a = banners.push(banner(25), 0.0, 2500.0, 500.0, 0.0);
        let b = popups.push(banner(50), 0.0, 1000.0, 500.0, 0.0);
        let c = banners.push(banner(75), 0.0, 2500.0, 500.0, 0.0);
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn test_dismiss_unknown_id() {
        let mut layer = OverlayLayer::new();
        assert!(!layer.dismiss(99, 0.0));
    }
}
