//! Window stack for lifecycle, hit testing, drag capture and z-order

use std::collections::{HashMap, HashSet};
use crate::math::Vec2;
use super::{Window, WindowConfig, WindowId, WindowRegion};

/// Outcome of a pointer-down on the stack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowClick {
    /// No unblocked window under the point; pass through
    Missed,
    /// Close affordance hit; the window is not promoted
    CloseRequested(WindowId),
    /// Title bar hit; drag captured and window promoted
    DragStarted(WindowId),
    /// Button or content hit; window promoted
    Handled(WindowId),
}

impl WindowClick {
    #[inline]
    pub fn is_handled(&self) -> bool {
        !matches!(self, WindowClick::Missed)
    }

    pub fn window_id(&self) -> Option<WindowId> {
        match *self {
            WindowClick::Missed => None,
            WindowClick::CloseRequested(id)
            | WindowClick::DragStarted(id)
            | WindowClick::Handled(id) => Some(id),
        }
    }
}

/// Ordered collection of windows
pub struct WindowStack {
    /// All windows by ID
    windows: HashMap<WindowId, Window>,
    /// Creation order (used for Tab cycling)
    creation_order: Vec<WindowId>,
    /// Next window ID
    next_id: WindowId,
    /// Block flag applied to every window, including ones created later
    global_block: bool,
}

impl Default for WindowStack {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            creation_order: Vec::new(),
            next_id: 1,
            global_block: false,
        }
    }

    /// Create a new window on top of the stack
    pub fn create(&mut self, config: WindowConfig) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;

        let z_index = self.max_z().map_or(0, |z| z + 1);

        // Default position if not specified
        let position = config.position.unwrap_or_else(|| {
            let offset = (id % 10) as f32 * 30.0;
            Vec2::new(100.0 + offset, 100.0 + offset)
        });

        let window = Window {
            id,
            title: config.title,
            position,
            size: config.size,
            z_index,
            blocked: self.global_block,
            dragging: false,
            drag_offset: Vec2::ZERO,
            content: config.content,
            parent: config.parent,
        };

        self.windows.insert(id, window);
        self.creation_order.push(id);

        id
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Get a mutable window by ID
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    /// Get the number of windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Highest z-index, `None` when empty
    pub fn max_z(&self) -> Option<i64> {
        self.windows.values().map(|w| w.z_index).max()
    }

    /// Topmost window, `None` when empty
    pub fn top(&self) -> Option<WindowId> {
        self.windows.values().max_by_key(|w| w.z_index).map(|w| w.id)
    }

    /// Get windows sorted by z-order (back to front)
    pub fn windows_by_z(&self) -> Vec<&Window> {
        let mut windows: Vec<&Window> = self.windows.values().collect();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    /// Iterate all windows mutably, in no particular order
    pub fn windows_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.windows.values_mut()
    }

    /// Window IDs in creation order
    pub fn ids(&self) -> &[WindowId] {
        &self.creation_order
    }

    /// Topmost unblocked window containing `pos`
    pub fn hit_test(&self, pos: Vec2) -> Option<WindowId> {
        self.region_at(pos).map(|(id, _)| id)
    }

    /// Find which region of which unblocked window is at `pos`
    pub fn region_at(&self, pos: Vec2) -> Option<(WindowId, WindowRegion)> {
        let mut windows: Vec<&Window> = self.windows.values().collect();
        windows.sort_by_key(|w| std::cmp::Reverse(w.z_index));

        windows
            .into_iter()
            .filter(|w| !w.blocked)
            .find_map(|w| w.region_at(pos).map(|region| (w.id, region)))
    }

    /// Raise a window to `max_z + 1`
    pub fn promote(&mut self, id: WindowId) -> bool {
        let Some(max) = self.max_z() else {
            return false;
        };
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.z_index = max + 1;
                true
            }
            None => false,
        }
    }

    /// Route a pointer-down to the topmost unblocked window
    pub fn handle_click(&mut self, pos: Vec2) -> WindowClick {
        let (id, region) = match self.region_at(pos) {
            Some(hit) => hit,
            None => return WindowClick::Missed,
        };

        let result = match region {
            WindowRegion::CloseButton => return WindowClick::CloseRequested(id),
            WindowRegion::MinimizeButton => WindowClick::Handled(id),
            WindowRegion::TitleBar => {
                self.release_all();
                if let Some(window) = self.windows.get_mut(&id) {
                    window.begin_drag(pos);
                }
                WindowClick::DragStarted(id)
            }
            WindowRegion::Content => {
                if let Some(window) = self.windows.get_mut(&id) {
                    window.click_content(pos);
                }
                WindowClick::Handled(id)
            }
        };

        self.promote(id);
        result
    }

    /// Move the captured window; no hit testing
    pub fn handle_drag(&mut self, pos: Vec2) -> bool {
        match self.windows.values_mut().find(|w| w.dragging) {
            Some(window) => {
                window.drag_to(pos);
                true
            }
            None => false,
        }
    }

    /// End any drag; returns whether one was in progress
    pub fn handle_release(&mut self, _pos: Vec2) -> bool {
        self.release_all()
    }

    /// Window currently being dragged
    pub fn dragging(&self) -> Option<WindowId> {
        self.windows.values().find(|w| w.dragging).map(|w| w.id)
    }

    fn release_all(&mut self) -> bool {
        let mut released = false;
        for window in self.windows.values_mut() {
            released |= window.dragging;
            window.end_drag();
        }
        released
    }

    /// Block or unblock every window; blocking cancels drags
    pub fn set_global_block(&mut self, blocked: bool) {
        self.global_block = blocked;
        for window in self.windows.values_mut() {
            window.blocked = blocked;
            if blocked {
                window.end_drag();
            }
        }
    }

    #[inline]
    pub fn is_globally_blocked(&self) -> bool {
        self.global_block
    }

    /// Remove a window and, transitively, every window derived from it
    ///
    /// Returns the removed IDs, the requested one first.
    pub fn close(&mut self, id: WindowId) -> Vec<WindowId> {
        if !self.windows.contains_key(&id) {
            return Vec::new();
        }

        let mut closed = vec![id];
        let mut seen: HashSet<WindowId> = HashSet::from([id]);
        let mut cursor = 0;
        while cursor < closed.len() {
            let parent = closed[cursor];
            for &child in &self.creation_order {
                let is_child = self
                    .windows
                    .get(&child)
                    .is_some_and(|w| w.parent == Some(parent));
                if is_child && seen.insert(child) {
                    closed.push(child);
                }
            }
            cursor += 1;
        }

        for wid in &closed {
            self.windows.remove(wid);
        }
        self.creation_order.retain(|wid| !seen.contains(wid));
        closed
    }

    /// Promote the window created after the current top (wrapping)
    pub fn cycle(&mut self) -> Option<WindowId> {
        if self.global_block {
            return None;
        }
        let top = self.top()?;
        let index = self.creation_order.iter().position(|&id| id == top)?;
        let next = self.creation_order[(index + 1) % self.creation_order.len()];
        self.promote(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::window::{Mailbox, WindowContent};

    fn config_at(title: &str, x: f32, y: f32) -> WindowConfig {
        WindowConfig::new(title, Size::new(400.0, 300.0), WindowContent::default())
            .at(Vec2::new(x, y))
    }

    #[test]
    fn test_window_creation() {
        let mut stack = WindowStack::new();
        let a = stack.create(config_at("A", 0.0, 0.0));
        let b = stack.create(config_at("B", 50.0, 50.0));

        assert_eq!(stack.count(), 2);
        assert_eq!(stack.get(a).unwrap().z_index, 0);
        assert_eq!(stack.get(b).unwrap().z_index, 1);
        assert_eq!(stack.top(), Some(b));
    }

    #[test]
    fn test_empty_stack_queries() {
        let mut stack = WindowStack::new();
        assert!(stack.hit_test(Vec2::new(10.0, 10.0)).is_none());
        assert!(stack.max_z().is_none());
        assert!(stack.top().is_none());
        assert_eq!(stack.handle_click(Vec2::new(10.0, 10.0)), WindowClick::Missed);
        assert!(!stack.handle_drag(Vec2::new(10.0, 10.0)));
        assert!(!stack.promote(1));
        assert!(stack.cycle().is_none());
        assert!(stack.close(1).is_empty());
    }

    #[test]
    fn test_content_click_promotes() {
        let mut stack = WindowStack::new();
        let a = stack.create(config_at("A", 0.0, 0.0));
        let _b = stack.create(config_at("B", 100.0, 100.0));

        // Inside A only
        let click = stack.handle_click(Vec2::new(50.0, 80.0));
        assert_eq!(click, WindowClick::Handled(a));
        assert_eq!(stack.get(a).unwrap().z_index, 2);
        assert_eq!(stack.top(), Some(a));
    }

    #[test]
    fn test_close_button_does_not_promote() {
        let mut stack = WindowStack::new();
        let a = stack.create(config_at("A", 0.0, 0.0));
        let _b = stack.create(config_at("B", 500.0, 0.0));

        // A close button at (375, 10)
        let click = stack.handle_click(Vec2::new(380.0, 15.0));
        assert_eq!(click, WindowClick::CloseRequested(a));
        assert_eq!(stack.get(a).unwrap().z_index, 0);
    }

    #[test]
    fn test_title_drag_and_release() {
        let mut stack = WindowStack::new();
        let a = stack.create(config_at("A", 100.0, 100.0));

        let click = stack.handle_click(Vec2::new(120.0, 110.0));
        assert_eq!(click, WindowClick::DragStarted(a));
        assert_eq!(stack.dragging(), Some(a));

        assert!(stack.handle_drag(Vec2::new(220.0, 210.0)));
        let window = stack.get(a).unwrap();
        assert!((window.position.x - 200.0).abs() < 0.001);
        assert!((window.position.y - 200.0).abs() < 0.001);

        assert!(stack.handle_release(Vec2::new(220.0, 210.0)));
        assert!(stack.dragging().is_none());
        assert!(!stack.handle_drag(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_global_block_hides_from_hit_test_and_cancels_drag() {
        let mut stack = WindowStack::new();
        let a = stack.create(config_at("A", 0.0, 0.0));
        stack.handle_click(Vec2::new(20.0, 10.0));
        assert_eq!(stack.dragging(), Some(a));

        stack.set_global_block(true);
        assert!(stack.dragging().is_none());
        assert!(stack.hit_test(Vec2::new(20.0, 100.0)).is_none());
        assert_eq!(stack.handle_click(Vec2::new(20.0, 100.0)), WindowClick::Missed);

        let late = stack.create(config_at("Late", 0.0, 0.0));
        assert!(stack.get(late).unwrap().blocked);

        stack.set_global_block(false);
        assert!(stack.windows_by_z().iter().all(|w| !w.blocked));
        assert_eq!(stack.hit_test(Vec2::new(20.0, 100.0)), Some(late));
    }

    #[test]
    fn test_close_cascades_to_dependents() {
        let mut stack = WindowStack::new();
        let inbox = stack.create(config_at(
            "Inbox",
            0.0,
            0.0,
        ));
        let detail = stack.create(config_at("Detail", 10.0, 10.0).child_of(inbox));
        let reply = stack.create(config_at("Reply", 20.0, 20.0).child_of(detail));
        let other = stack.create(config_at("Other", 30.0, 30.0));

        let closed = stack.close(inbox);
        assert_eq!(closed, vec![inbox, detail, reply]);
        assert_eq!(stack.count(), 1);
        assert!(stack.get(other).is_some());
        assert_eq!(stack.ids(), &[other]);
    }

    #[test]
    fn test_cycle_wraps_in_creation_order() {
        let mut stack = WindowStack::new();
        let a = stack.create(config_at("A", 0.0, 0.0));
        let b = stack.create(config_at("B", 0.0, 0.0));
        let c = stack.create(config_at("C", 0.0, 0.0));

        assert_eq!(stack.cycle(), Some(a));
        assert_eq!(stack.cycle(), Some(b));
        assert_eq!(stack.cycle(), Some(c));
        assert_eq!(stack.top(), Some(c));

        stack.set_global_block(true);
        assert!(stack.cycle().is_none());
    }

    #[test]
    fn test_content_click_reaches_mailbox() {
        let mut stack = WindowStack::new();
        let mut mailbox = Mailbox::new(50);
        mailbox.deliver(
            crate::content::Mail {
                sender: "a@b".to_string(),
                subject: "s".to_string(),
                body: String::new(),
                responses: Vec::new(),
            },
            0.0,
        );
        let id = stack.create(
            WindowConfig::new("Inbox", Size::new(600.0, 500.0), WindowContent::Mailbox(mailbox))
                .at(Vec2::ZERO),
        );

        // First row sits just under the title bar
        stack.handle_click(Vec2::new(100.0, 45.0));
        let request = stack.get_mut(id).unwrap().content.take_detail_request();
        assert!(request.is_some());
    }
}
