//! Window content variants
//!
//! A window never knows what it hosts beyond this tagged variant. Content
//! raises requests (open a detail view, close me, a reply was chosen) that
//! the coordinator drains after input and applies to the stack.

use std::collections::VecDeque;

use serde::Serialize;

use crate::content::Mail;
use crate::math::{Rect, Size, Vec2};

/// Identifier of a mail within a [`Mailbox`]
pub type MailId = u64;

/// Height of one inbox row
pub const MAIL_ROW_HEIGHT: f32 = 60.0;

const BUTTON_HEIGHT: f32 = 32.0;
const BUTTON_GAP: f32 = 8.0;
const BUTTON_MARGIN: f32 = 16.0;
const ACTIVITY_LOG_CAPACITY: usize = 20;

/// Request to open a detail window for a mail
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRequest {
    pub mail_id: MailId,
    pub mail: Mail,
}

/// A response chosen in a detail window
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub mail_id: MailId,
    pub text: String,
}

// =============================================================================
// Static art
// =============================================================================

/// Non-interactive artwork, optionally cycling through frames
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StaticArt {
    pub frames: Vec<String>,
    pub frame: usize,
    pub frame_interval_ms: f64,
    #[serde(skip)]
    elapsed_ms: f64,
}

impl StaticArt {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            frames: vec![name.into()],
            ..Default::default()
        }
    }

    pub fn cycling(frames: Vec<String>, frame_interval_ms: f64) -> Self {
        Self {
            frames,
            frame: 0,
            frame_interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Name of the frame to draw
    pub fn current(&self) -> Option<&str> {
        self.frames.get(self.frame).map(String::as_str)
    }

    fn update(&mut self, dt_ms: f64) {
        if self.frames.len() < 2 || self.frame_interval_ms <= 0.0 {
            return;
        }
        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= self.frame_interval_ms {
            self.elapsed_ms -= self.frame_interval_ms;
            self.frame = (self.frame + 1) % self.frames.len();
        }
    }
}

// =============================================================================
// Mailbox
// =============================================================================

/// One received mail
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MailEntry {
    pub id: MailId,
    pub mail: Mail,
    pub received_ms: f64,
    pub read: bool,
    pub blinking: bool,
    pub reply: Option<String>,
}

/// Newest-first inbox with a fixed capacity
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mailbox {
    entries: VecDeque<MailEntry>,
    capacity: usize,
    #[serde(skip)]
    next_id: MailId,
    #[serde(skip)]
    pending_detail: Option<DetailRequest>,
}

impl Mailbox {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 1,
            pending_detail: None,
        }
    }

    /// Add a mail at the top, dropping the oldest past capacity
    pub fn deliver(&mut self, mail: Mail, now_ms: f64) -> MailId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_front(MailEntry {
            id,
            mail,
            received_ms: now_ms,
            read: false,
            blinking: true,
            reply: None,
        });
        self.entries.truncate(self.capacity);
        id
    }

    pub fn entries(&self) -> impl Iterator<Item = &MailEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: MailId) -> Option<&MailEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.read).count()
    }

    /// Attach a reply to a mail; false if it has since been dropped
    pub fn record_reply(&mut self, id: MailId, text: String) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.reply = Some(text);
                true
            }
            None => false,
        }
    }

    /// Mark a mail read and queue a detail request for it
    pub fn open(&mut self, id: MailId) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.read = true;
        entry.blinking = false;
        self.pending_detail = Some(DetailRequest {
            mail_id: entry.id,
            mail: entry.mail.clone(),
        });
        true
    }

    fn row_at(&self, local: Vec2) -> Option<MailId> {
        if local.y < 0.0 {
            return None;
        }
        let index = (local.y / MAIL_ROW_HEIGHT) as usize;
        self.entries.get(index).map(|e| e.id)
    }

    fn handle_click(&mut self, local: Vec2) -> bool {
        match self.row_at(local) {
            Some(id) => self.open(id),
            None => false,
        }
    }
}

// =============================================================================
// Mail detail
// =============================================================================

/// An opened mail with its response buttons
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MailDetail {
    pub mail_id: MailId,
    pub mail: Mail,
    pub reply: Option<String>,
    #[serde(skip)]
    close_requested: bool,
    #[serde(skip)]
    pending_reply: Option<Reply>,
}

impl MailDetail {
    pub fn new(mail_id: MailId, mail: Mail) -> Self {
        Self {
            mail_id,
            mail,
            reply: None,
            close_requested: false,
            pending_reply: None,
        }
    }

    /// Local rect of a response button inside a content area
    pub fn response_rect(&self, index: usize, area: Size) -> Rect {
        let n = self.mail.responses.len();
        let step = BUTTON_HEIGHT + BUTTON_GAP;
        let y = area.height - BUTTON_MARGIN - (n - index) as f32 * step + BUTTON_GAP;
        Rect::new(
            BUTTON_MARGIN,
            y,
            (area.width - 2.0 * BUTTON_MARGIN).max(0.0),
            BUTTON_HEIGHT,
        )
    }

    fn handle_click(&mut self, local: Vec2, area: Size) -> bool {
        if self.reply.is_some() {
            return false;
        }
        let hit = (0..self.mail.responses.len())
            .find(|&i| self.response_rect(i, area).contains(local));
        let Some(index) = hit else {
            return false;
        };
        let text = self.mail.responses[index].clone();
        self.reply = Some(text.clone());
        self.pending_reply = Some(Reply {
            mail_id: self.mail_id,
            text,
        });
        self.close_requested = true;
        true
    }
}

// =============================================================================
// Activity log
// =============================================================================

/// Append-only list of coworker activity lines, oldest dropped first
///
/// Also hosts the progress bar, so it carries the current progress value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ActivityLog {
    lines: VecDeque<String>,
    pub progress: f64,
}

impl ActivityLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > ACTIVITY_LOG_CAPACITY {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Variant
// =============================================================================

/// What a window hosts
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowContent {
    Static(StaticArt),
    Mailbox(Mailbox),
    MailDetail(MailDetail),
    ActivityLog(ActivityLog),
}

impl Default for WindowContent {
    fn default() -> Self {
        WindowContent::Static(StaticArt::default())
    }
}

impl WindowContent {
    /// Deliver a click in content-local coordinates; true if it did something
    pub fn handle_click(&mut self, local: Vec2, area: Size) -> bool {
        match self {
            WindowContent::Static(_) | WindowContent::ActivityLog(_) => false,
            WindowContent::Mailbox(mailbox) => mailbox.handle_click(local),
            WindowContent::MailDetail(detail) => detail.handle_click(local, area),
        }
    }

    /// Per-frame update
    pub fn update(&mut self, dt_ms: f64) {
        if let WindowContent::Static(art) = self {
            art.update(dt_ms);
        }
    }

    pub fn take_detail_request(&mut self) -> Option<DetailRequest> {
        match self {
            WindowContent::Mailbox(mailbox) => mailbox.pending_detail.take(),
            _ => None,
        }
    }

    pub fn take_close_request(&mut self) -> bool {
        match self {
            WindowContent::MailDetail(detail) => std::mem::take(&mut detail.close_requested),
            _ => false,
        }
    }

    pub fn take_reply(&mut self) -> Option<Reply> {
        match self {
            WindowContent::MailDetail(detail) => detail.pending_reply.take(),
            _ => None,
        }
    }

    pub fn as_mailbox_mut(&mut self) -> Option<&mut Mailbox> {
        match self {
            WindowContent::Mailbox(mailbox) => Some(mailbox),
            _ => None,
        }
    }

    pub fn as_activity_log_mut(&mut self) -> Option<&mut ActivityLog> {
        match self {
            WindowContent::ActivityLog(log) => Some(log),
            _ => None,
        }
    }
}
