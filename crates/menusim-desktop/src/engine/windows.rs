//! Window lifecycle, mail delivery and the default desktop

use log::debug;
use rand::Rng;

use crate::content::Mail;
use crate::math::{Size, Vec2};
use crate::window::{
    ActivityLog, DetailRequest, MailDetail, MailId, Mailbox, StaticArt, WindowConfig,
    WindowContent, WindowId,
};
use super::{HostSignal, SimEngine};

const DETAIL_SIZE: Size = Size::new(600.0, 450.0);
const DETAIL_ORIGIN: Vec2 = Vec2::new(400.0, 200.0);
const DETAIL_JITTER: Vec2 = Vec2::new(100.0, 50.0);

/// Frames of the cycling desktop art
const ART_FRAMES: [&str; 3] = ["zomboid_1", "zomboid_2", "zomboid_3"];

impl SimEngine {
    /// Create a window on top of the stack
    pub fn create_window(&mut self, config: WindowConfig) -> WindowId {
        let id = self.windows.create(config);
        if let Some(window) = self.windows.get(id) {
            match window.content {
                WindowContent::Mailbox(_) if self.mailbox_window.is_none() => {
                    self.mailbox_window = Some(id);
                }
                WindowContent::ActivityLog(_) if self.activity_window.is_none() => {
                    self.activity_window = Some(id);
                }
                _ => {}
            }
        }
        id
    }

    /// Close a window and everything derived from it
    pub fn close_window(&mut self, id: WindowId) -> Vec<WindowId> {
        let closed = self.windows.close(id);
        if closed.is_empty() {
            return closed;
        }
        debug!("closed windows {:?}", closed);

        if self.mailbox_window.is_some_and(|w| closed.contains(&w)) {
            self.mailbox_window = None;
        }
        if self.activity_window.is_some_and(|w| closed.contains(&w)) {
            self.activity_window = None;
        }
        let dragged = self.input.drag_state().and_then(|d| d.window_id());
        if dragged.is_some_and(|w| closed.contains(&w)) {
            self.input.end_drag();
        }
        closed
    }

    /// Open a mail in a new detail window near the middle of the screen
    ///
    /// The detail is a child of the mailbox window when one exists.
    pub fn open_mail_detail(&mut self, request: DetailRequest) -> WindowId {
        let position = Vec2::new(
            DETAIL_ORIGIN.x + self.rng.random_range(-DETAIL_JITTER.x..=DETAIL_JITTER.x),
            DETAIL_ORIGIN.y + self.rng.random_range(-DETAIL_JITTER.y..=DETAIL_JITTER.y),
        );
        let title = request.mail.subject.clone();
        let content = WindowContent::MailDetail(MailDetail::new(request.mail_id, request.mail));
        let mut config = WindowConfig::new(title, DETAIL_SIZE, content).at(position);
        if let Some(mailbox) = self.mailbox_window {
            config = config.child_of(mailbox);
        }

        let id = self.create_window(config);
        self.signals.push(HostSignal::DetailOpened { window_id: id });
        id
    }

    /// Put a mail at the top of the inbox, if an inbox window is open
    pub fn deliver_mail(&mut self, mail: Mail) -> Option<MailId> {
        let now_ms = self.clock.now_ms();
        Some(self.mailbox_mut()?.deliver(mail, now_ms))
    }

    pub(crate) fn mailbox_mut(&mut self) -> Option<&mut Mailbox> {
        let id = self.mailbox_window?;
        self.windows.get_mut(id)?.content.as_mailbox_mut()
    }

    pub fn mailbox(&self) -> Option<&Mailbox> {
        match &self.windows.get(self.mailbox_window?)?.content {
            WindowContent::Mailbox(mailbox) => Some(mailbox),
            _ => None,
        }
    }

    pub fn activity_log(&self) -> Option<&ActivityLog> {
        match &self.windows.get(self.activity_window?)?.content {
            WindowContent::ActivityLog(log) => Some(log),
            _ => None,
        }
    }

    pub fn mailbox_window(&self) -> Option<WindowId> {
        self.mailbox_window
    }

    pub fn activity_window(&self) -> Option<WindowId> {
        self.activity_window
    }

    /// Open the desktop the game starts with
    ///
    /// Returns the IDs in creation order; the last one ends up on top.
    pub fn spawn_default_desktop(&mut self) -> Vec<WindowId> {
        let screen = self.config.screen;
        let frames = ART_FRAMES.iter().map(|f| f.to_string()).collect();

        let configs = vec![
            WindowConfig::new(
                "Inventory",
                Size::new(500.0, 400.0),
                WindowContent::Static(StaticArt::single("inventory")),
            )
            .at(Vec2::new(100.0, 150.0)),
            WindowConfig::new(
                "Project Zomboid",
                Size::new(640.0, 420.0),
                WindowContent::Static(StaticArt::cycling(frames, self.config.art_frame_interval_ms)),
            )
            .at(Vec2::new(screen.width * 0.5 - 320.0, screen.height * 0.5 - 210.0)),
            WindowConfig::new(
                "Outlook",
                Size::new(450.0, 500.0),
                WindowContent::Mailbox(Mailbox::new(self.config.mailbox_capacity)),
            )
            .at(Vec2::new(150.0, screen.height - 560.0)),
            WindowConfig::new(
                "Activity Log",
                Size::new(420.0, 300.0),
                WindowContent::ActivityLog(ActivityLog::default()),
            )
            .at(Vec2::new(screen.width - 900.0, screen.height - 360.0)),
        ];

        let ids = configs.into_iter().map(|c| self.create_window(c)).collect();
        self.apply_block();
        ids
    }
}
