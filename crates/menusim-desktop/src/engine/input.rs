//! Pointer and key routing
//!
//! A click is offered to the layers from the top down: modal interrupt,
//! phone call, toasts, then the window stack. The first layer that claims
//! it stops the search.

use crate::input::{DragState, InputOwner, InputResult, Key};
use crate::math::Vec2;
use crate::modal::{CallClick, ModalClick};
use crate::overlay::ToastPayload;
use crate::window::WindowClick;
use super::{HostSignal, SimEngine};

impl SimEngine {
    /// Handle pointer down
    pub fn pointer_down(&mut self, x: f32, y: f32) -> InputResult {
        if self.complete {
            return InputResult::Unhandled;
        }
        let pos = Vec2::new(x, y);
        let now_ms = self.clock.now_ms();

        match self.modal.handle_click(pos, now_ms, &mut self.rng) {
            ModalClick::Closed => {
                self.signals.push(HostSignal::ModalClosed);
                self.apply_block();
                return InputResult::by(InputOwner::Modal);
            }
            ModalClick::Absorbed => return InputResult::by(InputOwner::Modal),
            ModalClick::Ignored => {}
        }

        match self.call.handle_click(pos, now_ms) {
            CallClick::Ignored => {}
            CallClick::PanelDragStarted { offset } => {
                self.input.start_panel_move(offset);
                return InputResult::by(InputOwner::Call);
            }
            CallClick::Answered | CallClick::HungUp => {
                self.apply_block();
                return InputResult::by(InputOwner::Call);
            }
            CallClick::Absorbed => return InputResult::by(InputOwner::Call),
        }

        if let Some(payload) = self.notifications.handle_click(pos, now_ms) {
            self.progress.record_interaction();
            self.open_toast(payload);
            return InputResult::by(InputOwner::Toast);
        }

        self.handle_window_click(pos)
    }

    fn handle_window_click(&mut self, pos: Vec2) -> InputResult {
        match self.windows.handle_click(pos) {
            WindowClick::Missed => InputResult::Unhandled,
            WindowClick::CloseRequested(id) => {
                self.close_window(id);
                InputResult::by_window(id)
            }
            WindowClick::DragStarted(id) => {
                if let Some(window) = self.windows.get(id) {
                    self.input.start_window_move(id, window.drag_offset);
                }
                self.progress.record_interaction();
                InputResult::by_window(id)
            }
            WindowClick::Handled(id) => {
                self.progress.record_interaction();
                self.drain_content_requests();
                InputResult::by_window(id)
            }
        }
    }

    /// A clicked mail toast opens its inbox entry, like clicking the row
    ///
    /// Nothing opens once the entry has left the inbox.
    fn open_toast(&mut self, payload: ToastPayload) {
        let Some(mail_id) = payload.mail_id else {
            return;
        };
        let opened = self.mailbox_mut().is_some_and(|mailbox| mailbox.open(mail_id));
        if opened {
            self.drain_content_requests();
        }
    }

    /// Handle pointer move
    pub fn pointer_move(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);
        match self.input.drag_state().cloned() {
            Some(DragState::MoveWindow { window_id, .. }) => {
                if self.windows.handle_drag(pos) {
                    InputResult::by_window(window_id)
                } else {
                    InputResult::Unhandled
                }
            }
            Some(DragState::MoveCallPanel { .. }) => {
                if self.call.drag_panel_to(pos) {
                    InputResult::by(InputOwner::Call)
                } else {
                    InputResult::Unhandled
                }
            }
            None => InputResult::Unhandled,
        }
    }

    /// Handle pointer up; releases any capture
    pub fn pointer_up(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);
        let result = match self.input.drag_state().cloned() {
            Some(DragState::MoveWindow { window_id, .. }) => InputResult::by_window(window_id),
            Some(DragState::MoveCallPanel { .. }) => InputResult::by(InputOwner::Call),
            None => InputResult::Unhandled,
        };
        self.windows.handle_release(pos);
        self.call.end_panel_drag();
        self.input.end_drag();
        result
    }

    /// Handle a key press; Tab cycles window focus unless input is blocked
    pub fn handle_key(&mut self, key: Key) -> InputResult {
        match key {
            Key::Tab => match self.windows.cycle() {
                Some(id) => InputResult::by_window(id),
                None => InputResult::Unhandled,
            },
            Key::Other => InputResult::Unhandled,
        }
    }

    /// Apply what window content asked for during the last click
    pub(crate) fn drain_content_requests(&mut self) {
        let mut details = Vec::new();
        let mut closes = Vec::new();
        let mut replies = Vec::new();
        for window in self.windows.windows_mut() {
            if let Some(request) = window.content.take_detail_request() {
                details.push(request);
            }
            if window.content.take_close_request() {
                closes.push(window.id);
            }
            if let Some(reply) = window.content.take_reply() {
                replies.push(reply);
            }
        }

        if let Some(mailbox) = self
            .mailbox_window
            .and_then(|id| self.windows.get_mut(id))
            .and_then(|w| w.content.as_mailbox_mut())
        {
            for reply in replies {
                mailbox.record_reply(reply.mail_id, reply.text);
            }
        }
        for request in details {
            self.open_mail_detail(request);
        }
        for id in closes {
            self.close_window(id);
        }
    }
}
