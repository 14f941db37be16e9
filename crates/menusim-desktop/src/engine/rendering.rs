//! Draw-list assembly

use crate::math::{Rect, Size, Vec2};
use crate::modal::CallPhase;
use crate::overlay::{OverlayKind, ToastPayload};
use crate::render::{DrawItem, DrawList};
use super::SimEngine;

/// Top-left of the activity line
const ACTIVITY_LINE_ORIGIN: Vec2 = Vec2::new(20.0, 70.0);
const ACTIVITY_LINE_PADDING: f32 = 15.0;
const ACTIVITY_CHAR_WIDTH: f32 = 9.0;
const ACTIVITY_LINE_HEIGHT: f32 = 20.0;

/// Progress popup text sits this far above its anchor
const POPUP_RISE: f32 = 20.0;

impl SimEngine {
    /// Everything to paint this frame, back to front
    ///
    /// Background, windows by ascending z, the activity line, toasts,
    /// milestone banners, progress popups, the call UI and finally the
    /// modal interrupt.
    pub fn draw_list(&self) -> DrawList {
        let now_ms = self.clock.now_ms();
        let screen = self.config.screen;
        let mut list = DrawList::new();

        list.push(DrawItem::Background {
            rect: Rect::new(0.0, 0.0, screen.width, screen.height),
        });

        for window in self.windows.windows_by_z() {
            list.push(DrawItem::Window {
                id: window.id,
                title: window.title.clone(),
                rect: window.rect(),
                title_bar: window.title_bar_rect(),
                close_button: window.close_button_rect(),
                minimize_button: window.minimize_button_rect(),
                z_index: window.z_index,
                blocked: window.blocked,
                content: window.content.clone(),
            });
        }

        if let Some(text) = self.activity.current() {
            list.push(DrawItem::ActivityLine {
                rect: activity_line_rect(text),
                text: text.to_string(),
            });
        }

        for queue in self.notifications.queues() {
            for (id, rect) in queue.layout() {
                let Some(entity) = queue.get(id) else {
                    continue;
                };
                let Some(ToastPayload { channel, sender, text, .. }) = entity.payload() else {
                    continue;
                };
                list.push(DrawItem::Toast {
                    id,
                    channel: *channel,
                    rect,
                    sender: sender.clone(),
                    text: text.clone(),
                    visuals: entity.visuals(now_ms),
                });
            }
        }

        let banner_rect = self.banner_rect();
        for entity in self.banners.entries() {
            if let OverlayKind::MilestoneBanner { text, .. } = &entity.kind {
                list.push(DrawItem::Banner {
                    id: entity.id,
                    rect: banner_rect,
                    text: text.clone(),
                    visuals: entity.visuals(now_ms),
                });
            }
        }

        for entity in self.popups.entries() {
            if let OverlayKind::ProgressPopup { amount, anchor } = &entity.kind {
                list.push(DrawItem::ProgressPopup {
                    id: entity.id,
                    center: anchor.offset_y(-POPUP_RISE),
                    text: format!("+{:.1}%", amount),
                    visuals: entity.visuals(now_ms),
                });
            }
        }

        if let Some(caller) = self.call.caller() {
            match self.call.phase() {
                CallPhase::Ringing => list.push(DrawItem::CallRinging {
                    rect: self.call.popup_rect(),
                    caller: caller.clone(),
                    answer_button: self.call.answer_button_rect(),
                    hang_up_button: self.call.hang_up_button_rect(),
                }),
                CallPhase::Answered => list.push(DrawItem::CallPanel {
                    rect: self.call.panel_rect(),
                    title_bar: self.call.panel_title_rect(),
                    hang_up_button: self.call.panel_hang_up_rect(),
                    caller: caller.clone(),
                    transcript: self.call.transcript(),
                }),
                CallPhase::Idle | CallPhase::Ended => {}
            }
        }

        if let Some(message) = self.modal.message().filter(|_| self.modal.is_active()) {
            list.push(DrawItem::Modal {
                rect: self.modal.popup_rect(),
                close_button: self.modal.close_button_rect(),
                sender: message.sender.clone(),
                text: message.text.clone(),
            });
        }

        list
    }
}

fn activity_line_rect(text: &str) -> Rect {
    let width = text.chars().count() as f32 * ACTIVITY_CHAR_WIDTH + 2.0 * ACTIVITY_LINE_PADDING;
    let height = ACTIVITY_LINE_HEIGHT + 2.0 * ACTIVITY_LINE_PADDING;
    Rect::from_pos_size(ACTIVITY_LINE_ORIGIN, Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use crate::config::SimConfig;
    use crate::content::{Caller, ContentPools, ScriptLine, Speaker};
    use crate::render::DrawItem;
    use super::super::SimEngine;

    fn engine() -> SimEngine {
        let config = SimConfig {
            seed: Some(2),
            ..SimConfig::default()
        };
        SimEngine::new(config, ContentPools::builtin(), 0.0)
    }

    fn kinds(engine: &SimEngine) -> Vec<&'static str> {
        engine
            .draw_list()
            .iter()
            .map(|item| match item {
                DrawItem::Background { .. } => "background",
                DrawItem::Window { .. } => "window",
                DrawItem::ActivityLine { .. } => "activity",
                DrawItem::Toast { .. } => "toast",
                DrawItem::Banner { .. } => "banner",
                DrawItem::ProgressPopup { .. } => "popup",
                DrawItem::CallRinging { .. } => "ringing",
                DrawItem::CallPanel { .. } => "panel",
                DrawItem::Modal { .. } => "modal",
            })
            .collect()
    }

    #[test]
    fn test_windows_painted_by_z() {
        let mut engine = engine();
        let ids = engine.spawn_default_desktop();
        engine.windows.promote(ids[0]);

        let order = engine.draw_list().window_ids();
        assert_eq!(order.last(), Some(&ids[0]));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_call_drawn_above_windows() {
        let mut engine = engine();
        engine.spawn_default_desktop();
        engine.call.start(
            Caller { name: "Mama Velli".to_string(), number: "555".to_string() },
            vec![ScriptLine::new(Speaker::Caller, "Hi")],
        );

        let kinds = kinds(&engine);
        assert_eq!(kinds.first(), Some(&"background"));
        assert_eq!(kinds.last(), Some(&"ringing"));
    }

    #[test]
    fn test_popup_text() {
        let mut engine = engine();
        engine.popups.push(
            crate::overlay::OverlayKind::ProgressPopup {
                amount: 7.24,
                anchor: crate::math::Vec2::new(100.0, 100.0),
            },
            0.0,
            450.0,
            1050.0,
            0.0,
        );
        let list = engine.draw_list();
        let text = list.iter().find_map(|item| match item {
            DrawItem::ProgressPopup { text, center, .. } => Some((text.clone(), *center)),
            _ => None,
        });
        let (text, center) = text.unwrap();
        assert_eq!(text, "+7.2%");
        assert!((center.y - 80.0).abs() < 0.001);
    }
}
