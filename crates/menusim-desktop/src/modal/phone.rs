//! Phone call state machine
//!
//! `Idle -> Ringing -> Answered -> Ended -> Idle`. While answered, the script
//! is revealed one character at a time with a pause between lines. Line
//! boundaries are computed from the schedule, not from the frame that sees
//! them, so one long step can advance several lines.

use log::info;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::{CallTiming, Interval};
use crate::content::{Caller, ContentPools, ScriptLine, Speaker};
use crate::math::{Rect, Size, Vec2};

const POPUP_SIZE: Size = Size::new(400.0, 200.0);
const BUTTON_SIZE: Size = Size::new(120.0, 40.0);
const ANSWER_OFFSET: Vec2 = Vec2::new(50.0, 140.0);
const HANG_UP_OFFSET: Vec2 = Vec2::new(230.0, 140.0);
const PANEL_SIZE: Size = Size::new(400.0, 300.0);
const PANEL_MARGIN: Vec2 = Vec2::new(50.0, 50.0);
const PANEL_TITLE_HEIGHT: f32 = 30.0;
const PANEL_BUTTON_SIZE: Size = Size::new(90.0, 30.0);

/// Call lifecycle phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallPhase {
    #[default]
    Idle,
    Ringing,
    Answered,
    Ended,
}

/// Outcome of a click routed to the call
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CallClick {
    /// No call UI under the point
    Ignored,
    /// Consumed without a state change
    Absorbed,
    Answered,
    HungUp,
    /// Title strip grabbed; offset from panel origin to pointer
    PanelDragStarted { offset: Vec2 },
}

/// A line as revealed so far
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: String,
}

/// The phone call overlay
#[derive(Clone, Debug)]
pub struct PhoneCallMachine {
    phase: CallPhase,
    caller: Option<Caller>,
    script: Vec<ScriptLine>,
    current_line: usize,
    typed_chars: usize,
    line_started_ms: f64,
    answered_ms: f64,
    conversation_duration_ms: f64,
    timing: CallTiming,
    interval: Interval,
    next_call_at: f64,
    ended_pending: bool,
    popup_rect: Rect,
    panel_home: Vec2,
    panel_rect: Rect,
    panel_dragging: bool,
    panel_drag_offset: Vec2,
}

impl PhoneCallMachine {
    pub fn new<R: Rng + ?Sized>(
        screen: Size,
        interval: Interval,
        timing: CallTiming,
        now_ms: f64,
        rng: &mut R,
    ) -> Self {
        let panel_home = Vec2::new(
            screen.width - PANEL_SIZE.width - PANEL_MARGIN.x,
            screen.height - PANEL_SIZE.height - PANEL_MARGIN.y,
        );
        Self {
            phase: CallPhase::Idle,
            caller: None,
            script: Vec::new(),
            current_line: 0,
            typed_chars: 0,
            line_started_ms: 0.0,
            answered_ms: 0.0,
            conversation_duration_ms: 0.0,
            timing,
            interval,
            next_call_at: now_ms + interval.sample(rng),
            ended_pending: false,
            popup_rect: Rect::centered_in(screen, POPUP_SIZE),
            panel_home,
            panel_rect: Rect::from_pos_size(panel_home, PANEL_SIZE),
            panel_dragging: false,
            panel_drag_offset: Vec2::ZERO,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Ringing and Answered own input
    #[inline]
    pub fn blocks_input(&self) -> bool {
        matches!(self.phase, CallPhase::Ringing | CallPhase::Answered)
    }

    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }

    pub fn script(&self) -> &[ScriptLine] {
        &self.script
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn typed_chars(&self) -> usize {
        self.typed_chars
    }

    pub fn conversation_duration_ms(&self) -> f64 {
        self.conversation_duration_ms
    }

    pub fn next_call_at(&self) -> f64 {
        self.next_call_at
    }

    /// Completed lines followed by the partially typed current line
    pub fn transcript(&self) -> Vec<TranscriptLine> {
        let mut lines: Vec<TranscriptLine> = self
            .script
            .iter()
            .take(self.current_line)
            .map(|line| TranscriptLine {
                speaker: line.speaker,
                text: line.text.clone(),
            })
            .collect();
        if let Some(line) = self.script.get(self.current_line) {
            if self.typed_chars > 0 {
                lines.push(TranscriptLine {
                    speaker: line.speaker,
                    text: line.text.chars().take(self.typed_chars).collect(),
                });
            }
        }
        lines
    }

    pub fn popup_rect(&self) -> Rect {
        self.popup_rect
    }

    pub fn answer_button_rect(&self) -> Rect {
        Rect::from_pos_size(self.popup_rect.position() + ANSWER_OFFSET, BUTTON_SIZE)
    }

    pub fn hang_up_button_rect(&self) -> Rect {
        Rect::from_pos_size(self.popup_rect.position() + HANG_UP_OFFSET, BUTTON_SIZE)
    }

    pub fn panel_rect(&self) -> Rect {
        self.panel_rect
    }

    /// Draggable strip across the top of the conversation panel
    pub fn panel_title_rect(&self) -> Rect {
        Rect::new(
            self.panel_rect.x,
            self.panel_rect.y,
            self.panel_rect.width,
            PANEL_TITLE_HEIGHT,
        )
    }

    pub fn panel_hang_up_rect(&self) -> Rect {
        Rect::new(
            self.panel_rect.right() - PANEL_BUTTON_SIZE.width - 10.0,
            self.panel_rect.bottom() - PANEL_BUTTON_SIZE.height - 10.0,
            PANEL_BUTTON_SIZE.width,
            PANEL_BUTTON_SIZE.height,
        )
    }

    #[inline]
    pub fn is_panel_dragging(&self) -> bool {
        self.panel_dragging
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Start ringing if the call timer is due
    ///
    /// A due timer that is suppressed (modal active) or has no callers is
    /// re-rolled from `now_ms`.
    pub fn try_trigger<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        pools: &ContentPools,
        suppressed: bool,
    ) -> bool {
        if self.phase != CallPhase::Idle || now_ms < self.next_call_at {
            return false;
        }
        if !suppressed && self.trigger_call(now_ms, rng, pools) {
            return true;
        }
        self.next_call_at = now_ms + self.interval.sample(rng);
        false
    }

    /// Pick a caller and script and start ringing; only from Idle
    pub fn trigger_call<R: Rng + ?Sized>(
        &mut self,
        _now_ms: f64,
        rng: &mut R,
        pools: &ContentPools,
    ) -> bool {
        if self.phase != CallPhase::Idle {
            return false;
        }
        let Some(caller) = pools.callers.choose(rng) else {
            return false;
        };
        let script = pools.script_for(&caller.name).to_vec();
        self.start(caller.clone(), script);
        true
    }

    /// Start ringing with an explicit caller and script; only from Idle
    pub fn start(&mut self, caller: Caller, script: Vec<ScriptLine>) -> bool {
        if self.phase != CallPhase::Idle {
            return false;
        }
        info!("incoming call from {}", caller.name);
        self.conversation_duration_ms = conversation_duration(&script, &self.timing);
        self.caller = Some(caller);
        self.script = script;
        self.current_line = 0;
        self.typed_chars = 0;
        self.panel_rect = Rect::from_pos_size(self.panel_home, PANEL_SIZE);
        self.phase = CallPhase::Ringing;
        true
    }

    /// `Ringing -> Answered`; starts the reveal clock
    pub fn answer(&mut self, now_ms: f64) -> bool {
        if self.phase != CallPhase::Ringing {
            return false;
        }
        self.phase = CallPhase::Answered;
        self.answered_ms = now_ms;
        self.line_started_ms = now_ms;
        self.current_line = 0;
        self.typed_chars = 0;
        true
    }

    /// Force `Ended` from Ringing or Answered
    pub fn hang_up(&mut self) -> bool {
        if !self.blocks_input() {
            return false;
        }
        self.end();
        true
    }

    fn end(&mut self) {
        if let Some(caller) = &self.caller {
            info!("call with {} ended", caller.name);
        }
        self.phase = CallPhase::Ended;
        self.ended_pending = true;
        self.panel_dragging = false;
    }

    /// Advance the reveal; `Ended` falls back to `Idle` one update later
    pub fn update<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        match self.phase {
            CallPhase::Idle | CallPhase::Ringing => {}
            CallPhase::Ended => {
                self.phase = CallPhase::Idle;
                self.caller = None;
                self.script.clear();
                self.current_line = 0;
                self.typed_chars = 0;
                self.next_call_at = now_ms + self.interval.sample(rng);
            }
            CallPhase::Answered => {
                self.advance_reveal(now_ms);
                let exhausted = self.current_line >= self.script.len();
                let over_budget = now_ms - self.answered_ms >= self.conversation_duration_ms;
                if exhausted || over_budget {
                    self.end();
                }
            }
        }
    }

    fn advance_reveal(&mut self, now_ms: f64) {
        while let Some(line) = self.script.get(self.current_line) {
            let len = line.char_len();
            let typed_end = self.line_started_ms + len as f64 * self.timing.char_ms;
            if now_ms < typed_end {
                let typed = ((now_ms - self.line_started_ms) / self.timing.char_ms).floor();
                self.typed_chars = (typed.max(0.0) as usize).min(len);
                return;
            }
            self.typed_chars = len;

            let next_start = typed_end + self.timing.line_pause_ms;
            if now_ms < next_start {
                return;
            }
            self.current_line += 1;
            self.typed_chars = 0;
            self.line_started_ms = next_start;
        }
    }

    /// True once per call end (hang-up or natural)
    pub fn take_ended(&mut self) -> bool {
        std::mem::take(&mut self.ended_pending)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route a click; Ringing absorbs everything, Answered only the panel
    pub fn handle_click(&mut self, pos: Vec2, now_ms: f64) -> CallClick {
        match self.phase {
            CallPhase::Ringing => {
                if self.answer_button_rect().contains(pos) {
                    self.answer(now_ms);
                    CallClick::Answered
                } else if self.hang_up_button_rect().contains(pos) {
                    self.hang_up();
                    CallClick::HungUp
                } else {
                    CallClick::Absorbed
                }
            }
            CallPhase::Answered => {
                if self.panel_hang_up_rect().contains(pos) {
                    self.hang_up();
                    CallClick::HungUp
                } else if self.panel_title_rect().contains(pos) {
                    let offset = pos - self.panel_rect.position();
                    self.panel_dragging = true;
                    self.panel_drag_offset = offset;
                    CallClick::PanelDragStarted { offset }
                } else if self.panel_rect.contains(pos) {
                    CallClick::Absorbed
                } else {
                    CallClick::Ignored
                }
            }
            CallPhase::Idle | CallPhase::Ended => CallClick::Ignored,
        }
    }

    /// Move the panel so the grab offset stays under the pointer
    pub fn drag_panel_to(&mut self, pos: Vec2) -> bool {
        if !self.panel_dragging {
            return false;
        }
        self.panel_rect = Rect::from_pos_size(pos - self.panel_drag_offset, PANEL_SIZE);
        true
    }

    pub fn end_panel_drag(&mut self) -> bool {
        std::mem::replace(&mut self.panel_dragging, false)
    }
}

/// Typed time plus inter-line pauses plus buffer
pub fn conversation_duration(script: &[ScriptLine], timing: &CallTiming) -> f64 {
    let total_chars: usize = script.iter().map(ScriptLine::char_len).sum();
    let pauses = script.len().saturating_sub(1);
    total_chars as f64 * timing.char_ms + pauses as f64 * timing.line_pause_ms + timing.buffer_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn machine(rng: &mut Pcg64Mcg) -> PhoneCallMachine {
        PhoneCallMachine::new(
            Size::new(1920.0, 1080.0),
            Interval::new(45000.0, 90000.0),
            CallTiming::default(),
            0.0,
            rng,
        )
    }

    fn caller() -> Caller {
        Caller {
            name: "Mama Velli".to_string(),
            number: "(555) 201-3344".to_string(),
        }
    }

    fn hi_bye() -> Vec<ScriptLine> {
        vec![
            ScriptLine::new(Speaker::Caller, "Hi"),
            ScriptLine::new(Speaker::Player, "Bye"),
        ]
    }

    #[test]
    fn test_geometry() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let m = machine(&mut rng);
        assert_eq!(m.popup_rect(), Rect::new(760.0, 440.0, 400.0, 200.0));
        assert_eq!(m.answer_button_rect(), Rect::new(810.0, 580.0, 120.0, 40.0));
        assert_eq!(m.hang_up_button_rect(), Rect::new(990.0, 580.0, 120.0, 40.0));
        assert_eq!(m.panel_rect(), Rect::new(1470.0, 730.0, 400.0, 300.0));
    }

    #[test]
    fn test_duration_formula() {
        let d = conversation_duration(&hi_bye(), &CallTiming::default());
        assert!((d - (5.0 * 50.0 + 800.0 + 5000.0)).abs() < 0.001);
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut m = machine(&mut rng);
        assert!(!m.answer(0.0));
        assert!(!m.hang_up());
        assert!(m.start(caller(), hi_bye()));
        assert!(!m.start(caller(), hi_bye()));
        assert_eq!(m.phase(), CallPhase::Ringing);
    }

    #[test]
    fn test_typed_reveal() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut m = machine(&mut rng);
        m.start(caller(), hi_bye());
        m.answer(1000.0);

        m.update(1060.0, &mut rng);
        assert_eq!(m.current_line(), 0);
        assert_eq!(m.typed_chars(), 1);

        m.update(1500.0, &mut rng);
        assert_eq!(m.typed_chars(), 2);
        assert_eq!(m.transcript().len(), 1);

        // Second line starts at 1000 + 100 + 800
        m.update(1950.0, &mut rng);
        assert_eq!(m.current_line(), 1);
        assert_eq!(m.typed_chars(), 1);
        assert_eq!(m.transcript()[1].text, "B");
    }

    #[test]
    fn test_call_ends_without_hang_up() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut m = machine(&mut rng);
        m.start(caller(), hi_bye());
        m.answer(0.0);

        m.update(1900.0, &mut rng);
        assert_eq!(m.phase(), CallPhase::Ended);
        assert!(!m.blocks_input());
        assert!(m.take_ended());
        assert!(!m.take_ended());

        m.update(1916.0, &mut rng);
        assert_eq!(m.phase(), CallPhase::Idle);
        assert!(m.next_call_at() >= 1916.0 + 45000.0);
    }

    #[test]
    fn test_budget_ends_long_line() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut m = machine(&mut rng);
        let long = "x".repeat(400);
        m.start(caller(), vec![ScriptLine::new(Speaker::Caller, long)]);
        m.conversation_duration_ms = 1000.0;
        m.answer(0.0);
        m.update(999.0, &mut rng);
        assert_eq!(m.phase(), CallPhase::Answered);
        assert!(m.typed_chars() <= 400);
        m.update(1000.0, &mut rng);
        assert_eq!(m.phase(), CallPhase::Ended);
    }

    #[test]
    fn test_ringing_absorbs_clicks() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut m = machine(&mut rng);
        m.start(caller(), hi_bye());

        assert_eq!(m.handle_click(Vec2::new(10.0, 10.0), 0.0), CallClick::Absorbed);
        assert_eq!(m.handle_click(Vec2::new(820.0, 590.0), 0.0), CallClick::Answered);
        assert_eq!(m.phase(), CallPhase::Answered);

        // Outside the panel while answered passes through
        assert_eq!(m.handle_click(Vec2::new(10.0, 10.0), 0.0), CallClick::Ignored);
    }

    #[test]
    fn test_panel_drag_and_hang_up() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut m = machine(&mut rng);
        m.start(caller(), hi_bye());
        m.answer(0.0);

        let click = m.handle_click(Vec2::new(1480.0, 740.0), 10.0);
        assert_eq!(click, CallClick::PanelDragStarted { offset: Vec2::new(10.0, 10.0) });
        assert!(m.drag_panel_to(Vec2::new(110.0, 110.0)));
        assert_eq!(m.panel_rect().position(), Vec2::new(100.0, 100.0));
        assert!(m.end_panel_drag());
        assert!(!m.drag_panel_to(Vec2::ZERO));

        let hang = m.panel_hang_up_rect();
        let click = m.handle_click(Vec2::new(hang.x + 1.0, hang.y + 1.0), 20.0);
        assert_eq!(click, CallClick::HungUp);
        assert_eq!(m.phase(), CallPhase::Ended);
    }

    #[test]
    fn test_try_trigger_without_callers_rerolls() {
        let mut rng = Pcg64Mcg::seed_from_u64(4);
        let mut m = machine(&mut rng);
        let due = m.next_call_at();
        assert!(!m.try_trigger(due, &mut rng, &ContentPools::empty(), false));
        assert_eq!(m.phase(), CallPhase::Idle);
        assert!(m.next_call_at() > due);

        let due = m.next_call_at();
        assert!(m.try_trigger(due, &mut rng, &ContentPools::builtin(), false));
        assert_eq!(m.phase(), CallPhase::Ringing);
        assert!(m.caller().is_some());
        assert!(!m.script().is_empty());
    }
}
