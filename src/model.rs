//! Card state shared by the shell and the telemetry recorder.

/// The four card panels, shown one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Question1,
    Question2,
    Question3,
    Celebration,
}

impl Panel {
    /// Step label recorded with every interaction on this panel.
    pub fn step_label(&self) -> &'static str {
        match self {
            Panel::Question1 => "Q1: Do you like me?",
            Panel::Question2 => "Q2: Love Meter",
            Panel::Question3 => "Q3: Will you be my Valentine?",
            Panel::Celebration => "Celebration!",
        }
    }
}

/// Which panel is currently visible. At most one at a time; `Default` is
/// no panel at all (reported as "Unknown"), the state before the card is
/// shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFlow {
    visible: Option<Panel>,
}

impl CardFlow {
    /// A freshly opened card starts on the first question.
    pub fn new() -> Self {
        CardFlow {
            visible: Some(Panel::Question1),
        }
    }

    pub fn visible(&self) -> Option<Panel> {
        self.visible
    }

    /// Hide whatever is showing and reveal `panel` instead.
    pub fn show(&mut self, panel: Panel) {
        self.visible = Some(panel);
    }

    /// Final transition once the big question is answered.
    pub fn celebrate(&mut self) {
        self.show(Panel::Celebration);
    }

    /// Label for the visible panel, "Unknown" when nothing is showing.
    pub fn current_step_label(&self) -> &'static str {
        match self.visible {
            Some(panel) => panel.step_label(),
            None => "Unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Love meter
// ---------------------------------------------------------------------------

/// Overflow message tier once the meter is pushed past 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoveTier {
    Normal,
    High,
    Extreme,
}

impl LoveTier {
    pub fn message(&self) -> &'static str {
        match self {
            LoveTier::Normal => "And I love you too! 💕",
            LoveTier::High => "WOW! You REALLY love me! 🥰",
            LoveTier::Extreme => "INFINITE LOVE DETECTED!! 💖💘💝",
        }
    }
}

pub const LOVE_METER_MAX: u32 = 10_000;

/// The question-2 slider. Starts at 100%, clamps to [0, 10000].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoveMeter {
    value: u32,
}

impl LoveMeter {
    pub fn new() -> Self {
        LoveMeter { value: 100 }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.min(LOVE_METER_MAX);
    }

    /// Event label recorded each time the meter moves.
    pub fn event_label(&self) -> String {
        format!("Love Meter set to {}%", self.value)
    }

    /// Overflow tier for the current value; `None` at or below 100%.
    pub fn tier(&self) -> Option<LoveTier> {
        if self.value <= 100 {
            None
        } else if self.value >= 5000 {
            Some(LoveTier::Extreme)
        } else if self.value > 1000 {
            Some(LoveTier::High)
        } else {
            Some(LoveTier::Normal)
        }
    }
}

// ---------------------------------------------------------------------------
// Music player
// ---------------------------------------------------------------------------

/// Background music toggle. Each flip yields the label recorded for the
/// MUSIC event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicPlayer {
    playing: bool,
}

impl MusicPlayer {
    pub fn new() -> Self {
        MusicPlayer::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) -> &'static str {
        self.playing = !self.playing;
        if self.playing {
            "Music started"
        } else {
            "Music stopped"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_starts_on_question_1() {
        let flow = CardFlow::new();
        assert_eq!(flow.visible(), Some(Panel::Question1));
        assert_eq!(flow.current_step_label(), "Q1: Do you like me?");
    }

    #[test]
    fn flow_shows_one_panel_at_a_time() {
        let mut flow = CardFlow::new();
        flow.show(Panel::Question2);
        assert_eq!(flow.visible(), Some(Panel::Question2));
        assert_eq!(flow.current_step_label(), "Q2: Love Meter");
        flow.celebrate();
        assert_eq!(flow.visible(), Some(Panel::Celebration));
        assert_eq!(flow.current_step_label(), "Celebration!");
    }

    #[test]
    fn hidden_flow_reports_unknown() {
        let flow = CardFlow::default();
        assert_eq!(flow.visible(), None);
        assert_eq!(flow.current_step_label(), "Unknown");
    }

    #[test]
    fn meter_clamps_and_labels() {
        let mut meter = LoveMeter::new();
        assert_eq!(meter.value(), 100);
        meter.set(99_999);
        assert_eq!(meter.value(), LOVE_METER_MAX);
        meter.set(250);
        assert_eq!(meter.event_label(), "Love Meter set to 250%");
    }

    #[test]
    fn meter_tier_boundaries() {
        let mut meter = LoveMeter::new();
        meter.set(100);
        assert_eq!(meter.tier(), None);
        meter.set(101);
        assert_eq!(meter.tier(), Some(LoveTier::Normal));
        meter.set(1000);
        assert_eq!(meter.tier(), Some(LoveTier::Normal));
        meter.set(1001);
        assert_eq!(meter.tier(), Some(LoveTier::High));
        meter.set(4999);
        assert_eq!(meter.tier(), Some(LoveTier::High));
        meter.set(5000);
        assert_eq!(meter.tier(), Some(LoveTier::Extreme));
    }

    #[test]
    fn music_toggle_alternates_labels() {
        let mut music = MusicPlayer::new();
        assert!(!music.is_playing());
        assert_eq!(music.toggle(), "Music started");
        assert!(music.is_playing());
        assert_eq!(music.toggle(), "Music stopped");
        assert!(!music.is_playing());
    }
}
