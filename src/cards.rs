use serde_json::{json, Value};

use crate::kpi::TaskKpis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Pending,
    Overdue,
    CompletedThisWeek,
    HighPriorityOpen,
}

impl CardKind {
    pub const ALL: [CardKind; 4] = [
        CardKind::Pending,
        CardKind::Overdue,
        CardKind::CompletedThisWeek,
        CardKind::HighPriorityOpen,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::CompletedThisWeek => "completedThisWeek",
            Self::HighPriorityOpen => "highPriorityOpen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Warning,
    Good,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Warning => "warning",
            Self::Good => "good",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CardRenderer {
    pub kind: CardKind,
    pub label: &'static str,
    pub glyph: &'static str,
    value: fn(&TaskKpis) -> usize,
    tone: fn(usize) -> Tone,
}

impl CardRenderer {
    pub fn value(&self, kpis: &TaskKpis) -> usize {
        (self.value)(kpis)
    }

    pub fn tone(&self, kpis: &TaskKpis) -> Tone {
        (self.tone)(self.value(kpis))
    }

    pub fn render_text(&self, kpis: &TaskKpis) -> String {
        format!("{} {:<22} {}", self.glyph, self.label, self.value(kpis))
    }

    pub fn render_json(&self, kpis: &TaskKpis) -> Value {
        json!({
            "kind": self.kind.key(),
            "label": self.label,
            "value": self.value(kpis),
            "tone": self.tone(kpis).as_str()
        })
    }
}

fn renderer_for(kind: CardKind) -> CardRenderer {
    match kind {
        CardKind::Pending => CardRenderer {
            kind,
            label: "Pending tasks",
            glyph: "[ ]",
            value: |k| k.pending,
            tone: |_| Tone::Neutral,
        },
        CardKind::Overdue => CardRenderer {
            kind,
            label: "Overdue",
            glyph: "[!]",
            value: |k| k.overdue,
            tone: |n| if n > 0 { Tone::Warning } else { Tone::Good },
        },
        CardKind::CompletedThisWeek => CardRenderer {
            kind,
            label: "Completed this week",
            glyph: "[x]",
            value: |k| k.completed_this_week,
            tone: |n| if n > 0 { Tone::Good } else { Tone::Neutral },
        },
        CardKind::HighPriorityOpen => CardRenderer {
            kind,
            label: "High priority open",
            glyph: "[^]",
            value: |k| k.high_priority_open,
            tone: |n| if n > 0 { Tone::Warning } else { Tone::Neutral },
        },
    }
}

pub struct CardRegistry {
    renderers: Vec<CardRenderer>,
}

impl CardRegistry {
    pub fn new(kinds: &[CardKind]) -> Self {
        Self {
            renderers: kinds.iter().copied().map(renderer_for).collect(),
        }
    }

    pub fn get(&self, kind: CardKind) -> Option<&CardRenderer> {
        self.renderers.iter().find(|r| r.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRenderer> {
        self.renderers.iter()
    }
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::new(&CardKind::ALL)
    }
}
