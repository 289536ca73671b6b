//! Refactor Radar
//!
//! Scores each component's structural load (lines, hooks, children, effects)
//! and flags the ones worth splitting up. Thresholds are deliberately blunt;
//! the radar points at candidates, it does not prove anything.

use serde::Serialize;

use crate::model::ComponentInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefactorSeverity {
    None,
    Warning,
    Critical,
}

impl RefactorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefactorSeverity::None => "none",
            RefactorSeverity::Warning => "warning",
            RefactorSeverity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RefactorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural pressure signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefactorSignal {
    pub kind: SignalKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    LargeLoc,
    MediumLoc,
    ManyHooks,
    SeveralHooks,
    ManyChildren,
    SeveralChildren,
    ManyEffects,
}

/// The radar verdict for one component.
#[derive(Debug, Clone, Serialize)]
pub struct RefactorScore {
    pub component: String,
    pub file_path: String,
    pub severity: RefactorSeverity,
    pub signals: Vec<RefactorSignal>,
}

pub fn score_component(info: &ComponentInfo) -> RefactorScore {
    let mut signals = Vec::new();

    if info.loc >= 350 {
        signals.push(RefactorSignal {
            kind: SignalKind::LargeLoc,
            message: format!("{} lines long; consider splitting into subcomponents", info.loc),
        });
    } else if info.loc >= 200 {
        signals.push(RefactorSignal {
            kind: SignalKind::MediumLoc,
            message: format!("{} lines long; keep an eye on growth", info.loc),
        });
    }

    let hook_count = info.hooks.len();
    if hook_count >= 15 {
        signals.push(RefactorSignal {
            kind: SignalKind::ManyHooks,
            message: format!("{hook_count} hooks; extract custom hooks"),
        });
    } else if hook_count >= 8 {
        signals.push(RefactorSignal {
            kind: SignalKind::SeveralHooks,
            message: format!("{hook_count} hooks"),
        });
    }

    let child_count = info.children.len();
    if child_count >= 8 {
        signals.push(RefactorSignal {
            kind: SignalKind::ManyChildren,
            message: format!("renders {child_count} distinct components; likely doing too much"),
        });
    } else if child_count >= 4 {
        signals.push(RefactorSignal {
            kind: SignalKind::SeveralChildren,
            message: format!("renders {child_count} distinct components"),
        });
    }

    let effect_count = info.line_ranges.effects.len();
    if effect_count >= 4 {
        signals.push(RefactorSignal {
            kind: SignalKind::ManyEffects,
            message: format!("{effect_count} effects; consider consolidating side effects"),
        });
    }

    let heavy = signals
        .iter()
        .filter(|s| {
            matches!(
                s.kind,
                SignalKind::LargeLoc | SignalKind::ManyHooks | SignalKind::ManyChildren
            )
        })
        .count();

    let severity = if info.loc >= 400 || heavy >= 2 {
        RefactorSeverity::Critical
    } else if signals.is_empty() {
        RefactorSeverity::None
    } else {
        RefactorSeverity::Warning
    };

    RefactorScore {
        component: info.name.clone(),
        file_path: info.file_path.clone(),
        severity,
        signals,
    }
}

/// Score every component, keeping only flagged ones, worst first.
pub fn scan<'a, I>(components: I) -> Vec<RefactorScore>
where
    I: IntoIterator<Item = &'a ComponentInfo>,
{
    let mut scores: Vec<RefactorScore> = components
        .into_iter()
        .map(score_component)
        .filter(|score| score.severity != RefactorSeverity::None)
        .collect();
    scores.sort_by(|a, b| b.severity.cmp(&a.severity));
    scores
}
