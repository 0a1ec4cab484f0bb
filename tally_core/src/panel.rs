//! # Slide-In Panels
//!
//! Lifecycle bookkeeping for the slide-in panels that share one dim backdrop.
//! The registry is headless: it tracks phases and deadlines in milliseconds on
//! a caller-supplied monotonic clock, and the front end draws whatever the
//! registry says is on screen.
//!
//! A panel moves `Entering -> Active -> Closing -> removed`. Opening shows a
//! loading placeholder until the entry delay elapses; closing keeps the panel
//! around for its slide-out window before removal. The backdrop is shared: it
//! is considered active while at least one panel is active, derived by a live
//! scan rather than a counter.
//!
//! ## Known limitation
//!
//! Scheduled removals are never cancelled. A panel reopened during its close
//! window is still removed when the stale deadline fires. Callers that need a
//! reopen inside the 300 ms window must reopen again afterwards; in practice
//! the window is too short for users to hit.

use tracing::debug;

/// Delay before an opened panel (and the backdrop) becomes active, ms
pub const ENTRY_DELAY_MS: u64 = 50;

/// How long a closing panel stays around for its exit transition, ms
pub const CLOSE_REMOVAL_MS: u64 = 300;

/// Header glyph used when the caller does not pick one
pub const DEFAULT_ICON: &str = "ℹ";

/// Header glyph color used when the caller does not pick one (green)
pub const DEFAULT_ICON_COLOR: [f32; 3] = [0.2, 0.6, 0.2];

/// Where a panel is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    /// Just opened, showing the loading placeholder
    Entering,
    /// Fully shown
    Active,
    /// Sliding out, removal scheduled
    Closing,
}

/// Presentation options for a panel header. Unset fields fall back to the
/// info glyph in green.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelOptions {
    /// Glyph shown next to the title
    pub icon: Option<String>,
    pub icon_color: Option<[f32; 3]>,
}

/// One open panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub icon_color: [f32; 3],
    pub phase: PanelPhase,
}

#[derive(Debug, Clone)]
enum DeadlineAction {
    Activate { id: String },
    Remove { id: String },
}

#[derive(Debug, Clone)]
struct Deadline {
    at_ms: u64,
    action: DeadlineAction,
}

/// Registry of open panels and their pending transitions
#[derive(Debug, Default)]
pub struct PanelRegistry {
    /// Insertion order is stacking order; the last entry is on top
    panels: Vec<PanelState>,
    pending: Vec<Deadline>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a panel, replacing any existing panel with the same id. The panel
    /// starts `Entering` and is activated once the entry delay elapses at a
    /// subsequent tick. Returns the id as the caller's handle.
    pub fn open(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        options: PanelOptions,
        now_ms: u64,
    ) -> String {
        let id = id.into();
        self.panels.retain(|p| p.id != id);
        self.panels.push(PanelState {
            id: id.clone(),
            title: title.into(),
            icon: options.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            icon_color: options.icon_color.unwrap_or(DEFAULT_ICON_COLOR),
            phase: PanelPhase::Entering,
        });
        self.pending.push(Deadline {
            at_ms: now_ms + ENTRY_DELAY_MS,
            action: DeadlineAction::Activate { id: id.clone() },
        });
        debug!(panel = %id, "panel opened");
        id
    }

    /// Begin closing a panel. The panel leaves the active set immediately
    /// (deactivating the backdrop if it was the last one) and is removed once
    /// its exit window elapses. Unknown ids are ignored.
    pub fn close(&mut self, id: &str, now_ms: u64) {
        let Some(panel) = self.panels.iter_mut().find(|p| p.id == id) else {
            debug!(panel = %id, "close requested for unknown panel");
            return;
        };
        if panel.phase == PanelPhase::Closing {
            return;
        }
        panel.phase = PanelPhase::Closing;
        self.pending.push(Deadline {
            at_ms: now_ms + CLOSE_REMOVAL_MS,
            action: DeadlineAction::Remove { id: id.to_string() },
        });
        debug!(panel = %id, "panel closing");
    }

    /// Process every deadline due at `now_ms`
    pub fn tick(&mut self, now_ms: u64) {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].at_ms <= now_ms {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|d| d.at_ms);
        for deadline in due {
            self.apply(deadline.action);
        }
    }

    fn apply(&mut self, action: DeadlineAction) {
        match action {
            DeadlineAction::Activate { id } => {
                if let Some(panel) = self.panels.iter_mut().find(|p| p.id == id) {
                    if panel.phase == PanelPhase::Entering {
                        panel.phase = PanelPhase::Active;
                        debug!(panel = %id, "panel active");
                    }
                }
            }
            // Removal is by id, not by instance: a stale deadline takes a
            // reopened panel down with it (see module docs)
            DeadlineAction::Remove { id } => {
                let before = self.panels.len();
                self.panels.retain(|p| p.id != id);
                if self.panels.len() != before {
                    debug!(panel = %id, "panel removed");
                }
            }
        }
    }

    /// Panels in stacking order, including those entering or closing
    pub fn panels(&self) -> &[PanelState] {
        &self.panels
    }

    pub fn get(&self, id: &str) -> Option<&PanelState> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Topmost panel that is not on its way out
    pub fn top(&self) -> Option<&PanelState> {
        self.panels
            .iter()
            .rev()
            .find(|p| p.phase != PanelPhase::Closing)
    }

    /// Whether the shared backdrop is active (live scan of active panels)
    pub fn overlay_active(&self) -> bool {
        self.panels.iter().any(|p| p.phase == PanelPhase::Active)
    }

    /// Background scrolling is suppressed exactly while the backdrop is active
    pub fn scroll_locked(&self) -> bool {
        self.overlay_active()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(registry: &mut PanelRegistry, id: &str, now: u64) -> String {
        registry.open(id, format!("{} title", id), PanelOptions::default(), now)
    }

    #[test]
    fn test_open_enters_then_activates() {
        let mut registry = PanelRegistry::new();
        let handle = open(&mut registry, "detail", 0);
        assert_eq!(handle, "detail");
        assert_eq!(registry.get("detail").unwrap().phase, PanelPhase::Entering);
        assert!(!registry.overlay_active());
        assert!(!registry.scroll_locked());

        registry.tick(ENTRY_DELAY_MS);
        assert_eq!(registry.get("detail").unwrap().phase, PanelPhase::Active);
        assert!(registry.overlay_active());
        assert!(registry.scroll_locked());
    }

    #[test]
    fn test_close_deactivates_then_removes() {
        let mut registry = PanelRegistry::new();
        open(&mut registry, "detail", 0);
        registry.tick(ENTRY_DELAY_MS);

        registry.close("detail", 100);
        assert_eq!(registry.get("detail").unwrap().phase, PanelPhase::Closing);
        // Last active panel gone: backdrop releases immediately
        assert!(!registry.overlay_active());
        assert!(!registry.scroll_locked());

        registry.tick(100 + CLOSE_REMOVAL_MS - 1);
        assert!(registry.get("detail").is_some());
        registry.tick(100 + CLOSE_REMOVAL_MS);
        assert!(registry.get("detail").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_overlay_tracks_both_panels() {
        let mut registry = PanelRegistry::new();
        open(&mut registry, "detail", 0);
        open(&mut registry, "about", 0);
        registry.tick(ENTRY_DELAY_MS);
        assert!(registry.overlay_active());

        registry.close("detail", 100);
        assert!(registry.overlay_active(), "one panel still active");

        registry.close("about", 150);
        assert!(!registry.overlay_active());
        assert!(!registry.scroll_locked());
    }

    #[test]
    fn test_reopen_replaces_same_id() {
        let mut registry = PanelRegistry::new();
        open(&mut registry, "detail", 0);
        registry.tick(ENTRY_DELAY_MS);
        assert_eq!(registry.panels().len(), 1);

        registry.open("detail", "Fresh title", PanelOptions::default(), 100);
        assert_eq!(registry.panels().len(), 1);
        let panel = registry.get("detail").unwrap();
        assert_eq!(panel.phase, PanelPhase::Entering);
        assert_eq!(panel.title, "Fresh title");
    }

    #[test]
    fn test_open_applies_header_defaults() {
        let mut registry = PanelRegistry::new();
        open(&mut registry, "detail", 0);
        let panel = registry.get("detail").unwrap();
        assert_eq!(panel.icon, DEFAULT_ICON);
        assert_eq!(panel.icon_color, DEFAULT_ICON_COLOR);

        registry.open(
            "about",
            "About",
            PanelOptions {
                icon: Some("●".into()),
                icon_color: Some([0.1, 0.2, 0.3]),
            },
            0,
        );
        let panel = registry.get("about").unwrap();
        assert_eq!(panel.icon, "●");
        assert_eq!(panel.icon_color, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_stale_removal_takes_reopened_panel() {
        let mut registry = PanelRegistry::new();
        open(&mut registry, "detail", 0);
        registry.tick(ENTRY_DELAY_MS);

        registry.close("detail", 100); // removal due at 400
        open(&mut registry, "detail", 200); // reopened inside the window
        registry.tick(200 + ENTRY_DELAY_MS);
        assert_eq!(registry.get("detail").unwrap().phase, PanelPhase::Active);

        // The stale deadline still fires and removes the reopened panel
        registry.tick(400);
        assert!(registry.get("detail").is_none());
    }

    #[test]
    fn test_close_unknown_id_is_ignored() {
        let mut registry = PanelRegistry::new();
        open(&mut registry, "detail", 0);
        registry.close("nope", 10);
        assert_eq!(registry.panels().len(), 1);
        assert_eq!(registry.get("detail").unwrap().phase, PanelPhase::Entering);
    }

    #[test]
    fn test_top_skips_closing_panels() {
        let mut registry = PanelRegistry::new();
        open(&mut registry, "detail", 0);
        open(&mut registry, "about", 10);
        registry.tick(ENTRY_DELAY_MS + 10);

        assert_eq!(registry.top().unwrap().id, "about");
        registry.close("about", 100);
        assert_eq!(registry.top().unwrap().id, "detail");
    }
}
