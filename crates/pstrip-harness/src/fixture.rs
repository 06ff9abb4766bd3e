//! Owned inputs for building a [`StatusStrip`] from a scenario.

use std::path::Path;

use ahash::AHashMap;
use pstrip_core::capture::PointerCapture;
use pstrip_core::event::{Modifiers, MouseButton, MouseEvent, MouseEventKind};
use pstrip_core::geometry::Rect;
use pstrip_render::frame::Frame;
use pstrip_widgets::config::StripConfig;
use pstrip_widgets::coords::midpoint_column;
use pstrip_widgets::{PartitionState, StatefulWidget, StatusStrip, StatusStripState};

use crate::error::{HarnessError, Result};
use crate::scenario::{EventKind, EventSpec, Scenario, StripOptions};

pub const DEFAULT_WIDTH: u16 = 80;

#[derive(Debug, Clone)]
pub struct Fixture {
    pub names: Vec<String>,
    pub states: AHashMap<String, PartitionState>,
    pub config: StripConfig,
    pub options: StripOptions,
    pub width: u16,
}

impl Fixture {
    /// Resolve a scenario; a relative `config` path is taken from `base_dir`.
    pub fn from_scenario(scenario: &Scenario, base_dir: &Path, width: Option<u16>) -> Result<Self> {
        let config = match &scenario.config {
            Some(path) => StripConfig::from_file(base_dir.join(path))?,
            None => StripConfig::default(),
        };
        let mut states = AHashMap::with_capacity(scenario.partitions.len());
        for partition in &scenario.partitions {
            states.insert(partition.name.clone(), partition.resolved_state()?);
        }
        let width = width.or(scenario.strip.width).unwrap_or(DEFAULT_WIDTH);
        if width == 0 {
            return Err(HarnessError::invalid("width must be at least 1"));
        }
        Ok(Self {
            names: scenario.partitions.iter().map(|p| p.name.clone()).collect(),
            states,
            config,
            options: scenario.strip.clone(),
            width,
        })
    }

    pub fn initial_selection(&self) -> Vec<String> {
        self.options.selected.clone().unwrap_or_default()
    }

    /// Strip configured from the scenario, drawing `selected` when selection is enabled.
    pub fn strip<'a>(&'a self, selected: &'a [String]) -> StatusStrip<'a> {
        let mut strip = StatusStrip::new(&self.names)
            .states(&self.states)
            .split(self.options.split)
            .small(self.options.small)
            .clickable(self.options.clickable)
            .hide_status_tooltip(self.options.hide_status_tooltip)
            .layout(self.config.layout())
            .theme(self.config.theme);
        if self.options.selected.is_some() {
            strip = strip.selected(selected);
        }
        if let Some(size) = self.options.selection_window_size {
            strip = strip.selection_window_size(size);
        }
        if let Some(message) = self.options.tooltip_message.as_deref() {
            strip = strip.tooltip_message(message);
        }
        strip
    }

    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| HarnessError::unknown_partition(name))
    }

    /// First status row: below the marker row when selection is enabled.
    pub fn status_row(&self) -> u16 {
        u16::from(self.options.selected.is_some())
    }

    /// Translate a scripted event into a mouse event.
    pub fn mouse_event(&self, event: &EventSpec) -> Result<MouseEvent> {
        let x = match (&event.partition, event.x) {
            (Some(name), _) => {
                let idx = self.index_of(name)?;
                midpoint_column(idx, self.names.len(), self.width)
                    .ok_or_else(|| HarnessError::unknown_partition(name.as_str()))?
            }
            (None, Some(x)) => x,
            (None, None) => return Err(HarnessError::invalid("event has no target")),
        };
        let kind = match event.kind {
            EventKind::Down => MouseEventKind::Down(MouseButton::Left),
            EventKind::Drag => MouseEventKind::Drag(MouseButton::Left),
            EventKind::Move => MouseEventKind::Moved,
            EventKind::Up => MouseEventKind::Up(MouseButton::Left),
        };
        let modifiers = if event.shift {
            Modifiers::SHIFT
        } else {
            Modifiers::NONE
        };
        Ok(MouseEvent::new(kind, x, event.y.unwrap_or_else(|| self.status_row())).with_modifiers(modifiers))
    }

    /// Render one frame with `state`, refreshing its geometry.
    pub fn render(&self, selected: &[String], state: &mut StatusStripState) -> Frame {
        let strip = self.strip(selected);
        let height = strip.height();
        let mut frame = Frame::new(self.width, height);
        strip.render(Rect::from_size(self.width, height), &mut frame, state);
        frame
    }

    /// Fresh interaction state on its own capture registry.
    pub fn new_state(&self) -> (PointerCapture, StatusStripState) {
        let capture = PointerCapture::new();
        let state = StatusStripState::new(&capture);
        (capture, state)
    }
}
