//=========================================================================
// Scripted Platform (tests only)
//=========================================================================
//
// In-memory `Platform` that replays queued event batches and records
// what the game presents.
//
//=========================================================================

use std::collections::VecDeque;

use super::{Platform, PlatformError, PlatformEvent, WindowConfig};
use crate::core::math::Vec2;
use crate::core::surface::Surface;

#[derive(Debug, Default)]
pub(crate) struct ScriptedPlatform {
    pub batches: VecDeque<Vec<PlatformEvent>>,
    pub opened: Option<WindowConfig>,
    pub initial_size: Option<Vec2>,
    pub fail_open: bool,
    pub titles: Vec<String>,
    pub presented: Vec<Surface>,
    pub shutdown_calls: usize,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one batch returned by the next `poll_events`.
    pub fn push_batch(&mut self, batch: Vec<PlatformEvent>) {
        self.batches.push_back(batch);
    }

    pub fn last_frame(&self) -> Option<&Surface> {
        self.presented.last()
    }
}

impl Platform for ScriptedPlatform {
    fn open(&mut self, config: &WindowConfig) -> Result<Vec2, PlatformError> {
        if self.fail_open {
            return Err(PlatformError::WindowCreation("scripted failure".into()));
        }
        self.opened = Some(config.clone());
        Ok(self.initial_size.unwrap_or(config.size))
    }

    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
        if let Some(batch) = self.batches.pop_front() {
            events.extend(batch);
        }
    }

    fn present(&mut self, frame: &Surface) -> Result<(), PlatformError> {
        if self.opened.is_none() {
            return Err(PlatformError::NotOpen);
        }
        self.presented.push(frame.clone());
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn shutdown(&mut self) {
        self.shutdown_calls += 1;
        self.opened = None;
    }
}
