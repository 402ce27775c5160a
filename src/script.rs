//! Scripted input: events replayed on given frames in place of a live window.

use serde::{Deserialize, Serialize};

use crate::input::InputEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEntry {
    pub frame: usize,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// Entries ordered by frame; events of the same frame keep their file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputScript {
    entries: Vec<ScriptEntry>,
}

impl InputScript {
    pub fn new(mut entries: Vec<ScriptEntry>) -> Self {
        entries.sort_by_key(|entry| entry.frame);
        InputScript { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All events scheduled for `frame`
    pub fn events_for(&self, frame: usize) -> impl Iterator<Item = &InputEvent> + '_ {
        let start = self.entries.partition_point(|entry| entry.frame < frame);
        self.entries[start..]
            .iter()
            .take_while(move |entry| entry.frame == frame)
            .flat_map(|entry| entry.events.iter())
    }

    /// Last frame with scripted events
    pub fn last_frame(&self) -> Option<usize> {
        self.entries.last().map(|entry| entry.frame)
    }
}

/// Helpers for building scripts in code
impl InputScript {
    /// Press and release `key`: down on `frame`, up on the next one
    pub fn tap(frame: usize, key: crate::input::Key) -> [ScriptEntry; 2] {
        [
            ScriptEntry {
                frame,
                events: vec![InputEvent::KeyDown { key }],
            },
            ScriptEntry {
                frame: frame + 1,
                events: vec![InputEvent::KeyUp { key }],
            },
        ]
    }
}
