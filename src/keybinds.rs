use std::collections::HashSet;

use strum_macros::{Display, EnumIter};
use three_d::{Event, Key};

use super::control::CameraInput;

/// The logical actions the keyboard can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display)]
pub(crate) enum Action {
    Exit,
    ZoomIn,
    ZoomOut,
    Raise,
    Lower,
}

impl Action {
    pub(crate) const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Escape => Some(Self::Exit),
            Key::W => Some(Self::ZoomIn),
            Key::S => Some(Self::ZoomOut),
            Key::ArrowUp => Some(Self::Raise),
            Key::ArrowDown => Some(Self::Lower),
            _ => None,
        }
    }
}

/// The set of actions whose keys are currently held down.
#[derive(Clone, Debug, Default)]
pub(crate) struct KeyState {
    held: HashSet<Action>,
}

impl KeyState {
    pub(crate) fn handle_events(&mut self, events: &mut [Event]) {
        for event in events {
            match event {
                Event::KeyPress { kind, handled, .. } => {
                    if *handled {
                        continue;
                    }
                    if let Some(action) = Action::from_key(*kind) {
                        self.press(action);
                        *handled = true;
                    }
                }
                // Releases are never skipped, or a key could stay stuck.
                Event::KeyRelease { kind, .. } => {
                    if let Some(action) = Action::from_key(*kind) {
                        self.release(action);
                    }
                }
                // No focus events reach us, so a release can be missed
                // while the window is in the background.
                Event::MouseLeave => self.held.clear(),
                _ => (),
            }
        }
    }

    pub(crate) fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub(crate) fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub(crate) fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub(crate) fn camera_input(&self) -> CameraInput {
        CameraInput {
            zoom_in: self.is_held(Action::ZoomIn),
            zoom_out: self.is_held(Action::ZoomOut),
            raise: self.is_held(Action::Raise),
            lower: self.is_held(Action::Lower),
        }
    }

    pub(crate) fn exit_requested(&self) -> bool {
        self.is_held(Action::Exit)
    }
}
