use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Canvas-relative CSS pixels.
    PointerMoved { x: f32, y: f32 },
    Clicked,
    HomeRequested,
    DirectionChosen(Direction),
    Resized { width: u32, height: u32 },
    DebugChanged { index: usize, value: f32 },
}

/// Events collected by DOM listeners between two frames. Handles share the
/// same queue, the frame loop drains it once per tick.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl InputQueue {
    pub fn push(&self, event: InputEvent) {
        let mut events = self.events.borrow_mut();

        // only the latest pointer position matters
        if let (InputEvent::PointerMoved { .. }, Some(InputEvent::PointerMoved { .. })) =
            (event, events.back())
        {
            events.pop_back();
        }
        events.push_back(event);
    }

    pub fn drain(&self) -> Vec<InputEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
