use enigo::{Enigo, MouseButton, MouseControllable};
use parking_lot::Mutex;

/// Cursor and mouse-button access.
/// This abstraction allows recording clicks in tests.
pub trait Pointer {
    fn cursor_position(&self) -> (i32, i32);
    fn move_to(&self, x: i32, y: i32);
    fn left_down(&self, x: i32, y: i32);
    fn left_up(&self, x: i32, y: i32);
}

/// Injects real input through enigo.
pub struct EnigoPointer {
    enigo: Mutex<Enigo>,
}

impl EnigoPointer {
    pub fn new() -> Self {
        Self { enigo: Mutex::new(Enigo::new()) }
    }
}

impl Default for EnigoPointer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pointer for EnigoPointer {
    fn cursor_position(&self) -> (i32, i32) {
        self.enigo.lock().mouse_location()
    }

    fn move_to(&self, x: i32, y: i32) {
        self.enigo.lock().mouse_move_to(x, y);
    }

    // enigo presses at wherever the cursor is; move_to runs first.
    fn left_down(&self, _x: i32, _y: i32) {
        self.enigo.lock().mouse_down(MouseButton::Left);
    }

    fn left_up(&self, _x: i32, _y: i32) {
        self.enigo.lock().mouse_up(MouseButton::Left);
    }
}

#[cfg(test)]
pub use fake::{FakePointer, PointerEvent};

#[cfg(test)]
mod fake {
    use super::Pointer;
    use parking_lot::Mutex;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum PointerEvent {
        Move(i32, i32),
        Down(i32, i32),
        Up(i32, i32),
    }

    #[derive(Default)]
    pub struct FakePointer {
        pub position: Mutex<(i32, i32)>,
        pub events: Mutex<Vec<PointerEvent>>,
    }

    impl FakePointer {
        pub fn at(x: i32, y: i32) -> Self {
            Self { position: Mutex::new((x, y)), ..Self::default() }
        }

        pub fn events(&self) -> Vec<PointerEvent> {
            self.events.lock().clone()
        }
    }

    impl Pointer for FakePointer {
        fn cursor_position(&self) -> (i32, i32) {
            *self.position.lock()
        }

        fn move_to(&self, x: i32, y: i32) {
            *self.position.lock() = (x, y);
            self.events.lock().push(PointerEvent::Move(x, y));
        }

        fn left_down(&self, x: i32, y: i32) {
            self.events.lock().push(PointerEvent::Down(x, y));
        }

        fn left_up(&self, x: i32, y: i32) {
            self.events.lock().push(PointerEvent::Up(x, y));
        }
    }
}
