use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

/// Physical keys and the logical direction each one drives. Several keys
/// may share a direction.
const KEY_BINDINGS: [(KeyCode, Direction); 8] = [
    (KeyCode::KeyW, Direction::Forward),
    (KeyCode::ArrowUp, Direction::Forward),
    (KeyCode::KeyS, Direction::Back),
    (KeyCode::ArrowDown, Direction::Back),
    (KeyCode::KeyA, Direction::Left),
    (KeyCode::ArrowLeft, Direction::Left),
    (KeyCode::KeyD, Direction::Right),
    (KeyCode::ArrowRight, Direction::Right),
];

/// Input for a single frame. Built fresh by [`InputState::sample`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Horizontal mouse motion in pixels since the previous sample. Zero
    /// unless look is active (pointer locked or primary button dragging).
    pub mouse_delta_x: f32,
    pub pointer_locked: bool,
}

impl InputSnapshot {
    pub fn any_direction(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

pub struct InputState {
    held: [bool; KEY_BINDINGS.len()],
    mouse_dx: f64,
    primary_held: bool,
    pointer_locked: bool,
    escape_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            held: [false; KEY_BINDINGS.len()],
            mouse_dx: 0.0,
            primary_held: false,
            pointer_locked: false,
            escape_pressed: false,
        }
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.handle_key(code, event.state.is_pressed());
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if code == KeyCode::Escape {
            if pressed {
                self.escape_pressed = true;
            }
            return;
        }
        for (slot, (key, _)) in KEY_BINDINGS.iter().enumerate() {
            if *key == code {
                self.held[slot] = pressed;
            }
        }
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.primary_held = state.is_pressed();
        }
    }

    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_dx += delta.0;
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
        if !locked {
            self.primary_held = false;
        }
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Window lost focus: key-up events will never arrive, so forget everything held.
    pub fn release_all(&mut self) {
        self.held = [false; KEY_BINDINGS.len()];
        self.primary_held = false;
        self.mouse_dx = 0.0;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        KEY_BINDINGS
            .iter()
            .zip(self.held.iter())
            .any(|((_, bound), held)| *held && *bound == direction)
    }

    pub fn look_active(&self) -> bool {
        self.pointer_locked || self.primary_held
    }

    pub fn take_escape(&mut self) -> bool {
        let v = self.escape_pressed;
        self.escape_pressed = false;
        v
    }

    /// Snapshot the current state and drain the accumulated mouse delta.
    pub fn sample(&mut self) -> InputSnapshot {
        let dx = self.mouse_dx as f32;
        self.mouse_dx = 0.0;
        InputSnapshot {
            forward: self.is_held(Direction::Forward),
            back: self.is_held(Direction::Back),
            left: self.is_held(Direction::Left),
            right: self.is_held(Direction::Right),
            mouse_delta_x: if self.look_active() { dx } else { 0.0 },
            pointer_locked: self.pointer_locked,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_letter_keys_share_a_direction() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::KeyW, true);
        input.handle_key(KeyCode::ArrowUp, true);
        input.handle_key(KeyCode::KeyW, false);
        assert!(input.sample().forward, "ArrowUp still held");
        input.handle_key(KeyCode::ArrowUp, false);
        assert!(!input.sample().forward);
    }

    #[test]
    fn every_direction_has_two_keys() {
        for direction in [
            Direction::Forward,
            Direction::Back,
            Direction::Left,
            Direction::Right,
        ] {
            let keys: Vec<_> = KEY_BINDINGS
                .iter()
                .filter(|(_, bound)| *bound == direction)
                .map(|(key, _)| *key)
                .collect();
            assert_eq!(keys.len(), 2, "{direction:?} bound to {keys:?}");
            let mut input = InputState::new();
            for key in keys {
                input.handle_key(key, true);
                assert!(input.is_held(direction));
                input.handle_key(key, false);
                assert!(!input.is_held(direction));
            }
        }
    }

    #[test]
    fn mouse_delta_is_drained_once_per_sample() {
        let mut input = InputState::new();
        input.set_pointer_locked(true);
        input.handle_mouse_motion((3.0, 1.0));
        input.handle_mouse_motion((2.0, -4.0));
        assert_eq!(input.sample().mouse_delta_x, 5.0);
        assert_eq!(input.sample().mouse_delta_x, 0.0);
    }

    #[test]
    fn lock_and_drag_together_do_not_double_apply() {
        let mut input = InputState::new();
        input.set_pointer_locked(true);
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.handle_mouse_motion((10.0, 0.0));
        let snapshot = input.sample();
        assert_eq!(snapshot.mouse_delta_x, 10.0);
        assert!(snapshot.pointer_locked);
    }

    #[test]
    fn motion_without_lock_or_drag_is_discarded() {
        let mut input = InputState::new();
        input.handle_mouse_motion((7.0, 0.0));
        assert_eq!(input.sample().mouse_delta_x, 0.0);

        // Not carried over into a later drag either.
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(input.sample().mouse_delta_x, 0.0);
        input.handle_mouse_motion((4.0, 0.0));
        assert_eq!(input.sample().mouse_delta_x, 4.0);
    }

    #[test]
    fn losing_pointer_lock_ends_drag() {
        let mut input = InputState::new();
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.set_pointer_locked(true);
        input.set_pointer_locked(false);
        assert!(!input.look_active());
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::KeyD, true);
        input.handle_key(KeyCode::ArrowDown, true);
        input.release_all();
        let snapshot = input.sample();
        assert!(!snapshot.any_direction());
    }

    #[test]
    fn escape_is_latched_until_taken() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Escape, true);
        input.handle_key(KeyCode::Escape, false);
        assert!(input.take_escape());
        assert!(!input.take_escape());
    }
}
