use std::sync::Arc;

use web_time::Instant;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceEvent, ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::Window;

use crate::camera::Camera;
use crate::content::{pick_artwork, Artwork};
use crate::gallery::{Gallery, GalleryCommand};
use crate::input::InputState;
use crate::pointer_lock::PointerLock;
use crate::render::Renderer;
use crate::teleport::TeleportRequest;

/// Cursor position in window pixels to normalised device coordinates.
pub fn cursor_to_ndc(cursor: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> (f32, f32) {
    let w = size.width.max(1) as f64;
    let h = size.height.max(1) as f64;
    (
        (2.0 * cursor.x / w - 1.0) as f32,
        (1.0 - 2.0 * cursor.y / h) as f32,
    )
}

/// What a click at a screen point would act on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pick {
    Portal(TeleportRequest),
    Artwork(&'static Artwork),
}

/// Nearest clickable thing under the given screen point, if any.
pub fn pick(gallery: &Gallery, camera: &Camera, ndc: (f32, f32)) -> Option<Pick> {
    let (origin, dir) = camera.ray_through(ndc.0, ndc.1);
    let trigger = gallery.trigger();
    let portal = trigger
        .intersect_ray(origin, dir)
        .map(|t| (Pick::Portal(trigger.activate()), t));
    let artwork = pick_artwork(gallery.current_section(), origin, dir)
        .map(|(artwork, t)| (Pick::Artwork(artwork), t));
    [portal, artwork]
        .into_iter()
        .flatten()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(hit, _)| hit)
}

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    gallery: Gallery,
    input: InputState,
    pointer_lock: PointerLock,
    camera: Camera,
    hovered: Option<&'static Artwork>,
    cursor: PhysicalPosition<f64>,
    last_frame: Instant,
}

impl App {
    pub fn new(window: Arc<Window>, mut renderer: Renderer, gallery: Gallery) -> Self {
        let size = renderer.size();
        let mut camera = Camera::new(gallery.config(), 1.0);
        camera.set_viewport(size.width, size.height);
        camera.sync(gallery.player());
        renderer.upload_scene(gallery.current_section(), &gallery.trigger(), None);
        App {
            window,
            renderer,
            gallery,
            input: InputState::new(),
            pointer_lock: PointerLock::new(),
            camera,
            hovered: None,
            cursor: PhysicalPosition::new(0.0, 0.0),
            last_frame: Instant::now(),
        }
    }

    pub fn handle_event(&mut self, event: Event<()>, target: &EventLoopWindowTarget<()>) {
        match event {
            Event::AboutToWait => {
                if !self.frame() {
                    target.exit();
                    return;
                }
                self.window.request_redraw();
            }
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => self.input.handle_mouse_motion(delta),
            Event::WindowEvent { event, .. } => self.window_event(event, target),
            _ => {}
        }
    }

    fn window_event(&mut self, event: WindowEvent, target: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::Resized(new_size) => {
                self.renderer.resize(new_size);
                self.camera.set_viewport(new_size.width, new_size.height);
                // On macos the window needs to be redrawn manually after resizing
                self.window.request_redraw();
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.handle_key_event(&event);
                if self.input.take_escape() {
                    if self.gallery.inspected().is_some() {
                        self.gallery.queue(GalleryCommand::Dismiss);
                    }
                    if self.pointer_lock.is_locked() {
                        self.pointer_lock.release(&self.window);
                        self.input.set_pointer_locked(false);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor = position,
            WindowEvent::MouseInput { button, state, .. } => {
                self.input.handle_mouse_button(button, state);
                if button == MouseButton::Left && state == ElementState::Pressed {
                    self.on_primary_press();
                }
            }
            _ => {}
        }
    }

    /// Screen point the player is aiming with: the cursor, or the centre
    /// once the pointer is locked.
    fn aim_ndc(&self) -> (f32, f32) {
        if self.pointer_lock.is_locked() {
            (0.0, 0.0)
        } else {
            cursor_to_ndc(self.cursor, self.renderer.size())
        }
    }

    fn on_primary_press(&mut self) {
        // Pick before locking: once locked the cursor is pinned to the centre.
        match pick(&self.gallery, &self.camera, self.aim_ndc()) {
            Some(Pick::Portal(request)) => {
                log::debug!("portal clicked, heading to {}", request.target);
                self.gallery.request_teleport(request);
            }
            Some(Pick::Artwork(artwork)) => {
                self.gallery.queue(GalleryCommand::Inspect(artwork));
            }
            None => {}
        }

        if !self.pointer_lock.is_locked() && self.pointer_lock.request(&self.window) {
            self.input.set_pointer_locked(true);
        }
    }

    /// Advance and draw one frame. Returns false when rendering can't continue.
    fn frame(&mut self) -> bool {
        if let Some(locked) = self.pointer_lock.poll(&self.window) {
            self.input.set_pointer_locked(locked);
        }

        let now = Instant::now();
        let dt = (now - self.last_frame)
            .as_secs_f32()
            .min(self.gallery.config().max_frame_dt);
        self.last_frame = now;

        let snapshot = self.input.sample();
        let report = self.gallery.tick(&snapshot, dt);
        self.camera.sync(self.gallery.player());

        let hovered = match pick(&self.gallery, &self.camera, self.aim_ndc()) {
            Some(Pick::Artwork(artwork)) => Some(artwork),
            _ => None,
        };
        let hover_changed = hovered.map(|a| a.id) != self.hovered.map(|a| a.id);
        if hover_changed {
            if let Some(artwork) = hovered {
                log::debug!("looking at \"{}\"", artwork.metadata.title);
            }
            self.hovered = hovered;
        }
        if report.section_changed || hover_changed {
            self.renderer.upload_scene(
                self.gallery.current_section(),
                &self.gallery.trigger(),
                self.hovered.map(|a| a.id),
            );
        }

        match self.renderer.render(&self.camera) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, stopping");
                false
            }
            Err(err) => {
                log::warn!("skipped frame: {err}");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::section::SectionId;

    fn size() -> PhysicalSize<u32> {
        PhysicalSize::new(800, 600)
    }

    fn camera_facing(gallery: &Gallery, yaw: f32, z_offset: f32) -> Camera {
        let mut camera = Camera::new(gallery.config(), 4.0 / 3.0);
        let mut player = *gallery.player();
        player.facing_yaw = yaw;
        player.position.z += z_offset;
        camera.sync(&player);
        camera
    }

    #[test]
    fn cursor_maps_to_ndc() {
        assert_eq!(cursor_to_ndc(PhysicalPosition::new(400.0, 300.0), size()), (0.0, 0.0));
        assert_eq!(cursor_to_ndc(PhysicalPosition::new(0.0, 0.0), size()), (-1.0, 1.0));
        assert_eq!(cursor_to_ndc(PhysicalPosition::new(800.0, 600.0), size()), (1.0, -1.0));
    }

    #[test]
    fn clicking_the_portal_requests_the_next_section() {
        let gallery = Gallery::new(GalleryConfig::default());
        // Face down the corridor toward the portal.
        let camera = camera_facing(&gallery, 0.0, 0.0);

        let hit = pick(&gallery, &camera, (0.0, 0.0));
        assert_eq!(
            hit,
            Some(Pick::Portal(TeleportRequest {
                target: SectionId::Rome
            }))
        );
    }

    #[test]
    fn clicking_an_artwork_inspects_it() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        // Quarter turn left, level with the first row of frames.
        let camera = camera_facing(&gallery, std::f32::consts::FRAC_PI_2, -3.0);

        let Some(Pick::Artwork(artwork)) = pick(&gallery, &camera, (0.0, 0.0)) else {
            panic!("expected an artwork under the crosshair");
        };
        assert_eq!(artwork.id, "popei-1");

        gallery.queue(GalleryCommand::Inspect(artwork));
        let report = gallery.tick(&Default::default(), 0.016);
        assert_eq!(report.inspected.map(|a| a.metadata.title), Some("Pompeii Forum Overview"));
    }

    #[test]
    fn clicking_elsewhere_does_nothing() {
        let gallery = Gallery::new(GalleryConfig::default());
        // Initial facing looks at the entrance sign, away from the portal.
        let camera = camera_facing(&gallery, gallery.player().facing_yaw, 0.0);
        assert_eq!(pick(&gallery, &camera, (0.0, 0.0)), None);

        // Far right of the screen looks past the portal at bare wall.
        let camera = camera_facing(&gallery, 0.0, 0.0);
        assert_eq!(pick(&gallery, &camera, (0.95, 0.0)), None);
    }
}
