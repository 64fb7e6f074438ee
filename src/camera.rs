use cgmath::{
    Basis3, Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Rotation, Rotation3,
    SquareMatrix, Vector3, Vector4,
};

use crate::config::GalleryConfig;
use crate::movement::PlayerState;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// First-person camera. Only yaw is controllable; the eye height is fixed.
pub struct Camera {
    pub eye: Point3<f32>,
    pub yaw: f32,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &GalleryConfig, aspect: f32) -> Self {
        Camera {
            eye: Point3::new(0.0, config.eye_height, 0.0),
            yaw: config.initial_yaw,
            fovy: Deg(config.fovy_degrees),
            aspect,
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    /// Mirror the player's X/Z and facing; Y stays at eye height.
    pub fn sync(&mut self, player: &PlayerState) {
        self.eye.x = player.position.x;
        self.eye.z = player.position.z;
        self.yaw = player.facing_yaw;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn forward(&self) -> Vector3<f32> {
        Basis3::from_angle_y(Rad(self.yaw)).rotate_vector(-Vector3::unit_z())
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.eye, self.forward(), Vector3::unit_y())
    }

    pub fn projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection() * self.view()
    }

    /// World-space ray through a point in normalised device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32) -> (Point3<f32>, Vector3<f32>) {
        let Some(inverse) = self.view_projection().invert() else {
            return (self.eye, self.forward());
        };
        let unproject = |z: f32| {
            let p = inverse * Vector4::new(ndc_x, ndc_y, z, 1.0);
            Point3::from_vec(p.truncate() / p.w)
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        (self.eye, (far - near).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        let mut camera = Camera::new(&GalleryConfig::default(), 16.0 / 9.0);
        camera.yaw = 0.0;
        camera
    }

    #[test]
    fn zero_yaw_looks_down_negative_z() {
        let forward = camera().forward();
        assert!((forward - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);
    }

    #[test]
    fn sync_keeps_eye_height() {
        let mut camera = camera();
        let player = PlayerState::new(Point3::new(2.0, 50.0, -130.0), 0.5);
        camera.sync(&player);
        assert_eq!(camera.eye, Point3::new(2.0, 1.7, -130.0));
        assert_eq!(camera.yaw, 0.5);
    }

    #[test]
    fn centre_ray_matches_forward() {
        let mut camera = camera();
        camera.yaw = 0.8;
        camera.eye = Point3::new(1.0, 1.7, -104.0);
        let (origin, dir) = camera.ray_through(0.0, 0.0);
        assert_eq!(origin, camera.eye);
        assert!(
            (dir - camera.forward()).magnitude() < 1e-3,
            "centre ray {dir:?} vs forward {:?}",
            camera.forward()
        );
    }

    #[test]
    fn point_ahead_projects_to_screen_centre() {
        let camera = camera();
        let ahead = camera.eye + camera.forward() * 10.0;
        let clip = camera.view_projection() * ahead.to_homogeneous();
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4, "ndc={ndc:?}");
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth outside wgpu range: {}", ndc.z);
    }
}
