//! Artwork catalogue for each section.
//!
//! Frames alternate between the left and right corridor walls, three rows
//! deep. Placement drives rendering and picking; image references and
//! metadata are carried through for whoever presents a selected artwork.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Point3, Vector3};

use crate::section::{Section, SectionId};

const WALL_X: f32 = 4.9;
const HANG_HEIGHT: f32 = 2.0;
const ROW_Z: [f32; 3] = [-3.0, -8.0, -13.0];
pub const FRAME_SIZE: [f32; 2] = [3.0, 2.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArtworkMetadata {
    pub title: &'static str,
    pub location: &'static str,
    pub date: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Artwork {
    pub id: &'static str,
    pub section: SectionId,
    /// Even slots hang on the left wall, odd on the right; slot / 2 is the row.
    pub slot: u8,
    pub image: &'static str,
    pub metadata: ArtworkMetadata,
}

impl Artwork {
    /// Section-local position of the frame centre.
    pub fn position(&self) -> Vector3<f32> {
        let row = ROW_Z[(self.slot as usize / 2) % ROW_Z.len()];
        let x = if self.on_left_wall() { -WALL_X } else { WALL_X };
        Vector3::new(x, HANG_HEIGHT, row)
    }

    /// Rotation about +Y so the picture faces into the corridor.
    pub fn yaw(&self) -> f32 {
        if self.on_left_wall() {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        }
    }

    pub fn size(&self) -> [f32; 2] {
        FRAME_SIZE
    }

    /// Unit normal of the picture surface.
    pub fn normal(&self) -> Vector3<f32> {
        let yaw = self.yaw();
        Vector3::new(yaw.sin(), 0.0, yaw.cos())
    }

    /// Distance along the ray to the picture rectangle, if the ray hits it
    /// from either side.
    pub fn intersect_ray(
        &self,
        section: &Section,
        origin: Point3<f32>,
        dir: Vector3<f32>,
    ) -> Option<f32> {
        let center = section.to_world(self.position());
        let normal = self.normal();
        let facing = dir.dot(normal);
        if !(facing.abs() > 1e-6) {
            return None;
        }
        let t = (center - origin).dot(normal) / facing;
        if !(t >= 0.0) {
            return None;
        }
        let offset = origin + dir * t - center;
        let across = Vector3::new(normal.z, 0.0, -normal.x);
        let [w, h] = self.size();
        (offset.dot(across).abs() <= w * 0.5 && offset.y.abs() <= h * 0.5).then_some(t)
    }

    fn on_left_wall(&self) -> bool {
        self.slot % 2 == 0
    }
}

macro_rules! artwork {
    ($id:literal, $section:ident, $slot:literal, $image:literal, $title:literal, $location:literal) => {
        Artwork {
            id: $id,
            section: SectionId::$section,
            slot: $slot,
            image: $image,
            metadata: ArtworkMetadata {
                title: $title,
                location: $location,
                date: "2025",
            },
        }
    };
}

pub const CATALOGUE: &[Artwork] = &[
    artwork!("popei-1", Pompeii, 0, "/images/Popei/DJI_20250201220109_0959_D.JPG", "Pompeii Forum Overview", "Pompeii Archaeological Park, Italy"),
    artwork!("popei-2", Pompeii, 1, "/images/Popei/DJI_20250201220902_0966_D.JPG", "Pompeii Streets", "Via dell'Abbondanza, Pompeii"),
    artwork!("popei-3", Pompeii, 2, "/images/Popei/DJI_20250201221022_0967_D.JPG", "House of the Faun", "Pompeii Archaeological Park, Italy"),
    artwork!("popei-4", Pompeii, 3, "/images/Popei/DJI_20250201221859_0973_D.JPG", "Pompeii Amphitheater", "Pompeii Archaeological Park, Italy"),
    artwork!("popei-5", Pompeii, 4, "/images/Popei/DJI_20250202210832_0015_D.JPG", "Temple of Apollo", "Pompeii Forum, Italy"),
    artwork!("popei-6", Pompeii, 5, "/images/Popei/DJI_20250202213115_0028_D.JPG", "Villa of the Mysteries", "Pompeii Archaeological Park, Italy"),
    artwork!("rome-1", Rome, 0, "/images/Rome/DJI_20250119230401_0089_D.JPG", "Roman Colosseum", "Rome, Italy"),
    artwork!("rome-2", Rome, 1, "/images/Rome/DJI_20250120222428_0136_D.jpg", "Roman Forum", "Rome, Italy"),
    artwork!("rome-3", Rome, 2, "/images/Rome/DJI_20250128001948_0674_D.jpg", "Trevi Fountain", "Rome, Italy"),
    artwork!("rome-4", Rome, 3, "/images/Rome/DJI_20250128022635_0679_D.jpg", "Pantheon", "Rome, Italy"),
    artwork!("rome-5", Rome, 4, "/images/Rome/DJI_20250128221559_0693_D.jpg", "Piazza Navona", "Rome, Italy"),
    artwork!("rome-6", Rome, 5, "/images/Rome/DJI_20250204003251_0078_D.JPG", "Spanish Steps", "Rome, Italy"),
    artwork!("vatican-1", Vatican, 0, "/images/Vatican/DJI_20250121222137_0237_D.jpg", "St. Peter's Basilica", "Vatican City"),
    artwork!("vatican-2", Vatican, 1, "/images/Vatican/DJI_20250121222959_0250_D.jpg", "St. Peter's Square", "Vatican City"),
    artwork!("vatican-3", Vatican, 2, "/images/Vatican/DJI_20250121232010_0281_D.jpg", "Sistine Chapel", "Vatican Museums, Vatican City"),
    artwork!("vatican-4", Vatican, 3, "/images/Vatican/DJI_20250122002419_0295_D.jpg", "Vatican Museums", "Vatican City"),
    artwork!("vatican-5", Vatican, 4, "/images/Vatican/DJI_20250122003726_0309_D.jpg", "Castel Sant'Angelo", "Adjacent to Vatican City, Rome"),
    artwork!("vatican-6", Vatican, 5, "/images/Vatican/DJI_20250122003835_0311_D.jpg", "Raphael Rooms", "Vatican Museums, Vatican City"),
    artwork!("venice-1", Venice, 0, "/images/Venice/DJI_20250125194335_0479_D.jpg", "Grand Canal", "Venice, Italy"),
    artwork!("venice-2", Venice, 1, "/images/Venice/DJI_20250125202014_0501_D.jpg", "St. Mark's Square", "Venice, Italy"),
    artwork!("venice-3", Venice, 2, "/images/Venice/DJI_20250125203104_0504_D.jpg", "Rialto Bridge", "Venice, Italy"),
    artwork!("venice-4", Venice, 3, "/images/Venice/DJI_20250125210155_0523_D.jpg", "Bridge of Sighs", "Venice, Italy"),
    artwork!("venice-5", Venice, 4, "/images/Venice/DJI_20250126000238_0529_D.jpg", "Venetian Gondolas", "Venice, Italy"),
    artwork!("venice-6", Venice, 5, "/images/Venice/DJI_20250126220101_0637_D.jpg", "Venetian Islands", "Venice Lagoon, Italy"),
];

/// Artworks hung in `section`, in authored order.
pub fn artworks_for(section: SectionId) -> impl Iterator<Item = &'static Artwork> {
    CATALOGUE.iter().filter(move |artwork| artwork.section == section)
}

/// Nearest artwork of `section` along the ray, with its distance.
pub fn pick_artwork(
    section: &Section,
    origin: Point3<f32>,
    dir: Vector3<f32>,
) -> Option<(&'static Artwork, f32)> {
    artworks_for(section.id)
        .filter_map(|artwork| Some((artwork, artwork.intersect_ray(section, origin, dir)?)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
