//! Section registry and the per-section movement envelope.
//!
//! Sections form a closed set, so every lookup by [`SectionId`] is total.
//! String ids only enter at the edges (content references, debugging) and
//! are resolved leniently: anything unrecognised maps to the default section.

use std::fmt;
use std::str::FromStr;

use cgmath::{Point3, Vector3};

use crate::config::GalleryConfig;
use crate::error::GalleryError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Pompeii,
    Rome,
    Vatican,
    Venice,
}

impl SectionId {
    pub const COUNT: usize = 4;
    pub const ALL: [SectionId; Self::COUNT] = [
        SectionId::Pompeii,
        SectionId::Rome,
        SectionId::Vatican,
        SectionId::Venice,
    ];

    pub fn index(self) -> usize {
        match self {
            SectionId::Pompeii => 0,
            SectionId::Rome => 1,
            SectionId::Vatican => 2,
            SectionId::Venice => 3,
        }
    }

    /// Stable identifier used by content references.
    pub fn name(self) -> &'static str {
        match self {
            SectionId::Pompeii => "popei",
            SectionId::Rome => "rome",
            SectionId::Vatican => "vatican",
            SectionId::Venice => "venice",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Pompeii => "Pompeii Ruins",
            SectionId::Rome => "Rome Cityscape",
            SectionId::Vatican => "Vatican Arts",
            SectionId::Venice => "Venice Waterways",
        }
    }

    /// Resolve a string id, substituting `default` for anything unknown.
    pub fn parse_or_default(name: &str, default: SectionId) -> SectionId {
        match name.parse() {
            Ok(id) => id,
            Err(err) => {
                log::warn!("{err}; falling back to {}", default.name());
                default
            }
        }
    }
}

impl FromStr for SectionId {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| GalleryError::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned walkable rectangle on the XZ plane. Inclusive on all edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Bounds {
    /// Corridor envelope around a spawn point: symmetric in X, long toward -Z.
    pub fn around(origin: Point3<f32>, config: &GalleryConfig) -> Self {
        Bounds {
            min_x: origin.x - config.half_extent_x,
            max_x: origin.x + config.half_extent_x,
            min_z: origin.z - config.extent_z_back,
            max_z: origin.z + config.extent_z_front,
        }
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// Clamp X and Z independently; Y passes through untouched.
    ///
    /// Total over every f32 input, the bounds included. A NaN coordinate is
    /// replaced by the matching `fallback` coordinate (or a point inside the
    /// range if that is NaN too). Inverted ranges are swapped, a single NaN
    /// edge collapses the range onto the other edge and an all-NaN range
    /// leaves the axis unbounded.
    pub fn clamp(&self, candidate: Point3<f32>, fallback: Point3<f32>) -> Point3<f32> {
        Point3::new(
            clamp_axis(candidate.x, fallback.x, self.min_x, self.max_x),
            candidate.y,
            clamp_axis(candidate.z, fallback.z, self.min_z, self.max_z),
        )
    }
}

fn axis_range(min: f32, max: f32) -> (f32, f32) {
    match (min.is_nan(), max.is_nan()) {
        (true, true) => (f32::NEG_INFINITY, f32::INFINITY),
        (true, false) => (max, max),
        (false, true) => (min, min),
        (false, false) if min > max => (max, min),
        (false, false) => (min, max),
    }
}

fn clamp_axis(value: f32, fallback: f32, min: f32, max: f32) -> f32 {
    let (lo, hi) = axis_range(min, max);
    let value = if value.is_nan() {
        log::warn!("non-finite coordinate recovered to {fallback}");
        if fallback.is_nan() {
            [(lo + hi) * 0.5, lo, hi]
                .into_iter()
                .find(|v| v.is_finite())
                .unwrap_or(0.0)
        } else {
            fallback
        }
    } else {
        value
    };
    value.max(lo).min(hi)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: SectionId,
    /// Spawn point, eye height included.
    pub origin: Point3<f32>,
    pub next: SectionId,
    pub bounds: Bounds,
}

impl Section {
    /// Origin on the floor plane, the reference point for section content.
    pub fn floor_origin(&self) -> Point3<f32> {
        Point3::new(self.origin.x, 0.0, self.origin.z)
    }

    pub fn to_world(&self, local: Vector3<f32>) -> Point3<f32> {
        self.floor_origin() + local
    }
}

pub struct SectionRegistry {
    sections: [Section; SectionId::COUNT],
    default: SectionId,
}

impl SectionRegistry {
    /// Four corridors laid out along -Z, each pointing at the next and the
    /// last wrapping back to the first.
    pub fn new(config: &GalleryConfig) -> Self {
        let sections = SectionId::ALL.map(|id| {
            let origin = Point3::new(
                0.0,
                config.eye_height,
                -(id.index() as f32) * config.section_spacing,
            );
            Section {
                id,
                origin,
                next: SectionId::ALL[(id.index() + 1) % SectionId::COUNT],
                bounds: Bounds::around(origin, config),
            }
        });
        SectionRegistry {
            sections,
            default: config.default_section,
        }
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.index()]
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn default_section(&self) -> SectionId {
        self.default
    }

    pub fn next(&self, id: SectionId) -> SectionId {
        self.section(id).next
    }

    pub fn bounds_for(&self, id: SectionId) -> Bounds {
        self.section(id).bounds
    }

    pub fn spawn_for(&self, id: SectionId) -> Point3<f32> {
        self.section(id).origin
    }

    /// Unknown names resolve to the default section rather than failing.
    pub fn resolve(&self, name: &str) -> &Section {
        self.section(SectionId::parse_or_default(name, self.default))
    }

    pub fn bounds_for_name(&self, name: &str) -> Bounds {
        self.resolve(name).bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for id in SectionId::ALL {
            assert_eq!(id.name().parse::<SectionId>().unwrap(), id);
        }
        assert!(matches!(
            "atlantis".parse::<SectionId>(),
            Err(GalleryError::UnknownSection(name)) if name == "atlantis"
        ));
    }

    #[test]
    fn unknown_name_falls_back_to_default_bounds() {
        let registry = SectionRegistry::new(&GalleryConfig::default());
        assert_eq!(
            registry.bounds_for_name("nonexistent"),
            registry.bounds_for(registry.default_section())
        );
        assert_eq!(registry.resolve("").id, SectionId::Pompeii);
        assert_eq!(registry.resolve("venice").id, SectionId::Venice);
    }

    #[test]
    fn sample_layout_matches_corridor_spacing() {
        let registry = SectionRegistry::new(&GalleryConfig::default());
        let rome = registry.section(SectionId::Rome);
        assert_eq!(rome.origin, Point3::new(0.0, 1.7, -100.0));
        assert_eq!(
            rome.bounds,
            Bounds {
                min_x: -4.5,
                max_x: 4.5,
                min_z: -117.0,
                max_z: -98.0,
            }
        );
        assert_eq!(registry.spawn_for(SectionId::Venice).z, -300.0);
    }

    #[test]
    fn next_chain_is_a_closed_cycle() {
        let registry = SectionRegistry::new(&GalleryConfig::default());
        for start in SectionId::ALL {
            let mut id = start;
            for _ in 0..SectionId::COUNT {
                id = registry.next(id);
                assert_ne!(registry.next(id), id, "section {id} points at itself");
            }
            assert_eq!(id, start, "cycle from {start} did not close");
        }
    }

    #[test]
    fn bounds_are_derived_from_origin_not_authored() {
        let config = GalleryConfig::default();
        let registry = SectionRegistry::new(&config);
        for section in registry.sections() {
            assert_eq!(section.bounds, Bounds::around(section.origin, &config));
            assert!(section.bounds.contains(section.origin.x, section.origin.z));
        }
    }

    #[test]
    fn clamp_reaches_corners_and_is_total() {
        let bounds = Bounds {
            min_x: -1.0,
            max_x: 1.0,
            min_z: -5.0,
            max_z: 0.0,
        };
        let fallback = Point3::new(0.5, 1.7, -2.0);

        let corner = bounds.clamp(Point3::new(10.0, 1.7, 10.0), fallback);
        assert_eq!(corner, Point3::new(1.0, 1.7, 0.0));

        let far = bounds.clamp(Point3::new(f32::NEG_INFINITY, 1.7, f32::INFINITY), fallback);
        assert_eq!(far, Point3::new(-1.0, 1.7, 0.0));

        let recovered = bounds.clamp(Point3::new(f32::NAN, 1.7, f32::NAN), fallback);
        assert_eq!(recovered, fallback);

        let both_bad = Point3::new(f32::NAN, 1.7, f32::NAN);
        let centred = bounds.clamp(both_bad, both_bad);
        assert_eq!((centred.x, centred.z), (0.0, -2.5));
    }

    #[test]
    fn clamp_survives_degenerate_bounds() {
        let p = Point3::new(3.0, 1.7, -50.0);

        let mut config = GalleryConfig::default();
        config.half_extent_x = -1.0;
        let inverted = Bounds::around(Point3::new(0.0, 1.7, 0.0), &config);
        let clamped = inverted.clamp(p, p);
        assert_eq!((clamped.x, clamped.z), (1.0, -17.0));

        let mut config = GalleryConfig::default();
        config.section_spacing = f32::NAN;
        let registry = SectionRegistry::new(&config);
        let unbounded_z = registry.bounds_for(SectionId::Rome);
        let clamped = unbounded_z.clamp(p, p);
        assert_eq!(clamped, Point3::new(3.0, 1.7, -50.0));

        let half_nan = Bounds {
            min_x: f32::NAN,
            max_x: 2.0,
            min_z: -5.0,
            max_z: f32::NAN,
        };
        let clamped = half_nan.clamp(p, p);
        assert_eq!((clamped.x, clamped.z), (2.0, -5.0));

        let nothing_finite = Bounds {
            min_x: f32::NAN,
            max_x: f32::NAN,
            min_z: f32::NAN,
            max_z: f32::NAN,
        };
        let lost = Point3::new(f32::NAN, 1.7, f32::NAN);
        let clamped = nothing_finite.clamp(lost, lost);
        assert_eq!((clamped.x, clamped.z), (0.0, 0.0));
    }

    proptest! {
        #[test]
        fn clamp_is_total_for_any_bounds(
            edges in prop::array::uniform4(any::<f32>()),
            candidate in prop::array::uniform2(any::<f32>()),
            fallback in prop::array::uniform2(any::<f32>()),
        ) {
            let bounds = Bounds {
                min_x: edges[0],
                max_x: edges[1],
                min_z: edges[2],
                max_z: edges[3],
            };
            let out = bounds.clamp(
                Point3::new(candidate[0], 0.0, candidate[1]),
                Point3::new(fallback[0], 0.0, fallback[1]),
            );
            prop_assert!(!out.x.is_nan() && !out.z.is_nan(), "NaN escaped: {:?}", out);
            let ordered = bounds.min_x <= bounds.max_x && bounds.min_z <= bounds.max_z;
            if ordered {
                prop_assert!(bounds.contains(out.x, out.z), "{:?} outside {:?}", out, bounds);
            }
        }
    }
}
