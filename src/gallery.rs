//! Section controller: owns the active section and the player, and applies
//! staged commands at a fixed point in each frame.
//!
//! Event handlers never mutate the player directly. They push a
//! [`GalleryCommand`], and [`Gallery::tick`] drains the queue before
//! integrating movement, so every frame sees a consistent section and
//! position.

use std::collections::VecDeque;

use cgmath::Point3;

use crate::config::GalleryConfig;
use crate::content::Artwork;
use crate::input::InputSnapshot;
use crate::movement::PlayerState;
use crate::section::{Section, SectionId, SectionRegistry};
use crate::teleport::{TeleportRequest, TeleportTrigger};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryCommand {
    Teleport(SectionId),
    /// Select an artwork for closer viewing.
    Inspect(&'static Artwork),
    Dismiss,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub position: Point3<f32>,
    pub section: SectionId,
    pub section_changed: bool,
    pub inspected: Option<&'static Artwork>,
}

pub struct Gallery {
    config: GalleryConfig,
    registry: SectionRegistry,
    current: SectionId,
    player: PlayerState,
    inspected: Option<&'static Artwork>,
    pending: VecDeque<GalleryCommand>,
}

impl Gallery {
    pub fn new(config: GalleryConfig) -> Self {
        let registry = SectionRegistry::new(&config);
        let current = registry.default_section();
        let player = PlayerState::new(registry.spawn_for(current), config.initial_yaw);
        log::info!("gallery opens in {} ({current})", current.title());
        Gallery {
            config,
            registry,
            current,
            player,
            inspected: None,
            pending: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn current_id(&self) -> SectionId {
        self.current
    }

    pub fn current_section(&self) -> &Section {
        self.registry.section(self.current)
    }

    /// The only section whose content should exist in the scene.
    pub fn visible_section(&self) -> SectionId {
        self.current
    }

    /// The single reachable portal: the one in the active section.
    pub fn trigger(&self) -> TeleportTrigger {
        TeleportTrigger::for_section(self.current_section(), &self.config)
    }

    pub fn queue(&mut self, command: GalleryCommand) {
        self.pending.push_back(command);
    }

    pub fn request_teleport(&mut self, request: TeleportRequest) {
        self.queue(GalleryCommand::Teleport(request.target));
    }

    /// The artwork currently selected for viewing, if any.
    pub fn inspected(&self) -> Option<&'static Artwork> {
        self.inspected
    }

    /// Switch sections and drop the player at the target's spawn point.
    pub fn teleport(&mut self, target: SectionId) {
        let from = self.current;
        self.current = target;
        self.inspected = None;
        self.player.relocate(self.registry.spawn_for(target));
        log::info!(
            "teleported {from} -> {target}, entering {}",
            target.title()
        );
    }

    /// Lenient variant for string ids; unknown names go to the default section.
    pub fn teleport_by_name(&mut self, name: &str) {
        let target = SectionId::parse_or_default(name, self.registry.default_section());
        self.teleport(target);
    }

    /// One simulation step: apply staged commands, then look, then movement
    /// clamped to the bounds of whichever section is active after the commands.
    pub fn tick(&mut self, snapshot: &InputSnapshot, dt: f32) -> FrameReport {
        let before = self.current;
        while let Some(command) = self.pending.pop_front() {
            match command {
                GalleryCommand::Teleport(target) => self.teleport(target),
                GalleryCommand::Inspect(artwork) => self.inspect(artwork),
                GalleryCommand::Dismiss => self.inspected = None,
            }
        }

        self.player
            .apply_look(snapshot.mouse_delta_x, self.config.mouse_sensitivity);
        let bounds = self.registry.bounds_for(self.current);
        self.player
            .step(snapshot, dt, &bounds, self.config.move_speed);

        FrameReport {
            position: self.player.position,
            section: self.current,
            section_changed: self.current != before,
            inspected: self.inspected,
        }
    }

    fn inspect(&mut self, artwork: &'static Artwork) {
        // A click queued just before a teleport may name the old section.
        if artwork.section != self.current {
            log::debug!("ignoring {} outside {}", artwork.id, self.current);
            return;
        }
        let meta = &artwork.metadata;
        log::info!(
            "viewing \"{}\" ({}, {}) {}",
            meta.title,
            meta.location,
            meta.date,
            artwork.image
        );
        self.inspected = Some(artwork);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> InputSnapshot {
        InputSnapshot {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn starts_at_default_spawn() {
        let gallery = Gallery::new(GalleryConfig::default());
        assert_eq!(gallery.current_id(), SectionId::Pompeii);
        assert_eq!(gallery.player().position, Point3::new(0.0, 1.7, 0.0));
        assert_eq!(gallery.visible_section(), SectionId::Pompeii);
    }

    #[test]
    fn teleport_is_a_hard_reset() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        gallery.player.facing_yaw = 0.0;
        for _ in 0..30 {
            gallery.tick(&forward(), 0.1);
        }
        assert!(gallery.player().position.z < -10.0);

        gallery.teleport(SectionId::Vatican);
        assert_eq!(gallery.player().position, Point3::new(0.0, 1.7, -200.0));
        assert_eq!(gallery.current_id(), SectionId::Vatican);
    }

    #[test]
    fn four_portal_activations_close_the_cycle() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        let mut visited = Vec::new();
        for _ in 0..4 {
            let request = gallery.trigger().activate();
            gallery.request_teleport(request);
            let report = gallery.tick(&InputSnapshot::default(), 0.016);
            assert!(report.section_changed);
            visited.push(report.section);
        }
        assert_eq!(
            visited,
            [
                SectionId::Rome,
                SectionId::Vatican,
                SectionId::Venice,
                SectionId::Pompeii
            ]
        );
        assert_eq!(gallery.current_id(), SectionId::Pompeii);
    }

    #[test]
    fn queued_teleport_waits_for_the_next_tick() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        gallery.queue(GalleryCommand::Teleport(SectionId::Venice));
        assert_eq!(gallery.current_id(), SectionId::Pompeii);
        assert_eq!(gallery.pending.len(), 1);

        let report = gallery.tick(&InputSnapshot::default(), 0.016);
        assert_eq!(report.section, SectionId::Venice);
        assert_eq!(report.position, Point3::new(0.0, 1.7, -300.0));
        assert!(gallery.pending.is_empty());

        let report = gallery.tick(&InputSnapshot::default(), 0.016);
        assert!(!report.section_changed);
    }

    #[test]
    fn movement_after_teleport_uses_new_section_bounds() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        gallery.player.facing_yaw = 0.0;
        gallery.queue(GalleryCommand::Teleport(SectionId::Rome));
        // A huge frame would be clamped to Pompeii's far wall (z = -17) if the
        // old bounds were used; Rome's far wall is z = -117.
        let report = gallery.tick(&forward(), 100.0);
        assert_eq!(report.position.z, -117.0);
    }

    #[test]
    fn unknown_name_teleports_to_default() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        gallery.teleport(SectionId::Venice);
        gallery.teleport_by_name("atlantis");
        assert_eq!(gallery.current_id(), SectionId::Pompeii);
        assert_eq!(gallery.player().position, Point3::new(0.0, 1.7, 0.0));
    }

    #[test]
    fn look_is_applied_before_movement() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        gallery.player.facing_yaw = 0.0;
        // 785.4 px * 0.002 rad/px is a quarter turn to the right.
        let snapshot = InputSnapshot {
            forward: true,
            mouse_delta_x: std::f32::consts::FRAC_PI_2 / 0.002,
            pointer_locked: true,
            ..Default::default()
        };
        let report = gallery.tick(&snapshot, 0.2);
        assert!((report.position.x - 1.0).abs() < 1e-3, "{:?}", report.position);
        assert!(report.position.z.abs() < 1e-3, "{:?}", report.position);
    }

    fn first_artwork(section: SectionId) -> &'static Artwork {
        crate::content::artworks_for(section).next().unwrap()
    }

    #[test]
    fn inspect_selects_until_dismissed() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        let artwork = first_artwork(SectionId::Pompeii);
        gallery.queue(GalleryCommand::Inspect(artwork));
        assert_eq!(gallery.inspected(), None);

        let report = gallery.tick(&InputSnapshot::default(), 0.016);
        assert_eq!(report.inspected.map(|a| a.id), Some("popei-1"));
        let report = gallery.tick(&InputSnapshot::default(), 0.016);
        assert_eq!(report.inspected.map(|a| a.id), Some("popei-1"));

        gallery.queue(GalleryCommand::Dismiss);
        let report = gallery.tick(&InputSnapshot::default(), 0.016);
        assert_eq!(report.inspected, None);
    }

    #[test]
    fn teleport_clears_and_blocks_stale_selection() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        gallery.queue(GalleryCommand::Inspect(first_artwork(SectionId::Pompeii)));
        gallery.tick(&InputSnapshot::default(), 0.016);
        assert!(gallery.inspected().is_some());

        // Teleport first, then the click that was aimed at the old section.
        gallery.queue(GalleryCommand::Teleport(SectionId::Rome));
        gallery.queue(GalleryCommand::Inspect(first_artwork(SectionId::Pompeii)));
        let report = gallery.tick(&InputSnapshot::default(), 0.016);
        assert_eq!(report.section, SectionId::Rome);
        assert_eq!(report.inspected, None);
    }
}
