//! The morphing tree scene: every particle group plus the topper star and
//! the snowfall, driven by one mode flag.
//!
//! The renderer is an external collaborator. Each frame the scene hands it
//! one slice of [`InstanceRaw`] per slot, in slot order.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{
    GroupAnimator, InstanceRaw, Mode, MotionProfile, SnowField, TopperAnimator,
};
use crate::error::EvergreenError;
use crate::layout::GroupCache;
use crate::options::Options;
use crate::util::FrameTick;

/// Slot name used for the topper star.
pub const TOPPER_SLOT: &str = "topper";
/// Slot name used for the snowfall.
pub const SNOW_SLOT: &str = "snow";

/// Receives per-instance data for each batched draw.
pub trait InstanceSink {
    /// Replace the instances of `slot` with `instances`.
    fn upload(&mut self, slot: &str, instances: &[InstanceRaw]);
}

/// A named, animated particle group.
#[derive(Debug)]
pub struct SceneGroup {
    /// Slot name passed to the renderer.
    pub name: String,
    /// The group's animator.
    pub animator: GroupAnimator,
}

/// All animated content of the scene.
#[derive(Debug)]
pub struct Scene {
    mode: Mode,
    cache: GroupCache,
    groups: Vec<SceneGroup>,
    topper: Option<TopperAnimator>,
    snow: Option<SnowField>,
    /// Reused upload buffer.
    instances: Vec<InstanceRaw>,
    frames: u64,
}

impl Scene {
    /// Build the scene described by `options`.
    pub fn new(options: &Options) -> Result<Self, EvergreenError> {
        Self::build(options, None)
    }

    /// Build with deterministic layouts and jitter.
    pub fn with_seed(
        options: &Options,
        seed: u64,
    ) -> Result<Self, EvergreenError> {
        Self::build(options, Some(seed))
    }

    fn build(
        options: &Options,
        seed: Option<u64>,
    ) -> Result<Self, EvergreenError> {
        options.validate()?;
        let mut cache = GroupCache::new(options.layout.clone());
        let mut layout_rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let groups = options
            .groups
            .iter()
            .enumerate()
            .map(|(i, preset)| {
                let group = cache.get_or_generate_with(
                    preset.count.into(),
                    preset.category,
                    &mut layout_rng,
                );
                let profile = MotionProfile::for_group(
                    &options.motion,
                    cache.layout(),
                    preset.category,
                    preset.speed,
                );
                let animator = match seed {
                    Some(s) => GroupAnimator::with_seed(
                        group,
                        profile,
                        s.wrapping_add(i as u64 + 1),
                    ),
                    None => GroupAnimator::new(group, profile),
                };
                SceneGroup {
                    name: preset.name.clone(),
                    animator,
                }
            })
            .collect::<Vec<_>>();

        let topper = options
            .topper
            .enabled
            .then(|| TopperAnimator::new(&options.topper, &options.motion));
        let snow = options.snow.enabled.then(|| match seed {
            Some(s) => SnowField::with_seed(&options.snow, s.wrapping_sub(1)),
            None => SnowField::new(&options.snow),
        });

        log::info!(
            "scene built: {} groups ({} particles), topper: {}, snow: {}",
            groups.len(),
            groups.iter().map(|g| g.animator.group().len()).sum::<usize>(),
            topper.is_some(),
            snow.as_ref().map_or(0, SnowField::len),
        );

        Ok(Self {
            mode: Mode::default(),
            cache,
            groups,
            topper,
            snow,
            instances: Vec::new(),
            frames: 0,
        })
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flip between assembled and dispersed. Returns the new mode.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        log::debug!("mode -> {:?}", self.mode);
        self.mode
    }

    /// Set the mode explicitly.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Animated groups, in render order.
    #[must_use]
    pub fn groups(&self) -> &[SceneGroup] {
        &self.groups
    }

    /// Group by slot name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&GroupAnimator> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| &g.animator)
    }

    /// The topper star, if enabled.
    #[must_use]
    pub fn topper(&self) -> Option<&TopperAnimator> {
        self.topper.as_ref()
    }

    /// The snowfall, if enabled.
    #[must_use]
    pub fn snow(&self) -> Option<&SnowField> {
        self.snow.as_ref()
    }

    /// Distinct layouts generated for this scene.
    #[must_use]
    pub fn cached_layouts(&self) -> usize {
        self.cache.len()
    }

    /// Frames advanced so far (skipped frames excluded).
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance every animator by one frame and upload the results.
    ///
    /// Without a sink (renderer not mounted yet) the frame is skipped and no
    /// state changes. A tick with non-finite timings is skipped the same way.
    /// Returns whether the frame ran.
    pub fn advance_frame(
        &mut self,
        tick: FrameTick,
        sink: Option<&mut dyn InstanceSink>,
    ) -> bool {
        let Some(sink) = sink else {
            return false;
        };
        if !tick.is_finite() {
            log::warn!("skipping frame with non-finite timing {tick:?}");
            return false;
        }
        let mode = self.mode;

        for group in &mut self.groups {
            let _ = group.animator.advance_frame(mode, tick.dt, tick.elapsed);
            self.instances.clear();
            group.animator.write_instances(&mut self.instances);
            sink.upload(&group.name, &self.instances);
        }

        if let Some(topper) = &mut self.topper {
            let transform = topper.advance_frame(mode, tick.dt, tick.elapsed);
            sink.upload(TOPPER_SLOT, &[transform.to_instance()]);
        }

        if let Some(snow) = &mut self.snow {
            let _ = snow.advance_frame(tick.dt, tick.elapsed);
            self.instances.clear();
            snow.write_instances(&mut self.instances);
            sink.upload(SNOW_SLOT, &self.instances);
        }

        self.frames += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ParticleCategory;
    use crate::options::GroupPreset;

    #[derive(Default)]
    struct RecordingSink {
        uploads: Vec<(String, usize)>,
    }

    impl InstanceSink for RecordingSink {
        fn upload(&mut self, slot: &str, instances: &[InstanceRaw]) {
            self.uploads.push((slot.to_owned(), instances.len()));
        }
    }

    fn small_options() -> Options {
        let mut opts = Options {
            groups: vec![
                GroupPreset::new("needles", 120, ParticleCategory::Structural),
                GroupPreset::new("frames", 4, ParticleCategory::Framed),
            ],
            ..Options::default()
        };
        opts.snow.count = 30;
        opts
    }

    #[test]
    fn uploads_every_slot_in_order() {
        let mut scene = Scene::with_seed(&small_options(), 1).unwrap();
        let mut sink = RecordingSink::default();
        assert!(scene.advance_frame(FrameTick::new(0.016, 0.016), Some(&mut sink)));
        assert_eq!(
            sink.uploads,
            vec![
                ("needles".to_owned(), 120),
                ("frames".to_owned(), 4),
                (TOPPER_SLOT.to_owned(), 1),
                (SNOW_SLOT.to_owned(), 30),
            ]
        );
        assert_eq!(scene.frames(), 1);
    }

    #[test]
    fn missing_sink_skips_frame() {
        let mut scene = Scene::with_seed(&small_options(), 2).unwrap();
        let before = scene.group("needles").unwrap().positions().to_vec();
        assert!(!scene.advance_frame(FrameTick::new(0.016, 0.016), None));
        assert_eq!(scene.group("needles").unwrap().positions(), before.as_slice());
        assert_eq!(scene.frames(), 0);
    }

    #[test]
    fn non_finite_tick_is_skipped_and_recovered() {
        let mut scene = Scene::with_seed(&small_options(), 6).unwrap();
        let mut sink = RecordingSink::default();
        let mut tick = FrameTick::default();
        for _ in 0..30 {
            tick = tick.advanced(1.0 / 60.0);
            let _ = scene.advance_frame(tick, Some(&mut sink));
        }
        scene.set_mode(Mode::Dispersed);
        let uploads = sink.uploads.len();

        for bad in [
            FrameTick::new(1.0 / 60.0, f32::NAN),
            FrameTick::new(f32::NAN, tick.elapsed),
            FrameTick::new(f32::INFINITY, tick.elapsed),
        ] {
            assert!(!scene.advance_frame(bad, Some(&mut sink)));
        }
        assert_eq!(sink.uploads.len(), uploads);
        assert_eq!(scene.frames(), 30);

        for _ in 0..600 {
            tick = tick.advanced(1.0 / 60.0);
            assert!(scene.advance_frame(tick, Some(&mut sink)));
        }
        for group in scene.groups() {
            for t in group.animator.transforms() {
                assert!(t.position.is_finite(), "{} position", group.name);
                assert!(t.rotation.is_finite(), "{} rotation", group.name);
            }
        }
        for t in scene.snow().unwrap().transforms() {
            assert!(t.position.is_finite());
        }
        assert!(scene.topper().unwrap().position().is_finite());
    }

    #[test]
    fn toggle_reverses_direction() {
        let mut scene = Scene::with_seed(&small_options(), 3).unwrap();
        let mut sink = RecordingSink::default();
        let mut tick = FrameTick::default();
        for _ in 0..600 {
            tick = tick.advanced(1.0 / 60.0);
            let _ = scene.advance_frame(tick, Some(&mut sink));
        }
        let needles = scene.group("needles").unwrap();
        let assembled = needles.mean_target_distance(Mode::Assembled);
        assert!(assembled < 1.0);

        assert_eq!(scene.toggle_mode(), Mode::Dispersed);
        for _ in 0..600 {
            tick = tick.advanced(1.0 / 60.0);
            let _ = scene.advance_frame(tick, Some(&mut sink));
        }
        let needles = scene.group("needles").unwrap();
        assert!(needles.mean_target_distance(Mode::Dispersed) < 1e-2);
    }

    #[test]
    fn disabled_extras_are_not_uploaded() {
        let mut opts = small_options();
        opts.topper.enabled = false;
        opts.snow.enabled = false;
        let mut scene = Scene::with_seed(&opts, 4).unwrap();
        let mut sink = RecordingSink::default();
        let _ = scene.advance_frame(FrameTick::new(0.016, 0.016), Some(&mut sink));
        assert_eq!(sink.uploads.len(), 2);
        assert!(scene.topper().is_none());
        assert!(scene.snow().is_none());
    }

    #[test]
    fn identical_presets_share_a_layout() {
        let mut opts = small_options();
        opts.groups
            .push(GroupPreset::new("echo", 120, ParticleCategory::Structural));
        let scene = Scene::with_seed(&opts, 5).unwrap();
        assert_eq!(scene.cached_layouts(), 2);
        let a = scene.group("needles").unwrap().group();
        let b = scene.group("echo").unwrap().group();
        assert!(std::sync::Arc::ptr_eq(a, b));
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut opts = small_options();
        opts.layout.scatter_radius = 0.0;
        assert!(Scene::new(&opts).is_err());
    }
}
