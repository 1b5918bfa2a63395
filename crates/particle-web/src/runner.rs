use std::collections::HashMap;

use particle_field::{
    BurstId, FieldConfig, InputEvent, InputQueue, ParticleField, Preset, Surface, Ticker,
};

use crate::host::CanvasHost;

/// One particle field plus its pending input, driven by JS animation frames.
pub struct FieldRunner {
    field: ParticleField<CanvasHost>,
    input: InputQueue,
}

impl FieldRunner {
    /// Build a field for a container of `width` x `height`.
    ///
    /// `options_json` overrides the preset key by key; malformed options are
    /// logged and ignored. `seed` is used unless the options name one.
    pub fn new(width: f32, height: f32, preset: &str, options_json: &str, seed: u64) -> Option<Self> {
        let preset = Preset::from_name(preset);
        let mut config = preset.config().with_overrides(options_json).unwrap_or_else(|e| {
            log::warn!("ignoring particle options for preset '{}': {}", preset.name(), e);
            preset.config()
        });
        if config.seed.is_none() {
            config.seed = Some(seed);
        }
        Self::with_config(width, height, config)
    }

    pub fn with_config(width: f32, height: f32, config: FieldConfig) -> Option<Self> {
        let field = ParticleField::initialize(Some(CanvasHost::new(width, height)), config)?;
        Some(Self {
            field,
            input: InputQueue::new(),
        })
    }

    /// Queue input for the next frame. Clicks on a paused field are dropped
    /// so they do not all burst at once on resume.
    pub fn push_input(&mut self, event: InputEvent) {
        if matches!(event, InputEvent::Click { .. }) && !self.field.is_running() {
            return;
        }
        self.input.push(event);
    }

    /// Events waiting for the next frame.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Apply queued input, then tick and render. Returns whether JS should
    /// request another frame.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let events = self.input.drain();
        self.field.handle_input(events);
        self.field.frame(now_ms)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.field.host_mut().set_bounds(width, height);
        self.field.resize();
    }

    pub fn burst(&mut self, x: f32, y: f32, count: usize) -> Option<BurstId> {
        self.field.burst(x, y, count)
    }

    pub fn fireworks(&mut self, x: f32, y: f32) {
        self.field.fireworks(x, y);
    }

    pub fn set_options(&mut self, json: &str) -> bool {
        match self.field.apply_overrides(json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("ignoring particle options: {}", e);
                false
            }
        }
    }

    pub fn pause(&mut self) {
        self.field.pause();
    }

    pub fn resume(&mut self) {
        self.field.resume();
    }

    pub fn is_running(&self) -> bool {
        self.field.is_running()
    }

    pub fn destroy(&mut self) {
        self.field.destroy();
    }

    pub fn field(&self) -> &ParticleField<CanvasHost> {
        &self.field
    }

    // ---- Pointer accessors for reads from JS memory ----

    #[cfg(feature = "vectors")]
    pub fn vertices_ptr(&self) -> *const f32 {
        self.field
            .surface()
            .map_or(std::ptr::null(), |s| s.buffer_ptr())
    }

    #[cfg(feature = "vectors")]
    pub fn vertex_count(&self) -> u32 {
        self.field.surface().map_or(0, |s| s.vertex_count() as u32)
    }

    pub fn particle_count(&self) -> u32 {
        self.field.particles().len() as u32
    }

    pub fn width(&self) -> f32 {
        self.field.surface().map_or(0.0, |s| s.bounds().width)
    }

    pub fn height(&self) -> f32 {
        self.field.surface().map_or(0.0, |s| s.bounds().height)
    }
}

/// Handle JS uses to address a field. Zero is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHandle(pub u32);

/// All fields on the page, so several containers can animate independently.
pub struct FieldRegistry {
    next_handle: u32,
    runners: HashMap<FieldHandle, FieldRunner>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            runners: HashMap::new(),
        }
    }

    /// Register a runner and return its handle.
    pub fn insert(&mut self, runner: FieldRunner) -> FieldHandle {
        let handle = FieldHandle(self.next_handle);
        self.next_handle = self.next_handle.checked_add(1).unwrap_or(1);
        self.runners.insert(handle, runner);
        handle
    }

    pub fn get(&self, handle: FieldHandle) -> Option<&FieldRunner> {
        self.runners.get(&handle)
    }

    pub fn get_mut(&mut self, handle: FieldHandle) -> Option<&mut FieldRunner> {
        self.runners.get_mut(&handle)
    }

    /// Destroy and forget one field. Returns false for unknown handles.
    pub fn destroy(&mut self, handle: FieldHandle) -> bool {
        match self.runners.remove(&handle) {
            Some(mut runner) => {
                runner.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy every field. Returns how many were destroyed.
    pub fn destroy_all(&mut self) -> usize {
        let count = self.runners.len();
        for (_, mut runner) in self.runners.drain() {
            runner.destroy();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field::{ParticleShape, CLICK_BURST_COUNT};

    fn runner(preset: &str, options: &str) -> FieldRunner {
        FieldRunner::new(320.0, 200.0, preset, options, 99).expect("runner")
    }

    #[test]
    fn preset_and_overrides_combine() {
        let r = runner("stars", r#"{"numberOfParticles": 12}"#);
        assert_eq!(r.particle_count(), 12);
        assert_eq!(r.field().config().shape, ParticleShape::Star);
        assert_eq!(r.field().config().seed, Some(99));
    }

    #[test]
    fn bad_options_fall_back_to_preset() {
        let r = runner("rain", "{oops");
        assert_eq!(r.particle_count(), 100);
    }

    #[test]
    fn unknown_shape_keeps_the_other_options() {
        let r = runner("default", r#"{"numberOfParticles": 7, "shape": "hexagon"}"#);
        assert_eq!(r.particle_count(), 7);
        assert_eq!(r.field().config().shape, ParticleShape::Disc);

        let r = runner("default", r#"{"numberOfParticles": 4, "shape": "estrella"}"#);
        assert_eq!(r.particle_count(), 4);
        assert_eq!(r.field().config().shape, ParticleShape::Star);
    }

    #[test]
    fn input_while_paused_stays_bounded() {
        let mut r = runner("default", r#"{"numberOfParticles": 5}"#);
        r.pause();
        for i in 0..100_000 {
            r.push_input(InputEvent::PointerMove { x: (i % 320) as f32, y: 50.0 });
            if i % 100 == 0 {
                r.push_input(InputEvent::Click { x: 10.0, y: 10.0 });
            }
        }
        assert!(r.pending_input() <= 1, "queued {}", r.pending_input());

        r.resume();
        assert!(r.frame(0.0));
        assert_eq!(r.particle_count(), 5, "paused clicks do not burst on resume");
        assert_eq!(r.field().pointer().map(|p| (p.x, p.y)), Some(((99_999 % 320) as f32, 50.0)));
        assert_eq!(r.pending_input(), 0);
    }

    #[test]
    fn unmeasurable_container_creates_nothing() {
        assert!(FieldRunner::new(f32::NAN, 100.0, "default", "", 1).is_none());
    }

    #[test]
    fn frame_applies_queued_clicks_and_fills_vertices() {
        let mut r = runner("default", r#"{"numberOfParticles": 5}"#);
        r.push_input(InputEvent::Click { x: 10.0, y: 10.0 });
        assert!(r.frame(0.0));
        assert_eq!(r.particle_count() as usize, 5 + CLICK_BURST_COUNT);
        #[cfg(feature = "vectors")]
        {
            assert!(r.vertex_count() > 0);
            assert!(!r.vertices_ptr().is_null());
        }
    }

    #[test]
    fn pause_stops_frames_until_resume() {
        let mut r = runner("default", "");
        r.pause();
        assert!(!r.frame(16.0));
        r.resume();
        assert!(r.is_running());
        assert!(r.frame(32.0));
    }

    #[test]
    fn resize_updates_surface() {
        let mut r = runner("snow", "");
        r.resize(640.0, 480.0);
        assert_eq!((r.width(), r.height()), (640.0, 480.0));
    }

    #[test]
    fn registry_handles_are_independent() {
        let mut registry = FieldRegistry::new();
        let a = registry.insert(runner("default", r#"{"numberOfParticles": 3}"#));
        let b = registry.insert(runner("bubbles", ""));
        assert_ne!(a, b);
        assert_ne!(a.0, 0);

        registry.get_mut(a).unwrap().burst(5.0, 5.0, 4);
        assert_eq!(registry.get(a).unwrap().particle_count(), 7);
        assert_eq!(registry.get(b).unwrap().particle_count(), 40);

        assert!(registry.destroy(a));
        assert!(!registry.destroy(a));
        assert_eq!(registry.destroy_all(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn destroyed_runner_exposes_no_vertices() {
        let mut r = runner("default", "");
        r.frame(0.0);
        r.destroy();
        #[cfg(feature = "vectors")]
        {
            assert_eq!(r.vertex_count(), 0);
            assert!(r.vertices_ptr().is_null());
        }
        assert!(!r.field().host().has_surface());
    }
}
