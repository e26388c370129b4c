//! The tick-driven hypercube module
//!
//! Lifecycle: init computes the stage count and generates the stage
//! plans, then the hypercube sweeps one quarter-turn rotation per
//! iteration while the host is polled for solve-count changes. One
//! stage is consumed per external solve; when the last stage has played
//! the module fades to white and the player submits the target vertices
//! in stage order. A wrong press costs a strike and enters recovery:
//! the cube rotates the unresolved submission's plane until any press
//! acknowledges the strike, then the white fade restores submission at
//! the same index.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use hypercube_math::{mat4, tesseract, SignPattern, Vec3, VERTEX_COUNT};
use hypercube_mesh::WireMesh;
use hypercube_puzzle::{generate, PuzzleError, StagePlan};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{RotationSweep, ShrinkAnimation, SweepPhase, SweepTiming};
use crate::color::{pick_color, ColorTransition, Hsv, MaterialColors};
use crate::host::BombHost;
use crate::state::{ModuleFlags, ModuleState};

/// Module display name, also the default ignore-list entry
pub const MODULE_NAME: &str = "Hypercube Memory";

/// Terminal status marker
pub const SOLVED_TEXT: &str = "GG";

// Process-wide instance ordinal for log identity only; never reset after
// process start.
static MODULE_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// One hypercube module wired to a host.
pub struct HypercubeModule<H: BombHost> {
    id: usize,
    host: H,
    rng: StdRng,
    timing: SweepTiming,

    stage_count: usize,
    plans: Vec<StagePlan>,
    ignored: Vec<String>,

    state: ModuleState,
    status: String,

    color: Hsv,
    materials: MaterialColors,
    vertices: [Vec3; VERTEX_COUNT],
    mesh: WireMesh,
    scale: f32,

    rotation: Option<RotationSweep>,
    color_transition: Option<ColorTransition>,
    shrink: Option<ShrinkAnimation>,
    color_change_pending: bool,

    press_queue: VecDeque<usize>,
    press_cooldown: f32,
    auto_solving: bool,
}

impl<H: BombHost> HypercubeModule<H> {
    /// Create a module with an entropy-seeded rng.
    pub fn new(host: H, timing: SweepTiming) -> Result<Self, PuzzleError> {
        Self::with_rng(host, timing, StdRng::from_entropy())
    }

    /// Create a module with a caller-supplied rng. A seeded rng
    /// reproduces the exact stage plans and color draws.
    pub fn with_rng(host: H, timing: SweepTiming, mut rng: StdRng) -> Result<Self, PuzzleError> {
        let id = MODULE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let serial = host.serial_number();
        let ignored = host.ignored_modules(MODULE_NAME, &[MODULE_NAME]);
        let stage_count = host
            .solvable_modules()
            .iter()
            .filter(|name| !ignored.contains(*name))
            .count();

        let plans = if stage_count > 0 {
            generate(&serial, stage_count, &mut rng)?
        } else {
            Vec::new()
        };

        let projected = tesseract::project_all(&tesseract::unrotated_vertices());
        let mesh = WireMesh::build(&projected);

        let mut module = Self {
            id,
            host,
            rng,
            timing,
            stage_count,
            plans,
            ignored,
            state: ModuleState::new(),
            status: String::new(),
            color: Hsv::INITIAL,
            materials: MaterialColors::from_hsv(Hsv::INITIAL),
            vertices: projected,
            mesh,
            scale: 1.0,
            rotation: None,
            color_transition: None,
            shrink: None,
            color_change_pending: false,
            press_queue: VecDeque::new(),
            press_cooldown: 0.0,
            auto_solving: false,
        };

        if module.stage_count == 0 {
            log::info!(
                "[Hypercube #{}] zero stages were generated, module passes immediately",
                module.id
            );
            module.host.handle_pass();
            module.state.flags.insert(ModuleFlags::SOLVED);
            module.status = SOLVED_TEXT.to_string();
            return Ok(module);
        }

        for (i, plan) in module.plans.iter().enumerate() {
            log::info!(
                "[Hypercube #{}] stage {}: rotation is {}, correct vertex is {}",
                module.id,
                i + 1,
                plan.rotation,
                plan.target
            );
        }

        module.state.flags.insert(
            ModuleFlags::READY_TO_ADVANCE | ModuleFlags::CAN_ROTATE | ModuleFlags::CAN_CONTINUE,
        );
        module.start_rotation();
        Ok(module)
    }

    /// Advance every sequence in flight by one frame.
    pub fn tick(&mut self, dt: f32) {
        if self.state.flags.contains(ModuleFlags::SOLVED) {
            if let Some(shrink) = &mut self.shrink {
                shrink.advance(dt);
                self.scale = shrink.scale();
            }
            return;
        }

        self.poll_host();
        self.drive_scripted_presses(dt);
        if self.state.flags.contains(ModuleFlags::SOLVED) {
            return;
        }
        self.drive_rotation(dt);
        self.drive_color(dt);
    }

    /// Press one of the 16 vertices. No-op while solved, while input is
    /// not armed, or while a color fade is animating.
    pub fn press(&mut self, vertex: usize) {
        if vertex >= VERTEX_COUNT {
            return;
        }
        let flags = self.state.flags;
        if flags.contains(ModuleFlags::SOLVED)
            || !flags.contains(ModuleFlags::ALLOWED_TO_PRESS)
            || flags.contains(ModuleFlags::ANIMATING)
        {
            return;
        }

        if flags.contains(ModuleFlags::STAGE_RECOVERY) {
            // Any vertex acknowledges the strike: halt the sweep where
            // it is and fade back to white.
            self.stop_rotation();
            self.reset_hypercube();
            self.state.flags.insert(ModuleFlags::CAN_CONTINUE);
            self.start_color(true);
            return;
        }

        if !flags.contains(ModuleFlags::SUBMISSION) {
            return;
        }

        let pressed = SignPattern::from_index(vertex);
        let expected = self.plans[self.state.current_submission].target;
        if pressed == expected {
            log::info!(
                "[Hypercube #{}] correctly pressed {} at submission {}",
                self.id,
                pressed,
                self.state.current_submission + 1
            );
            self.state.current_submission += 1;
            self.status = format!("{:03}", (self.state.current_submission + 1) % 100);
            if self.state.current_submission == self.stage_count {
                self.solve();
            }
        } else {
            log::warn!(
                "[Hypercube #{}] pressed {} at submission {} when {} was expected, strike",
                self.id,
                pressed,
                self.state.current_submission + 1,
                expected
            );
            self.host.handle_strike();
            self.state.flags.insert(ModuleFlags::STAGE_RECOVERY | ModuleFlags::CAN_ROTATE);
            self.state.flags.remove(ModuleFlags::CAN_CONTINUE);
            self.start_rotation();
        }
    }

    /// Queue scripted presses, drained one per press gap while pressing
    /// is allowed. A pending recovery is acknowledged before the queue
    /// resumes.
    pub fn queue_presses<I: IntoIterator<Item = usize>>(&mut self, vertices: I) {
        self.press_queue.extend(vertices);
    }

    /// Auto-press the correct sequence to completion, acknowledging any
    /// recovery along the way.
    pub fn start_auto_solve(&mut self) {
        log::info!("[Hypercube #{}] auto-solve requested", self.id);
        self.auto_solving = true;
    }

    // --- accessors -------------------------------------------------------

    pub fn state(&self) -> &ModuleState {
        &self.state
    }

    /// The display widget text: 3-digit stage or submission ordinal,
    /// "GG" once solved.
    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    pub fn plans(&self) -> &[StagePlan] {
        &self.plans
    }

    pub fn is_solved(&self) -> bool {
        self.state.flags.contains(ModuleFlags::SOLVED)
    }

    pub fn in_submission(&self) -> bool {
        self.state.flags.contains(ModuleFlags::SUBMISSION)
    }

    /// Projected vertex positions, updated every sweep frame
    pub fn vertices(&self) -> &[Vec3; VERTEX_COUNT] {
        &self.vertices
    }

    /// The derived wireframe/face mesh for the current vertex positions
    pub fn mesh(&self) -> &WireMesh {
        &self.mesh
    }

    pub fn materials(&self) -> &MaterialColors {
        &self.materials
    }

    /// Render scale; eases to 0 after the solve
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // --- host polling ----------------------------------------------------

    /// Derive progress from the host's current totals. Stage changes are
    /// only taken at sweep boundaries, one per boundary, so any number
    /// of solves inside one polling interval is absorbed without losing
    /// a crossing.
    fn poll_host(&mut self) {
        let flags = self.state.flags;
        if !flags.contains(ModuleFlags::READY_TO_ADVANCE)
            || flags.contains(ModuleFlags::STAGE_RECOVERY)
        {
            return;
        }
        let solves = self
            .host
            .solved_modules()
            .iter()
            .filter(|name| !self.ignored.contains(*name))
            .count();
        self.state.current_solves = solves;
        if self.state.current_stage == solves as i32 || flags.contains(ModuleFlags::SUBMISSION) {
            return;
        }
        if self.state.current_stage < self.stage_count as i32 {
            self.next_stage();
        }
    }

    fn next_stage(&mut self) {
        self.state.current_stage += 1;
        let stage = self.state.current_stage as usize;
        if stage != self.stage_count {
            self.color_change_pending = true;
            self.status = format!("{:03}", (stage + 1) % 100);
            log::info!("[Hypercube #{}] stage {} begins", self.id, stage + 1);
        } else {
            self.state.current_submission = 0;
            self.state.flags.insert(ModuleFlags::SUBMISSION);
            self.status = format!("{:03}", (self.state.current_submission + 1) % 100);
            log::info!(
                "[Hypercube #{}] all stages played, waiting for submission",
                self.id
            );
            self.stop_rotation();
            self.reset_hypercube();
            self.start_color(true);
        }
    }

    // --- rotation sequence -----------------------------------------------

    fn start_rotation(&mut self) {
        // Only one sweep may exist; stop the previous one first.
        self.stop_rotation();
        self.reset_hypercube();
        self.rotation = Some(RotationSweep::new());
    }

    fn stop_rotation(&mut self) {
        if self.rotation.take().is_some() {
            log::debug!("[Hypercube #{}] rotation sweep stopped", self.id);
        }
    }

    fn drive_rotation(&mut self, dt: f32) {
        if !self.state.flags.contains(ModuleFlags::CAN_ROTATE) {
            return;
        }
        let Some(mut rot) = self.rotation.take() else {
            return;
        };

        match rot.phase {
            SweepPhase::Boundary => self.begin_iteration(&mut rot),
            SweepPhase::AwaitColor => {
                if self.color_transition.is_none() {
                    self.enter_pause(&mut rot);
                }
            }
            SweepPhase::Pause => {
                rot.elapsed += dt;
                if rot.elapsed >= self.timing.pre_sweep_pause {
                    rot.phase = SweepPhase::Sweep;
                    rot.elapsed = 0.0;
                }
            }
            SweepPhase::Sweep => {
                rot.elapsed += dt;
                if rot.elapsed >= self.timing.sweep {
                    // Snap back to the authoritative unrotated pose so
                    // float error never carries into the next sweep.
                    self.reset_hypercube();
                    rot.phase = SweepPhase::Settle;
                    rot.elapsed = 0.0;
                } else {
                    let angle = rot.angle(&self.timing);
                    self.apply_sweep_angle(rot.axis1, rot.axis2, angle);
                }
            }
            SweepPhase::Settle => {
                rot.elapsed += dt;
                if rot.elapsed >= self.timing.settle {
                    self.state.flags.insert(ModuleFlags::READY_TO_ADVANCE);
                    rot.phase = SweepPhase::Boundary;
                    rot.elapsed = 0.0;
                }
            }
        }

        self.rotation = Some(rot);
    }

    /// Start one sweep iteration: re-read the governing plan's axes,
    /// then run any pending color fade before the pause.
    fn begin_iteration(&mut self, rot: &mut RotationSweep) {
        self.state.flags.remove(ModuleFlags::READY_TO_ADVANCE);
        let governing = if self.state.flags.contains(ModuleFlags::STAGE_RECOVERY) {
            self.state.current_submission
        } else {
            self.state.current_stage.max(0) as usize
        };
        let (axis1, axis2) = self.plans[governing].rotation.axes();
        rot.axis1 = axis1;
        rot.axis2 = axis2;

        if self.color_change_pending {
            self.color_change_pending = false;
            let white = self.state.flags.contains(ModuleFlags::SUBMISSION)
                && !self.state.flags.contains(ModuleFlags::STAGE_RECOVERY);
            self.start_color(white);
            rot.phase = SweepPhase::AwaitColor;
            rot.elapsed = 0.0;
        } else {
            self.enter_pause(rot);
        }
    }

    fn enter_pause(&mut self, rot: &mut RotationSweep) {
        if self.state.flags.contains(ModuleFlags::STAGE_RECOVERY) {
            self.state.flags.insert(ModuleFlags::ALLOWED_TO_PRESS);
        }
        rot.phase = SweepPhase::Pause;
        rot.elapsed = 0.0;
    }

    fn apply_sweep_angle(&mut self, axis1: usize, axis2: usize, angle: f32) {
        let m = mat4::plane_rotation(angle, axis1, axis2);
        let base = tesseract::unrotated_vertices();
        let mut projected = [Vec3::ZERO; VERTEX_COUNT];
        for (p, v) in projected.iter_mut().zip(base.iter()) {
            *p = tesseract::project(mat4::transform(m, *v));
        }
        self.set_hypercube(projected);
    }

    fn reset_hypercube(&mut self) {
        self.set_hypercube(tesseract::project_all(&tesseract::unrotated_vertices()));
    }

    fn set_hypercube(&mut self, points: [Vec3; VERTEX_COUNT]) {
        self.vertices = points;
        // The derived mesh is replaced wholesale, never patched.
        self.mesh = WireMesh::build(&points);
    }

    // --- color sequence --------------------------------------------------

    fn start_color(&mut self, white: bool) {
        if self.color_transition.take().is_some() {
            log::debug!("[Hypercube #{}] superseding active color fade", self.id);
        }
        let from = self.color;
        let to = if white {
            Hsv::SUBMIT_WHITE
        } else {
            pick_color(&mut self.rng, from)
        };
        self.color = to;
        self.state.flags.insert(ModuleFlags::ANIMATING);
        self.color_transition = Some(ColorTransition::new(
            from,
            to,
            self.timing.color_fade,
            white,
        ));
    }

    fn drive_color(&mut self, dt: f32) {
        let Some(transition) = self.color_transition.as_mut() else {
            return;
        };
        let done = transition.advance(dt);
        let shown = transition.current();
        let white = transition.is_white();
        self.materials = MaterialColors::from_hsv(shown);
        if !done {
            return;
        }

        self.color_transition = None;
        self.state.flags.remove(ModuleFlags::ANIMATING);
        if self.state.flags.contains(ModuleFlags::SUBMISSION)
            && self.state.flags.contains(ModuleFlags::CAN_CONTINUE)
        {
            self.state.flags.insert(ModuleFlags::ALLOWED_TO_PRESS);
            self.state.flags.remove(ModuleFlags::CAN_ROTATE);
            self.stop_rotation();
            if self.state.flags.contains(ModuleFlags::STAGE_RECOVERY) && white {
                self.state.flags.remove(ModuleFlags::STAGE_RECOVERY);
                log::info!(
                    "[Hypercube #{}] recovery complete, back at submission {}",
                    self.id,
                    self.state.current_submission + 1
                );
            }
        }
    }

    // --- scripted input --------------------------------------------------

    fn drive_scripted_presses(&mut self, dt: f32) {
        if self.press_cooldown > 0.0 {
            self.press_cooldown -= dt;
            if self.press_cooldown > 0.0 {
                return;
            }
        }
        if self.press_queue.is_empty() && !self.auto_solving {
            return;
        }
        let flags = self.state.flags;
        if !flags.contains(ModuleFlags::ALLOWED_TO_PRESS) || flags.contains(ModuleFlags::ANIMATING)
        {
            return;
        }

        if flags.contains(ModuleFlags::STAGE_RECOVERY) {
            // Acknowledge the strike before the script resumes.
            self.press(0);
        } else if let Some(vertex) = self.press_queue.pop_front() {
            self.press(vertex);
        } else {
            let vertex = self.plans[self.state.current_submission].target.index();
            self.press(vertex);
        }
        self.press_cooldown = self.timing.press_gap;
    }

    fn solve(&mut self) {
        self.state.flags.insert(ModuleFlags::SOLVED);
        self.host.handle_pass();
        self.status = SOLVED_TEXT.to_string();
        self.shrink = Some(ShrinkAnimation::new(self.timing.shrink));
        self.auto_solving = false;
        self.press_queue.clear();
        log::info!("[Hypercube #{}] module solved", self.id);
    }
}
