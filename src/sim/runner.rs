//! Shared run lifecycle and the fixed-rate driver
//!
//! Both engines implement [`Simulation`]: a plain deterministic transition
//! over explicit state, called once per tick by [`FixedStepDriver`] (or any
//! other external clock).

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Lifecycle of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Boss entry animation; input frozen
    Intro,
    /// Normal simulation
    Active,
    /// Final wave cleared
    Victory,
    /// Out of lives (or overrun)
    Defeat,
    /// Quit to menu; collections are discarded, no results
    Aborted,
}

impl RunPhase {
    /// Absorbing states: no further mutation happens
    pub fn is_over(self) -> bool {
        matches!(self, RunPhase::Victory | RunPhase::Defeat | RunPhase::Aborted)
    }
}

/// Payload handed to the profile owner when a run completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResults {
    pub final_score: u64,
    /// Last wave/stage the player actually reached
    pub wave_reached: u32,
    /// Coins with the end-of-run bonus already applied
    pub coins_earned: u64,
    pub bosses_defeated: u32,
}

/// Per-tick input with one-shot fields the driver clears after use
pub trait FrameInput: Clone + Default {
    fn clear_one_shots(&mut self) {}
}

/// One simulation engine
pub trait Simulation {
    type Input: FrameInput;
    type Snapshot;

    /// Advance one fixed tick. Returns the results exactly once, on the tick
    /// that enters a terminal phase.
    fn tick(&mut self, input: &Self::Input) -> Option<RunResults>;

    /// Immutable view for the renderer
    fn snapshot(&self) -> Self::Snapshot;

    fn phase(&self) -> RunPhase;

    /// Quit to menu
    fn abort(&mut self);
}

/// Accumulator-based fixed timestep driver
#[derive(Debug)]
pub struct FixedStepDriver<S: Simulation> {
    sim: S,
    accumulator: f32,
    ticks: u64,
    results: Option<RunResults>,
}

impl<S: Simulation> FixedStepDriver<S> {
    pub fn new(sim: S) -> Self {
        Self {
            sim,
            accumulator: 0.0,
            ticks: 0,
            results: None,
        }
    }

    /// Feed real elapsed time; runs as many whole ticks as fit (bounded).
    /// Returns the results on the frame the run finishes.
    pub fn advance(&mut self, frame_dt: f32, input: &mut S::Input) -> Option<RunResults> {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut finished = None;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.sim.phase().is_over() {
                continue;
            }
            self.ticks += 1;
            if let Some(results) = self.sim.tick(input) {
                self.results = Some(results);
                finished = Some(results);
            }
            // Clear one-shot inputs after processing
            input.clear_one_shots();
        }
        finished
    }

    /// Run exactly one tick regardless of wall time
    pub fn step(&mut self, input: &S::Input) -> Option<RunResults> {
        if self.sim.phase().is_over() {
            return None;
        }
        self.ticks += 1;
        let results = self.sim.tick(input);
        if results.is_some() {
            self.results = results;
        }
        results
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Results of the finished run, if it finished
    pub fn results(&self) -> Option<RunResults> {
        self.results
    }

    pub fn into_inner(self) -> S {
        self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct CountInput {
        bump: bool,
    }

    impl FrameInput for CountInput {
        fn clear_one_shots(&mut self) {
            self.bump = false;
        }
    }

    /// Finishes after `limit` ticks
    struct Counter {
        ticks: u32,
        bumps: u32,
        limit: u32,
        phase: RunPhase,
    }

    impl Simulation for Counter {
        type Input = CountInput;
        type Snapshot = u32;

        fn tick(&mut self, input: &CountInput) -> Option<RunResults> {
            self.ticks += 1;
            if input.bump {
                self.bumps += 1;
            }
            if self.ticks >= self.limit {
                self.phase = RunPhase::Defeat;
                return Some(RunResults {
                    final_score: self.ticks as u64,
                    ..Default::default()
                });
            }
            None
        }

        fn snapshot(&self) -> u32 {
            self.ticks
        }

        fn phase(&self) -> RunPhase {
            self.phase
        }

        fn abort(&mut self) {
            self.phase = RunPhase::Aborted;
        }
    }

    fn counter(limit: u32) -> Counter {
        Counter {
            ticks: 0,
            bumps: 0,
            limit,
            phase: RunPhase::Active,
        }
    }

    #[test]
    fn test_accumulator_runs_whole_ticks() {
        let mut driver = FixedStepDriver::new(counter(1000));
        let mut input = CountInput::default();
        driver.advance(SIM_DT * 2.5, &mut input);
        assert_eq!(driver.sim().snapshot(), 2);
        driver.advance(SIM_DT * 0.6, &mut input);
        assert_eq!(driver.sim().snapshot(), 3);
    }

    #[test]
    fn test_substeps_are_bounded() {
        let mut driver = FixedStepDriver::new(counter(1000));
        let mut input = CountInput::default();
        driver.advance(10.0, &mut input);
        assert_eq!(driver.sim().snapshot(), MAX_SUBSTEPS);
    }

    #[test]
    fn test_one_shot_input_consumed_once() {
        let mut driver = FixedStepDriver::new(counter(1000));
        let mut input = CountInput { bump: true };
        driver.advance(SIM_DT * 3.0, &mut input);
        assert_eq!(driver.sim().bumps, 1);
        assert!(!input.bump);
    }

    #[test]
    fn test_results_reported_once() {
        let mut driver = FixedStepDriver::new(counter(3));
        let input = CountInput::default();
        assert!(driver.step(&input).is_none());
        assert!(driver.step(&input).is_none());
        assert_eq!(driver.step(&input).map(|r| r.final_score), Some(3));
        assert!(driver.step(&input).is_none());
        assert_eq!(driver.ticks(), 3);
        assert!(driver.results().is_some());
    }

    #[test]
    fn test_aborted_sim_is_not_ticked() {
        let mut driver = FixedStepDriver::new(counter(3));
        driver.sim_mut().abort();
        assert!(driver.step(&CountInput::default()).is_none());
        assert_eq!(driver.sim().snapshot(), 0);
        assert!(driver.results().is_none());
    }
}
