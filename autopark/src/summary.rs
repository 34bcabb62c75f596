//! Per-episode results collected by the runner.

use parking::Phase;
use serde::{Deserialize, Serialize};

/// Outcome of one episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    /// Decision ticks taken
    pub steps: u32,
    pub episode_return: f32,
    /// Phase the episode ended in
    pub phase: Phase,
    pub truncated: bool,
}

/// Episode outcomes of a run with per-ending counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub episodes: Vec<EpisodeSummary>,
    pub parked: usize,
    pub collided: usize,
    pub truncated: usize,
    pub mean_return: f32,
}

impl RunSummary {
    /// Append an episode and count how it ended.
    pub fn record(&mut self, episode: EpisodeSummary) {
        match episode.phase {
            Phase::Parked => self.parked += 1,
            Phase::Collided => self.collided += 1,
            Phase::Searching | Phase::Navigating => {}
        }
        if episode.truncated {
            self.truncated += 1;
        }
        self.episodes.push(episode);
        let total: f32 = self.episodes.iter().map(|e| e.episode_return).sum();
        self.mean_return = total / self.episodes.len() as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(phase: Phase, episode_return: f32) -> EpisodeSummary {
        EpisodeSummary {
            episode: 0,
            steps: 10,
            episode_return,
            phase,
            truncated: !phase.is_terminal(),
        }
    }

    #[test]
    fn counts_outcomes_and_averages_returns() {
        let mut run = RunSummary::default();
        run.record(episode(Phase::Parked, 1.5));
        run.record(episode(Phase::Collided, -0.5));
        run.record(episode(Phase::Searching, 0.0));
        assert_eq!((run.parked, run.collided, run.truncated), (1, 1, 1));
        assert!((run.mean_return - 1.0 / 3.0).abs() < 1e-6);
    }
}
