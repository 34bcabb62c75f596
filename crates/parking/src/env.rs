/// Reinforcement learning environment trait.
///
/// Gym-style interface: each call to [`step`] applies one action, advances the
/// simulation by one decision tick and returns the new observation vector, the
/// reward of that tick, and whether the episode is over (terminated or
/// truncated).
///
/// [`step`]: Env::step
pub trait Env {
    /// Advance the environment by one action.
    ///
    /// Returns `(obs, reward, done)`.
    fn step(&mut self, action: &[f32]) -> (Vec<f32>, f32, bool);

    /// Reset the environment to its starting state and return the initial
    /// observation vector.
    fn reset(&mut self) -> Vec<f32>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Size of the action space.
    fn action_size(&self) -> usize;
}
