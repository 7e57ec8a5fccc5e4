//! Random board layout

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Target;
use crate::error::GameError;

/// Supplies a freshly seeded RNG for each game
pub trait EntropySource {
    fn fresh_rng(&mut self) -> Result<Pcg32, GameError>;
}

/// Seeds from the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fresh_rng(&mut self) -> Result<Pcg32, GameError> {
        Pcg32::try_from_os_rng().map_err(|e| GameError::Entropy(e.to_string()))
    }
}

/// Where each restart gets its randomness from
enum RngSource {
    /// One seeded stream shared by every restart (reproducible runs)
    Seeded(Pcg32),
    /// Fresh entropy per restart
    Fresh(Box<dyn EntropySource + Send>),
}

/// Produces a fresh, ordered set of targets for each game
pub struct TargetGenerator {
    source: RngSource,
}

impl std::fmt::Debug for TargetGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match self.source {
            RngSource::Seeded(_) => "seeded",
            RngSource::Fresh(_) => "fresh",
        };
        f.debug_struct("TargetGenerator")
            .field("source", &source)
            .finish()
    }
}

impl TargetGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(Pcg32::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self::with_source(OsEntropy)
    }

    /// Draw a fresh RNG from `source` on every restart
    pub fn with_source(source: impl EntropySource + Send + 'static) -> Self {
        Self {
            source: RngSource::Fresh(Box::new(source)),
        }
    }

    /// Build `count` targets with ids 1..=count inside a `width` x `height`
    /// board, each fully on the board. Overlaps are allowed.
    ///
    /// Fails only if the randomness source cannot be read.
    pub fn generate(
        &mut self,
        count: u32,
        width: f32,
        height: f32,
        radius: f32,
    ) -> Result<Vec<Target>, GameError> {
        match &mut self.source {
            RngSource::Seeded(rng) => Ok(generate_targets(rng, count, width, height, radius)),
            RngSource::Fresh(source) => {
                let mut rng = source.fresh_rng()?;
                Ok(generate_targets(&mut rng, count, width, height, radius))
            }
        }
    }
}

/// Place `count` targets uniformly at random, ids ascending from 1
pub fn generate_targets<R: Rng>(
    rng: &mut R,
    count: u32,
    width: f32,
    height: f32,
    radius: f32,
) -> Vec<Target> {
    (1..=count)
        .map(|id| {
            let x = coordinate(rng, radius, width);
            let y = coordinate(rng, radius, height);
            Target::new(id, Vec2::new(x, y), radius)
        })
        .collect()
}

/// Uniform in [radius, extent - radius]; pinned to the centre when the
/// board is narrower than one target
fn coordinate<R: Rng>(rng: &mut R, radius: f32, extent: f32) -> f32 {
    let (lo, hi) = (radius, extent - radius);
    if hi <= lo {
        return extent / 2.0;
    }
    rng.random_range(lo..=hi)
}
