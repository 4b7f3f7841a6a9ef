use fastnoise_lite::{FastNoiseLite, NoiseType};
use relief_geom::Vec3;

use crate::ScalarField;

/// OpenSimplex2 field sampled as a 2D sheet over x/z. Height shaping comes
/// from the per-layer threshold, not from the noise itself.
pub struct SimplexField {
    noise: FastNoiseLite,
}

impl SimplexField {
    pub fn with_seed(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }
}

impl ScalarField for SimplexField {
    #[inline]
    fn sample(&self, pos: Vec3, scale: f32) -> f32 {
        let v = self.noise.get_noise_2d(pos.x / scale, pos.z / scale);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
