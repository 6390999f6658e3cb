use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Placement constraints for decorative props.
pub struct ScatterRules<'a> {
    pub count: usize,
    /// Props land inside this disc around the origin.
    pub radius: f32,
    pub min_spacing: f32,
    /// Station anchors to keep clear of.
    pub keep_clear: &'a [Vec3],
    pub clearance: f32,
    pub attempts_per_prop: usize,
    /// Extra per-candidate test, e.g. no water or steep ground.
    pub accept: &'a dyn Fn(Vec2) -> bool,
}

/// Rejection-sample up to `rules.count` XZ positions. The same seed always yields the same props.
///
/// Sampling stops after `count * attempts_per_prop` candidates, so crowded
/// rules return fewer props rather than looping.
pub fn scatter(rules: &ScatterRules, seed: u64) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut accepted: Vec<Vec2> = Vec::with_capacity(rules.count);
    let max_attempts = rules.count * rules.attempts_per_prop;

    let spacing_sq = rules.min_spacing * rules.min_spacing;
    let clearance_sq = rules.clearance * rules.clearance;

    for _ in 0..max_attempts {
        if accepted.len() >= rules.count {
            break;
        }

        // Uniform over the disc area.
        let r = rules.radius * rng.r#gen::<f32>().sqrt();
        let theta = rng.gen_range(0.0..std::f32::consts::TAU);
        let candidate = Vec2::new(theta.cos() * r, theta.sin() * r);

        if rules
            .keep_clear
            .iter()
            .any(|s| s.xz().distance_squared(candidate) < clearance_sq)
        {
            continue;
        }
        if accepted
            .iter()
            .any(|p| p.distance_squared(candidate) < spacing_sq)
        {
            continue;
        }
        if !(rules.accept)(candidate) {
            continue;
        }
        accepted.push(candidate);
    }

    if accepted.len() < rules.count {
        debug!(
            "Scatter placed {} of {} props before running out of attempts",
            accepted.len(),
            rules.count
        );
    }
    accepted
}
