//! Envelope-distance automatic weighting.
//!
//! Each vertex is weighted towards its nearest bones by inverse squared
//! distance to the bone segment, truncated to the strongest influences and
//! renormalized. This is a stand-in for a host's heat-diffusion weighting:
//! good enough to exercise binding end to end.

use autorig_spec::{Skeleton, Vec3, VertexInfluence, WeightMap};
use glam::DVec3;

/// Distances below this are clamped so a vertex on a bone gets a finite weight.
const MIN_DISTANCE: f64 = 1e-4;

/// Distance from a point to the segment `a`-`b`.
pub fn distance_to_segment(point: DVec3, a: DVec3, b: DVec3) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Weights every vertex against every bone of the skeleton.
///
/// Returns an empty map if the skeleton has no bones.
pub fn envelope_weights(vertices: &[Vec3], skeleton: &Skeleton, max_influences: u8) -> WeightMap {
    let segments: Vec<(&str, DVec3, DVec3)> = skeleton
        .bones()
        .iter()
        .map(|bone| {
            (
                bone.name.as_str(),
                DVec3::from_array(bone.head),
                DVec3::from_array(bone.tail),
            )
        })
        .collect();

    if segments.is_empty() {
        return WeightMap::default();
    }

    let keep = usize::from(max_influences.max(1));
    let per_vertex = vertices
        .iter()
        .map(|v| {
            let point = DVec3::from_array(*v);
            let mut raw: Vec<(&str, f64)> = segments
                .iter()
                .map(|(name, head, tail)| {
                    let d = distance_to_segment(point, *head, *tail).max(MIN_DISTANCE);
                    (*name, 1.0 / (d * d))
                })
                .collect();

            // Strongest first; ties broken by bone order for determinism.
            raw.sort_by(|a, b| b.1.total_cmp(&a.1));
            raw.truncate(keep);

            let total: f64 = raw.iter().map(|(_, w)| w).sum();
            raw.into_iter()
                .map(|(name, w)| VertexInfluence::new(name, w / total))
                .collect()
        })
        .collect();

    WeightMap::new(per_vertex)
}
