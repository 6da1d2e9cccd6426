//! Weighted k-means in RGB space.
//!
//! Identical pixels are collapsed into one weighted point before clustering,
//! which gives the same partition as clustering every pixel but touches each
//! distinct color once per iteration. Initialization is k-means++ and the
//! best of several restarts (lowest inertia) is kept.

use rand::rngs::StdRng;
use rand::Rng;

/// A distinct color and how many sampled pixels carry it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WeightedPoint {
    pub pos: [f64; 3],
    pub weight: f64,
}

/// Outcome of one clustering.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Clustering {
    pub centroids: Vec<[f64; 3]>,
    /// Total weight assigned to each centroid.
    pub populations: Vec<f64>,
    /// Weighted sum of squared distances to the assigned centroid.
    pub inertia: f64,
}

/// Settings for [`kmeans`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct KMeansParams {
    pub k: usize,
    pub restarts: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

#[inline]
fn dist2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// Index and squared distance of the nearest centroid (lowest index on ties).
#[inline]
fn nearest(point: &[f64; 3], centroids: &[[f64; 3]]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = dist2(point, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// Pick an index with probability proportional to `weights`.
fn pick_weighted(weights: &[f64], rng: &mut StdRng) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.gen_range(0..weights.len());
    }
    let target = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            acc += w;
            last_positive = i;
            if acc > target {
                return i;
            }
        }
    }
    // Float accumulation can fall just short of `total`
    last_positive
}

/// k-means++ seeding: the first centroid is drawn by weight, each further
/// one by weight times squared distance to the closest centroid so far.
fn init_plus_plus(points: &[WeightedPoint], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let weights: Vec<f64> = points.iter().map(|p| p.weight).collect();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[pick_weighted(&weights, rng)].pos);

    let mut closest: Vec<f64> = points.iter().map(|p| dist2(&p.pos, &centroids[0])).collect();
    while centroids.len() < k {
        let scores: Vec<f64> = points
            .iter()
            .zip(&closest)
            .map(|(p, d)| p.weight * d)
            .collect();
        let next = points[pick_weighted(&scores, rng)].pos;
        for (d, p) in closest.iter_mut().zip(points) {
            *d = d.min(dist2(&p.pos, &next));
        }
        centroids.push(next);
    }
    centroids
}

/// Lloyd iterations from the given seeds. Empty clusters keep their
/// previous centroid.
fn lloyd(
    points: &[WeightedPoint],
    mut centroids: Vec<[f64; 3]>,
    params: &KMeansParams,
) -> Clustering {
    let k = centroids.len();
    for _ in 0..params.max_iterations {
        let mut sums = vec![[0.0f64; 3]; k];
        let mut totals = vec![0.0f64; k];
        for p in points {
            let (i, _) = nearest(&p.pos, &centroids);
            for c in 0..3 {
                sums[i][c] += p.pos[c] * p.weight;
            }
            totals[i] += p.weight;
        }

        let mut shift = 0.0;
        for i in 0..k {
            if totals[i] > 0.0 {
                let updated = [
                    sums[i][0] / totals[i],
                    sums[i][1] / totals[i],
                    sums[i][2] / totals[i],
                ];
                shift += dist2(&updated, &centroids[i]);
                centroids[i] = updated;
            }
        }
        if shift <= params.tolerance {
            break;
        }
    }

    let mut populations = vec![0.0; k];
    let mut inertia = 0.0;
    for p in points {
        let (i, d) = nearest(&p.pos, &centroids);
        populations[i] += p.weight;
        inertia += d * p.weight;
    }
    Clustering {
        centroids,
        populations,
        inertia,
    }
}

/// Cluster `points` into `params.k` groups, keeping the restart with the
/// lowest inertia (the earliest one on ties).
///
/// `points` must be non-empty and `params.k` at least 1.
pub(crate) fn kmeans(
    points: &[WeightedPoint],
    params: &KMeansParams,
    rng: &mut StdRng,
) -> Clustering {
    let mut best: Option<Clustering> = None;
    for restart in 0..params.restarts.max(1) {
        let seeds = init_plus_plus(points, params.k, rng);
        let run = lloyd(points, seeds, params);
        tracing::trace!(restart, inertia = run.inertia, "k-means restart finished");
        if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }
    // restarts.max(1) guarantees at least one run
    best.unwrap_or_else(|| Clustering {
        centroids: Vec::new(),
        populations: Vec::new(),
        inertia: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn params(k: usize) -> KMeansParams {
        KMeansParams {
            k,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }

    fn point(r: f64, g: f64, b: f64, weight: f64) -> WeightedPoint {
        WeightedPoint {
            pos: [r, g, b],
            weight,
        }
    }

    #[test]
    fn test_two_well_separated_groups() {
        let points = [
            point(250.0, 0.0, 0.0, 1.0),
            point(255.0, 5.0, 0.0, 1.0),
            point(0.0, 250.0, 0.0, 1.0),
            point(5.0, 255.0, 0.0, 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let result = kmeans(&points, &params(2), &mut rng);

        let mut centroids = result.centroids.clone();
        centroids.sort_by(|a, b| b[0].total_cmp(&a[0]));
        assert_eq!(centroids, vec![[252.5, 2.5, 0.0], [2.5, 252.5, 0.0]]);
        assert_eq!(result.populations, vec![2.0, 2.0]);
        assert!((result.inertia - 4.0 * 12.5).abs() < 1e-9, "inertia {}", result.inertia);
    }

    #[test]
    fn test_weights_pull_centroid() {
        let points = [point(0.0, 0.0, 0.0, 3.0), point(100.0, 0.0, 0.0, 1.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let result = kmeans(&points, &params(1), &mut rng);
        assert_eq!(result.centroids, vec![[25.0, 0.0, 0.0]]);
        assert_eq!(result.populations, vec![4.0]);
    }

    #[test]
    fn test_seeding_never_repeats_a_point_when_distinct_enough() {
        let points: Vec<_> = (0..5).map(|i| point(f64::from(i) * 50.0, 0.0, 0.0, 1.0)).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seeds = init_plus_plus(&points, 5, &mut rng);
        seeds.sort_by(|a, b| a[0].total_cmp(&b[0]));
        seeds.dedup();
        assert_eq!(seeds.len(), 5, "k-means++ picked a duplicate seed");
    }

    #[test]
    fn test_deterministic_for_seed() {
        let points: Vec<_> = (0..50)
            .map(|i| {
                let x = f64::from(i);
                point((x * 37.0) % 256.0, (x * 91.0) % 256.0, (x * 13.0) % 256.0, 1.0)
            })
            .collect();
        let a = kmeans(&points, &params(4), &mut StdRng::seed_from_u64(42));
        let b = kmeans(&points, &params(4), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_weighted_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(pick_weighted(&[0.0, 2.0, 0.0], &mut rng), 1);
        }
    }
}
