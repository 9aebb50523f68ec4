/// A 2-D k-d tree over reference star positions.
///
/// Built once per stack run with median splits (deterministic for a given
/// input order), then queried for the single nearest neighbor of every
/// transformed source star. Squared distances are returned; callers take
/// the root only when comparing against a pixel cutoff.
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: Vec<(f64, f64)>,
}

#[derive(Debug)]
struct KdNode {
    /// Index into the points array.
    point_idx: usize,
    left: Option<usize>,
    right: Option<usize>,
    /// Split dimension (0 = x, 1 = y).
    split_dim: usize,
}

impl KdTree {
    /// Build a tree from a list of points. Returns `None` when empty.
    pub fn build(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let points_vec = points.to_vec();
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());

        Self::build_recursive(&points_vec, &mut indices, 0, &mut nodes);

        Some(Self {
            nodes,
            points: points_vec,
        })
    }

    fn build_recursive(
        points: &[(f64, f64)],
        indices: &mut [usize],
        depth: usize,
        nodes: &mut Vec<KdNode>,
    ) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let split_dim = depth % 2;
        indices.sort_unstable_by(|&a, &b| {
            let va = axis(points[a], split_dim);
            let vb = axis(points[b], split_dim);
            va.total_cmp(&vb)
        });

        let median = indices.len() / 2;
        let point_idx = indices[median];

        let node_idx = nodes.len();
        nodes.push(KdNode {
            point_idx,
            left: None,
            right: None,
            split_dim,
        });

        let (left_indices, right_part) = indices.split_at_mut(median);
        let right_indices = &mut right_part[1..];

        let left = Self::build_recursive(points, left_indices, depth + 1, nodes);
        let right = Self::build_recursive(points, right_indices, depth + 1, nodes);

        nodes[node_idx].left = left;
        nodes[node_idx].right = right;

        Some(node_idx)
    }

    /// Index and squared distance of the point nearest to `query`.
    pub fn nearest(&self, query: (f64, f64)) -> (usize, f64) {
        let mut best = (self.nodes[0].point_idx, f64::INFINITY);
        self.nearest_recursive(0, query, &mut best);
        best
    }

    fn nearest_recursive(&self, node_idx: usize, query: (f64, f64), best: &mut (usize, f64)) {
        let node = &self.nodes[node_idx];
        let point = self.points[node.point_idx];

        let dist_sq = distance_squared(query, point);
        if dist_sq < best.1 {
            *best = (node.point_idx, dist_sq);
        }

        let diff = axis(query, node.split_dim) - axis(point, node.split_dim);
        let (first, second) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(first_idx) = first {
            self.nearest_recursive(first_idx, query, best);
        }
        // The far side can only matter if the splitting plane is closer
        // than the best match found so far.
        if let Some(second_idx) = second {
            if diff * diff < best.1 {
                self.nearest_recursive(second_idx, query, best);
            }
        }
    }
}

#[inline]
fn axis(p: (f64, f64), dim: usize) -> f64 {
    if dim == 0 {
        p.0
    } else {
        p.1
    }
}

#[inline]
fn distance_squared(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}
