/// Upper bound on grid cells; larger arenas get coarser cells.
pub const MAX_CELLS: usize = 1 << 20;

/// Uniform-grid spatial index over agent positions.
///
/// Uses the offset-array layout of compressed sparse rows:
/// `cell_offsets[i]..cell_offsets[i + 1]` indexes into `agent_indices` for
/// every agent in cell `i`. Within a cell, agents keep their input order.
///
/// # Examples
/// ```
/// use contagion_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(10.0, 100.0, 100.0);
/// spatial.build(&[(15.0, 15.0), (25.0, 25.0), (85.0, 85.0)]);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(15.0, 15.0, 20.0, &mut nearby);
/// nearby.sort_unstable();
/// assert_eq!(nearby, vec![0, 1]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpatialHash {
    pub cell_size: f64,
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub agent_indices: Vec<usize>,
    /// Per-cell counts, then fill cursors, reused across builds.
    scratch: Vec<usize>,
}

impl SpatialHash {
    /// Creates a grid over `width` x `height`.
    ///
    /// `cell_size` is a lower bound: it grows until the grid fits in
    /// [`MAX_CELLS`].
    pub fn new(cell_size: f64, width: f64, height: f64) -> Self {
        let dims = |size: f64| {
            (
                ((width / size).ceil() as usize).max(1),
                ((height / size).ceil() as usize).max(1),
            )
        };
        let mut cell_size = cell_size.max((width * height / MAX_CELLS as f64).sqrt());
        let (mut cols, mut rows) = dims(cell_size);
        while cols.saturating_mul(rows) > MAX_CELLS {
            cell_size *= 2.0;
            (cols, rows) = dims(cell_size);
        }
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            agent_indices: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Cell of a world coordinate.
    ///
    /// Points on the far walls belong to the last row or column. Non-finite
    /// or out-of-arena points have no cell.
    #[inline]
    pub fn get_cell_idx(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        if x < 0.0 || y < 0.0 || x > self.width || y > self.height {
            return None;
        }
        let cx = ((x / self.cell_size) as usize).min(self.cols - 1);
        let cy = ((y / self.cell_size) as usize).min(self.rows - 1);
        Some(cy * self.cols + cx)
    }

    pub fn build(&mut self, positions: &[(f64, f64)]) {
        let cell_count = self.cols * self.rows;

        self.scratch.clear();
        self.scratch.resize(cell_count, 0);
        for &(x, y) in positions {
            if let Some(idx) = self.get_cell_idx(x, y) {
                self.scratch[idx] += 1;
            }
        }

        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in self.scratch.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.agent_indices.clear();
        self.agent_indices.resize(total, 0);
        self.scratch.copy_from_slice(&self.cell_offsets[..cell_count]);
        for (agent_idx, &(x, y)) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.get_cell_idx(x, y) {
                let slot = self.scratch[cell_idx];
                self.agent_indices[slot] = agent_idx;
                self.scratch[cell_idx] += 1;
            }
        }
    }

    fn cell_range(&self, x: f64, y: f64, radius: f64) -> (usize, usize, usize, usize) {
        let clamp = |v: f64, n: usize| (v.max(0.0) as usize).min(n - 1);
        (
            clamp(((x - radius) / self.cell_size).floor(), self.cols),
            clamp(((x + radius) / self.cell_size).floor(), self.cols),
            clamp(((y - radius) / self.cell_size).floor(), self.rows),
            clamp(((y + radius) / self.cell_size).floor(), self.rows),
        )
    }

    /// Visits every agent in the cells overlapping the query square.
    ///
    /// Callers still filter by exact distance.
    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let (min_cx, max_cx, min_cy, max_cy) = self.cell_range(x, y, radius);
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = cy * self.cols + cx;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];
                for &agent_idx in &self.agent_indices[start..end] {
                    callback(agent_idx);
                }
            }
        }
    }

    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        self.query_callback(x, y, radius, |idx| result.push(idx));
    }

    pub fn count_nearby(&self, x: f64, y: f64, radius: f64) -> usize {
        let mut count = 0;
        self.query_callback(x, y, radius, |_| count += 1);
        count
    }
}
