//! Polygon triangulation.
//!
//! The primary path decomposes the input into y-monotone loops and
//! triangulates each with a reflex-chain stack. Its output is validated
//! for manifoldness and folding; if validation fails (which can happen for
//! self-touching boundaries), a simpler topological fan triangulator is
//! tried once before the error is surfaced.

use crate::error::TriangulateError;
use crate::polygon::monotone::{Monotones, SweepVert};
use crate::polygon::types::{next, prev, shared_edge, Polygons, Triangle};
use crate::polygon::validate::{check_folded, check_manifold};
use crate::tolerance::ccw;
use num_traits::Float;

/// Stack triangulator for one y-monotone loop.
///
/// Holds the reflex chain: the vertices of one side of the loop that have
/// been visited but not yet discharged into triangles.
struct Triangulator<'a, F> {
    monotones: &'a [SweepVert<F>],
    reflex_chain: Vec<usize>,
    other_side: usize,
    triangles_output: usize,
    on_right: bool,
}

impl<'a, F: Float> Triangulator<'a, F> {
    fn new(monotones: &'a [SweepVert<F>], v_idx: usize) -> Self {
        Triangulator {
            monotones,
            reflex_chain: vec![v_idx],
            other_side: v_idx,
            triangles_output: 0,
            on_right: false,
        }
    }

    fn num_triangles(&self) -> usize {
        self.triangles_output
    }

    fn top(&self) -> usize {
        self.reflex_chain[self.reflex_chain.len() - 1]
    }

    /// Offers `vi_idx` to this triangulator. Returns false when the vertex
    /// belongs to a different monotone loop.
    fn process_vert(&mut self, vi_idx: usize, triangles: &mut Vec<Triangle>) -> bool {
        let attached = self.attached(vi_idx);
        if attached == 0 {
            return false;
        }
        let vi = self.monotones[vi_idx];
        let mut v_top_idx = self.top();
        let mut v_top = self.monotones[v_top_idx];
        if self.reflex_chain.len() < 2 {
            self.reflex_chain.push(vi_idx);
            self.on_right = vi.left == v_top_idx;
            return true;
        }
        self.reflex_chain.pop();
        let mut vj_idx = self.top();
        let mut vj = self.monotones[vj_idx];
        if attached == 1 {
            log::debug!("same chain");
            // Discharge while the turn at the popped vertex is no longer
            // reflex seen from vi.
            let reflex_sign = if self.on_right { -1 } else { 1 };
            while ccw(vi.pos, vj.pos, v_top.pos) != reflex_sign {
                self.add_triangle(triangles, vi.mesh_idx, vj.mesh_idx, v_top.mesh_idx);
                v_top_idx = vj_idx;
                self.reflex_chain.pop();
                if self.reflex_chain.is_empty() {
                    break;
                }
                v_top = vj;
                vj_idx = self.top();
                vj = self.monotones[vj_idx];
            }
            self.reflex_chain.push(v_top_idx);
            self.reflex_chain.push(vi_idx);
        } else {
            log::debug!("different chain");
            self.on_right = !self.on_right;
            // Fan from vi across the entire old chain.
            let mut v_last = v_top;
            while let Some(&chain_top) = self.reflex_chain.last() {
                vj = self.monotones[chain_top];
                self.add_triangle(triangles, vi.mesh_idx, v_last.mesh_idx, vj.mesh_idx);
                v_last = vj;
                self.reflex_chain.pop();
            }
            self.reflex_chain.push(v_top_idx);
            self.reflex_chain.push(vi_idx);
            self.other_side = v_top_idx;
        }
        true
    }

    /// 1 when `v_idx` continues the current chain, -1 when it arrives on
    /// the opposite chain, 0 when it belongs to another loop.
    fn attached(&self, v_idx: usize) -> i32 {
        let chain_top = self.monotones[self.top()];
        let other = self.monotones[self.other_side];
        if self.on_right {
            if other.left == v_idx {
                -1
            } else if chain_top.right == v_idx {
                1
            } else {
                0
            }
        } else if other.right == v_idx {
            -1
        } else if chain_top.left == v_idx {
            1
        } else {
            0
        }
    }

    fn add_triangle(&mut self, triangles: &mut Vec<Triangle>, v0: i32, v1: i32, v2: i32) {
        if self.on_right {
            triangles.push([v0, v1, v2]);
        } else {
            triangles.push([v0, v2, v1]);
        }
        self.triangles_output += 1;
    }
}

/// Triangulates every monotone loop of the sweep graph.
///
/// Walks vertices in sweep order and dispatches each to the first
/// triangulator that accepts it, spawning a new one per loop top.
fn triangulate_monotones<F: Float>(
    monotones: &[SweepVert<F>],
    triangles: &mut Vec<Triangle>,
) -> Result<(), TriangulateError> {
    // Same pair sort as the sweep, so loops are consumed top to bottom in
    // the order they were produced.
    let mut sweep_line: Vec<(usize, usize)> = monotones
        .iter()
        .enumerate()
        .map(|(i, vert)| (vert.sweep_order, i))
        .collect();
    sweep_line.sort_unstable();

    let mut triangulators: Vec<Triangulator<F>> = Vec::new();
    for &(_, v_idx) in &sweep_line {
        let mut found = false;
        for (j, triangulator) in triangulators.iter_mut().enumerate() {
            if triangulator.process_vert(v_idx, triangles) {
                log::debug!(
                    "vertex {} consumed by triangulator {} ({} triangles so far)",
                    v_idx,
                    j,
                    triangulator.num_triangles()
                );
                found = true;
                break;
            }
        }
        if !found {
            triangulators.push(Triangulator::new(monotones, v_idx));
        }
    }

    // Each loop of k vertices must yield exactly k - 2 triangles.
    let mut triangles_left = monotones.len() as isize;
    for triangulator in &triangulators {
        triangles_left -= 2 + triangulator.num_triangles() as isize;
    }
    if triangles_left != 0 {
        return Err(TriangulateError::WrongTriangleCount);
    }
    Ok(())
}

/// Monotone-decomposition triangulation of a polygon set.
fn primary_triangulate<F: Float>(polys: &Polygons<F>) -> Result<Vec<Triangle>, TriangulateError> {
    let monotones = Monotones::new(polys)?;
    let mut triangles = Vec::new();
    triangulate_monotones(monotones.verts(), &mut triangles)?;
    Ok(triangles)
}

/// Topological fan triangulation of each loop, used as a fallback.
///
/// Walks a strip between two cursors, alternating ends to keep vertex
/// degrees bounded, and steps past configurations that would duplicate a
/// boundary edge (detected through the `next_edge` tags). Guaranteed
/// manifold for simple input; geometry is ignored entirely.
fn backup_triangulate<F: Float>(polys: &Polygons<F>) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    for poly in polys {
        let n = poly.len();
        if n < 3 {
            continue;
        }
        let mut start = 1;
        let mut end = n - 1;
        let mut tri: Triangle = [poly[end].idx, poly[0].idx, poly[start].idx];
        let mut start_edges = [poly[prev(start, n)].next_edge, poly[start].next_edge];
        let mut end_edges = [poly[prev(end, n)].next_edge, poly[end].next_edge];
        let mut forward = false;
        loop {
            if start == end {
                break;
            }
            if shared_edge(start_edges, end_edges) {
                // Step to the other side to dodge the shared boundary edge.
                if forward {
                    start = prev(start, n);
                    end = prev(end, n);
                    tri = [poly[end].idx, tri[0], tri[1]];
                } else {
                    start = next(start, n);
                    end = next(end, n);
                    tri = [tri[1], tri[2], poly[start].idx];
                }
                start_edges = [poly[prev(start, n)].next_edge, poly[start].next_edge];
                end_edges = [poly[prev(end, n)].next_edge, poly[end].next_edge];
                forward = !forward;
            }
            triangles.push(tri);
            // Alternate ends so no vertex accumulates a high degree.
            forward = !forward;
            if forward {
                start = next(start, n);
                start_edges = [poly[prev(start, n)].next_edge, poly[start].next_edge];
                tri = [tri[0], tri[2], poly[start].idx];
            } else {
                end = prev(end, n);
                end_edges = [poly[prev(end, n)].next_edge, poly[end].next_edge];
                tri = [poly[end].idx, tri[0], tri[2]];
            }
        }
    }
    triangles
}

/// Triangulates a polygon set into consistently oriented triangles whose
/// halfedges, together with the boundary, form a 2-manifold.
///
/// The primary monotone-decomposition path guarantees manifold,
/// non-folded output for input that does not self-overlap. When it fails
/// (self-touching boundaries can trip its invariants or the validators),
/// the backup fan triangulator is tried once and revalidated; its failure
/// is returned to the caller.
///
/// # Example
///
/// ```
/// use monotri::{triangulate, Point2, PolyVert, EDGE_NO_IDX};
///
/// let square = vec![vec![
///     PolyVert::new(Point2::new(0.0_f64, 0.0), 0, EDGE_NO_IDX),
///     PolyVert::new(Point2::new(1.0, 0.0), 1, EDGE_NO_IDX),
///     PolyVert::new(Point2::new(1.0, 1.0), 2, EDGE_NO_IDX),
///     PolyVert::new(Point2::new(0.0, 1.0), 3, EDGE_NO_IDX),
/// ]];
/// let triangles = triangulate(&square).unwrap();
/// assert_eq!(triangles.len(), 2);
/// ```
pub fn triangulate<F: Float>(polys: &Polygons<F>) -> Result<Vec<Triangle>, TriangulateError> {
    let primary = primary_triangulate(polys).and_then(|triangles| {
        check_manifold(&triangles, polys)?;
        check_folded(&triangles, polys)?;
        Ok(triangles)
    });
    match primary {
        Ok(triangles) => Ok(triangles),
        Err(err) => {
            log::warn!(
                "primary triangulation failed ({}), switching to backup",
                err
            );
            let triangles = backup_triangulate(polys);
            match check_manifold(&triangles, polys) {
                Ok(()) => Ok(triangles),
                Err(backup_err) => {
                    log::warn!("backup triangulation failed ({})", backup_err);
                    Err(backup_err)
                }
            }
        }
    }
}
