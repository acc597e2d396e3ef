//! Monotone decomposition by plane sweep.
//!
//! The sweep walks all vertices in ascending `(y, index)` order and
//! classifies each one by the processed state of its neighbors. Split and
//! merge events duplicate vertices and rewire the `left`/`right` ring so
//! that, when the sweep finishes, the ring decomposes the input into
//! y-monotone loops. Each monotone loop then triangulates with a simple
//! stack walk.
//!
//! Vertices are only ever appended to the buffer; `left`/`right`/`across`
//! are indices into it. The buffer is released wholesale when
//! triangulation completes.

use crate::error::TriangulateError;
use crate::polygon::assemble::assemble;
use crate::polygon::types::{next, prev, EdgeVerts, Polygons, EDGE_NO_IDX};
use crate::primitives::Point2;
use crate::tolerance::ccw;
use num_traits::Float;
use std::cmp::Ordering;

/// Marks an `across` pointer as unprocessed.
pub(crate) const UNSET: usize = usize::MAX;

/// A vertex of the sweep graph.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepVert<F> {
    pub pos: Point2<F>,
    /// Caller identity, carried into the output triangles.
    pub mesh_idx: i32,
    /// Next neighbor in the ring.
    pub right: usize,
    /// Previous neighbor in the ring.
    pub left: usize,
    /// Diagonal partner; [`UNSET`] until this vertex is processed.
    pub across: usize,
    pub merge: bool,
    /// Rank along the sweep, shared with the triangulator so both passes
    /// visit vertices in the same order.
    pub sweep_order: usize,
}

impl<F> SweepVert<F> {
    #[inline]
    pub fn processed(&self) -> bool {
        self.across != UNSET
    }
}

/// Sweep event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VertType {
    Start,
    End,
    Rightwards,
    Leftwards,
    Merge,
    Split,
    RevStart,
}

/// The sweep-vertex graph of a polygon set, decomposed into y-monotone
/// loops.
#[derive(Debug)]
pub(crate) struct Monotones<F> {
    verts: Vec<SweepVert<F>>,
}

impl<F: Float> Monotones<F> {
    /// Runs the sweep over `polys`.
    ///
    /// Fails with a logic error when the sweep does not terminate on an
    /// end vertex or the resulting ring is inconsistent, which happens for
    /// genuinely self-overlapping input.
    pub fn new(polys: &Polygons<F>) -> Result<Self, TriangulateError> {
        let mut monotones = Monotones { verts: Vec::new() };
        let mut sweep_line: Vec<(F, usize)> = Vec::new();
        for poly in polys {
            let start = monotones.verts.len();
            let n = poly.len();
            for (i, vert) in poly.iter().enumerate() {
                monotones.verts.push(SweepVert {
                    pos: vert.pos,
                    mesh_idx: vert.idx,
                    right: start + next(i, n),
                    left: start + prev(i, n),
                    across: UNSET,
                    merge: false,
                    sweep_order: 0,
                });
                sweep_line.push((vert.pos.y, start + i));
            }
        }
        // The tie-break for equal y must agree with the triangulator's
        // sort, or monotone loops would be consumed out of order.
        sweep_line.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut v_type = VertType::Start;
        for (order, &(_, idx)) in sweep_line.iter().enumerate() {
            monotones.verts[idx].sweep_order = order;
            v_type = monotones.process_vert(idx);
            log::debug!("processed sweep vertex {} as {:?}", idx, v_type);
        }
        monotones.check()?;
        if v_type != VertType::End {
            return Err(TriangulateError::DidNotFinishWithEnd);
        }
        Ok(monotones)
    }

    pub fn verts(&self) -> &[SweepVert<F>] {
        &self.verts
    }

    /// Ring consistency: mutual neighbor pointers, no two-edge loops, and
    /// the ring must still assemble into closed polygons.
    fn check(&self) -> Result<(), TriangulateError> {
        let mut edges = Vec::with_capacity(self.verts.len());
        for (i, vert) in self.verts.iter().enumerate() {
            edges.push(EdgeVerts {
                first: i as i32,
                second: vert.right as i32,
                edge: EDGE_NO_IDX,
            });
            if self.verts[vert.right].right == i {
                return Err(TriangulateError::TwoEdgeMonotone);
            }
            if self.verts[vert.right].left != i {
                return Err(TriangulateError::NeighborsDisagree);
            }
        }
        let loops = assemble::<F>(&edges)?;
        log::debug!("monotone ring assembles into {} loops", loops.len());
        Ok(())
    }

    fn match_verts(&mut self, a: usize, b: usize) {
        log::debug!("matched {} and {}", a, b);
        self.verts[a].across = b;
        self.verts[b].across = a;
    }

    fn link(&mut self, left: usize, right: usize) {
        self.verts[left].right = right;
        self.verts[right].left = left;
    }

    /// Splits `v` into a left copy (the original) and a right copy
    /// (appended), rewiring the ring between them and resolving the
    /// `across` pointers of both according to which neighbors have been
    /// processed.
    fn duplicate(&mut self, v: usize) {
        self.verts[v].merge = true;
        let v_right = self.verts.len();
        self.verts.push(self.verts[v]);
        let old_right = self.verts[v].right;
        self.verts[old_right].left = v_right;
        if self.verts[v].processed() {
            if self.verts[old_right].processed() {
                let across = self.verts[v].across;
                self.match_verts(v_right, across);
                self.match_verts(v, v);
            } else {
                self.match_verts(v_right, v_right);
            }
        } else {
            if self.verts[self.verts[v].left].processed() {
                let helper = self.helper(v, self.verts[v].left);
                self.match_verts(v, helper);
            } else {
                self.verts[v].across = v;
            }
            if self.verts[old_right].processed() {
                let helper = self.helper(v, old_right);
                self.match_verts(v_right, helper);
            } else {
                self.verts[v_right].across = v_right;
            }
        }
        self.link(v, v_right);
    }

    /// Inserts the diagonal `left_dupe <-> v` as two new ring halfedges,
    /// appending a duplicate of `v`. Returns the duplicate's index.
    fn split_verts(&mut self, v: usize, left_dupe: usize) -> usize {
        log::debug!("split from {} to {}", v, left_dupe);
        self.verts[left_dupe].merge = false;
        let dupe_right = self.verts[left_dupe].right;
        self.verts[dupe_right].merge = false;
        let new_vert = self.verts.len();
        self.verts.push(self.verts[v]);
        let new_left = self.verts[new_vert].left;
        self.verts[new_left].right = new_vert;
        self.link(new_vert, dupe_right);
        self.link(left_dupe, v);
        new_vert
    }

    /// The diagonal partner recorded on `neighbor`, or `neighbor` itself
    /// when it is matched to `v`.
    fn helper(&self, v: usize, neighbor: usize) -> usize {
        let helper = self.verts[neighbor].across;
        if helper == v {
            neighbor
        } else {
            helper
        }
    }

    /// Finds the processed active edge nearest to the left of `v` along
    /// the sweep line, provided the sweep is currently inside a positive
    /// region there (total winding of crossings left of `v` equals one).
    ///
    /// Linear in the vertex count; robustness on degenerate input matters
    /// more here than asymptotics.
    fn positive_exterior_helper(&self, v: usize) -> Option<usize> {
        let mut best_x = F::neg_infinity();
        let mut helper = None;
        let mut winding = 0;
        for i in 0..self.verts.len() {
            let left = self.verts[i].left;
            if self.verts[i].processed() == self.verts[left].processed() {
                continue; // not an active edge
            }
            let a = (self.verts[i].pos.y - self.verts[v].pos.y)
                / (self.verts[i].pos.y - self.verts[left].pos.y);
            let x = if a.is_nan() {
                // Horizontal edge on the sweep line.
                self.verts[i].pos.x.min(self.verts[left].pos.x)
            } else {
                let a = a.min(F::one()).max(F::zero());
                self.verts[i].pos.x * (F::one() - a) + self.verts[left].pos.x * a
            };
            if x < self.verts[v].pos.x {
                winding += if self.verts[i].processed() { 1 } else { -1 };
                if self.verts[i].processed() && x > best_x {
                    best_x = x;
                    helper = Some(i);
                }
            }
        }
        log::debug!("winding = {}", winding);
        if winding == 1 {
            helper
        } else {
            None
        }
    }

    fn process_vert(&mut self, idx: usize) -> VertType {
        let right = self.verts[idx].right;
        let left = self.verts[idx].left;
        if self.verts[right].processed() {
            if self.verts[left].processed() {
                let r_across = self.verts[right].across;
                if r_across == left {
                    VertType::End
                } else if self.verts[r_across].right == self.verts[left].across
                    && self.verts[r_across].merge
                {
                    // End that also closes a pending merge.
                    self.split_verts(idx, r_across);
                    VertType::End
                } else {
                    self.duplicate(idx);
                    let across = self.verts[idx].across;
                    if self.verts[across].merge {
                        let helper = self.verts[across].left;
                        self.split_verts(idx, helper);
                        let helper_across = self.verts[helper].across;
                        self.match_verts(idx, helper_across);
                    }
                    let idx_right = self.verts[idx].right;
                    let right_across = self.verts[idx_right].across;
                    if self.verts[right_across].merge {
                        let new_vert = self.split_verts(idx_right, right_across);
                        let new_right_across = self.verts[self.verts[new_vert].right].across;
                        self.match_verts(new_vert, new_right_across);
                    }
                    VertType::Merge
                }
            } else {
                let helper = self.helper(idx, right);
                if self.verts[helper].merge {
                    let new_vert = self.split_verts(idx, helper);
                    let new_right_across = self.verts[self.verts[new_vert].right].across;
                    self.match_verts(new_vert, new_right_across);
                } else {
                    self.match_verts(idx, helper);
                }
                VertType::Leftwards
            }
        } else if self.verts[left].processed() {
            let mut helper = self.helper(idx, left);
            if self.verts[helper].merge {
                helper = self.verts[helper].left;
                self.split_verts(idx, helper);
                let helper_across = self.verts[helper].across;
                self.match_verts(idx, helper_across);
            } else {
                self.match_verts(idx, helper);
            }
            VertType::Rightwards
        } else if ccw(
            self.verts[idx].pos,
            self.verts[right].pos,
            self.verts[left].pos,
        ) > 0
        {
            self.verts[idx].across = idx;
            VertType::Start
        } else {
            match self.positive_exterior_helper(idx) {
                Some(mut helper) => {
                    // Use the upper copy of an already-split helper.
                    if self.verts[helper].pos.y < self.verts[self.verts[helper].across].pos.y {
                        helper = self.verts[helper].across;
                    }
                    if !self.verts[helper].merge {
                        self.duplicate(helper);
                    }
                    let new_vert = self.split_verts(idx, helper);
                    let new_right_across = self.verts[self.verts[new_vert].right].across;
                    self.match_verts(new_vert, new_right_across);
                    let helper_across = self.verts[helper].across;
                    self.match_verts(idx, helper_across);
                    VertType::Split
                }
                None => {
                    // Locally reversed boundary with no enclosing region.
                    self.verts[idx].across = idx;
                    VertType::RevStart
                }
            }
        }
    }
}
