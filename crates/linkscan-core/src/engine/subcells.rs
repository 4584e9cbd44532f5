//! Uniform-grid neighbour search over an atom model and its symmetry images.
//!
//! Every atom is stored once per symmetry image that falls inside the model's
//! bounding box grown by the cutoff. Each cell keeps its entries as a linked
//! list threaded through flat `head`/`next` arrays.

use crate::core::models::ids::{AtomAddress, AtomRef};
use crate::core::models::model::Model;
use crate::core::symmetry::{ImageKey, SymmetryProvider};
use crate::core::utils::geometry::{BoundingBox, distance_squared};
use nalgebra::Point3;
use tracing::debug;

const SENTINEL: u32 = u32::MAX;

/// Upper bound on cells along one axis; larger regions get larger cells.
const MAX_CELLS_PER_AXIS: f64 = 128.0;

/// One hit of a neighbour query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    /// Squared distance from the query point to this image.
    pub dist_sq: f64,
    pub image: ImageKey,
    pub address: AtomAddress,
    pub atom: AtomRef,
}

#[derive(Debug, Clone)]
struct Entry {
    position: Point3<f64>,
    altloc: Option<char>,
    image: ImageKey,
    address: AtomAddress,
    atom: AtomRef,
}

#[derive(Debug, Clone)]
pub struct SpatialCellIndex {
    cutoff: f64,
    /// `None` for a model without atoms.
    region: Option<BoundingBox>,
    cell_size: f64,
    dims: [usize; 3],
    head: Vec<u32>,
    next: Vec<u32>,
    entries: Vec<Entry>,
}

impl SpatialCellIndex {
    /// Lays out an empty grid covering `model` plus `cutoff` on every side.
    pub fn new(model: &Model, cutoff: f64) -> Self {
        let region = BoundingBox::enclosing(model.positions()).map(|b| b.expanded(cutoff));

        let (cell_size, dims) = match &region {
            Some(region) => {
                let extent = region.extent();
                let longest = extent.x.max(extent.y).max(extent.z);
                let mut cell_size = cutoff.max(longest / MAX_CELLS_PER_AXIS);
                if !(cell_size > 0.0) {
                    cell_size = 1.0;
                }
                let cells = |len: f64| ((len / cell_size).ceil() as usize).max(1);
                (cell_size, [cells(extent.x), cells(extent.y), cells(extent.z)])
            }
            None => (cutoff, [0, 0, 0]),
        };

        Self {
            cutoff,
            region,
            cell_size,
            dims,
            head: vec![SENTINEL; dims[0] * dims[1] * dims[2]],
            next: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Inserts every atom of `model` once per symmetry image inside the region.
    pub fn populate<S: SymmetryProvider + ?Sized>(&mut self, model: &Model, symmetry: &S) {
        let Some(region) = self.region else {
            return;
        };
        for (address, atom_ref, atom) in model.iter_atoms() {
            for image in symmetry.images_within(&atom.position, &region) {
                self.insert(Entry {
                    position: image.position,
                    altloc: atom.altloc,
                    image: image.key,
                    address,
                    atom: atom_ref,
                });
            }
        }
        debug!(
            atoms = model.atom_count(),
            images = self.entries.len(),
            cell_size = self.cell_size,
            dims = ?self.dims,
            "Spatial index populated"
        );
    }

    /// Convenience for [`SpatialCellIndex::new`] followed by [`SpatialCellIndex::populate`].
    pub fn build<S: SymmetryProvider + ?Sized>(model: &Model, symmetry: &S, cutoff: f64) -> Self {
        let mut index = Self::new(model, cutoff);
        index.populate(model, symmetry);
        index
    }

    fn insert(&mut self, entry: Entry) {
        let Some(cell) = self.cell_of(&entry.position) else {
            return;
        };
        let idx = self.entries.len() as u32;
        self.next.push(self.head[cell]);
        self.head[cell] = idx;
        self.entries.push(entry);
    }

    fn cell_of(&self, position: &Point3<f64>) -> Option<usize> {
        let region = self.region.as_ref()?;
        let offset = position - region.min;
        let mut idx = [0usize; 3];
        for axis in 0..3 {
            let i = (offset[axis] / self.cell_size).floor();
            if i < 0.0 {
                return None;
            }
            // Points on the upper face belong to the last cell.
            idx[axis] = (i as usize).min(self.dims[axis] - 1);
        }
        Some(idx[0] + idx[1] * self.dims[0] + idx[2] * self.dims[0] * self.dims[1])
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lazily enumerates every stored image within `radius` of `point`.
    ///
    /// Images whose conformer code is set and differs from a set `altloc` are skipped.
    pub fn neighbors(&self, point: &Point3<f64>, altloc: Option<char>, radius: f64) -> Neighbors<'_> {
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        let mut empty = self.entries.is_empty();

        if let Some(region) = &self.region {
            for axis in 0..3 {
                let first = ((point[axis] - radius - region.min[axis]) / self.cell_size).floor();
                let last = ((point[axis] + radius - region.min[axis]) / self.cell_size).floor();
                let max_cell = (self.dims[axis] - 1) as f64;
                if last < 0.0 || first > max_cell || first.is_nan() || last.is_nan() {
                    empty = true;
                    break;
                }
                lo[axis] = first.max(0.0) as usize;
                hi[axis] = last.min(max_cell) as usize;
            }
        }

        Neighbors {
            index: self,
            center: *point,
            radius_sq: radius * radius,
            altloc,
            lo,
            hi,
            cursor: lo,
            current: SENTINEL,
            exhausted: empty,
        }
    }

    /// Callback form of [`SpatialCellIndex::neighbors`].
    pub fn for_each<F>(&self, point: &Point3<f64>, altloc: Option<char>, radius: f64, mut f: F)
    where
        F: FnMut(&Mark),
    {
        for mark in self.neighbors(point, altloc, radius) {
            f(&mark);
        }
    }
}

/// Iterator returned by [`SpatialCellIndex::neighbors`].
pub struct Neighbors<'a> {
    index: &'a SpatialCellIndex,
    center: Point3<f64>,
    radius_sq: f64,
    altloc: Option<char>,
    lo: [usize; 3],
    hi: [usize; 3],
    cursor: [usize; 3],
    current: u32,
    exhausted: bool,
}

impl Neighbors<'_> {
    fn advance_cell(&mut self) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        let [x, y, z] = self.cursor;
        let dims = self.index.dims;
        let cell = x + y * dims[0] + z * dims[0] * dims[1];

        if x < self.hi[0] {
            self.cursor[0] += 1;
        } else if y < self.hi[1] {
            self.cursor[0] = self.lo[0];
            self.cursor[1] += 1;
        } else if z < self.hi[2] {
            self.cursor[0] = self.lo[0];
            self.cursor[1] = self.lo[1];
            self.cursor[2] += 1;
        } else {
            self.exhausted = true;
        }
        Some(cell)
    }
}

impl Iterator for Neighbors<'_> {
    type Item = Mark;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current != SENTINEL {
                let idx = self.current as usize;
                self.current = self.index.next[idx];
                let entry = &self.index.entries[idx];

                if let (Some(filter), Some(code)) = (self.altloc, entry.altloc) {
                    if filter != code {
                        continue;
                    }
                }
                let dist_sq = distance_squared(&entry.position, &self.center);
                if dist_sq <= self.radius_sq {
                    return Some(Mark {
                        dist_sq,
                        image: entry.image,
                        address: entry.address,
                        atom: entry.atom,
                    });
                }
                continue;
            }

            let cell = self.advance_cell()?;
            self.current = self.index.head[cell];
        }
    }
}
