use super::config::{LinkSearchConfig, LinkSearchConfigBuilder, TieBreak};
use super::error::LinkError;
use super::progress::ProgressReporter;
use super::subcells::{Mark, SpatialCellIndex};
use super::template_index::TemplateIndex;
use crate::core::chemistry::chemlink::{ChemLink, ChiralSign, LinkAtom, LinkSideRole};
use crate::core::models::atom::Atom;
use crate::core::models::connection::Connection;
use crate::core::models::ids::{AtomAddress, AtomRef};
use crate::core::models::model::Model;
use crate::core::models::structure::Structure;
use crate::core::symmetry::{ImageKey, SymmetryProvider};
use crate::core::utils::geometry::chiral_volume;
use itertools::Itertools;
use nalgebra::Point3;
use tracing::debug;

/// An atom closer than this to its own symmetry image sits on a special position.
const SPECIAL_POSITION_DIST_SQ: f64 = 0.8 * 0.8;

/// A proposed link between two atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// Winning template, or `None` for a contact accepted on covalent radii alone.
    pub template: Option<&'a ChemLink>,
    /// How many templates passed for this pair.
    pub template_count: usize,
    /// Side-1 atom for template matches.
    pub partner1: AtomRef,
    pub partner2: AtomRef,
    /// Image of the scanned neighbour; the scanned atom is always in the identity image.
    pub image: ImageKey,
    pub same_asu: bool,
    pub bond_length: f64,
    pub connection: Option<&'a Connection>,
}

impl<'a> Match<'a> {
    pub fn is_ambiguous(&self) -> bool {
        self.template_count > 1
    }

    /// One-line summary, e.g. `A/ZN 501 ZN -- A/CYS 12 SG 2.30 Å [ZN-CYS] same ASU`.
    pub fn describe(&self, model: &Model) -> String {
        let template = self.template.map_or("covalent radii", |t| t.id.as_str());
        let placement = if self.same_asu {
            "same ASU".to_string()
        } else {
            format!("image {}", self.image)
        };
        let mut line = format!(
            "{} -- {} {:.2} Å [{}] {}",
            atom_label(model, &self.partner1),
            atom_label(model, &self.partner2),
            self.bond_length,
            template,
            placement
        );
        if self.template_count > 1 {
            line.push_str(&format!(" ({} templates)", self.template_count));
        }
        if let Some(conn) = self.connection {
            line.push_str(&format!(" declared {} {}", conn.kind, conn.id));
        }
        line
    }
}

fn atom_label(model: &Model, atom_ref: &AtomRef) -> String {
    let chain = model.chain(atom_ref.chain).map_or("?", |c| c.name.as_str());
    let (residue, seq) = model
        .residue(atom_ref.residue)
        .map_or(("?", String::new()), |r| (r.name.as_str(), r.seq_label()));
    let atom = model.atom(atom_ref.atom);
    let name = atom.map_or("?", |a| a.name.as_str());
    match atom.and_then(|a| a.altloc) {
        Some(alt) => format!("{}/{} {} {}.{}", chain, residue, seq, name, alt),
        None => format!("{}/{} {} {}", chain, residue, seq, name),
    }
}

/// Everything one scan over a model shares between atoms; built before the scan, read-only during it.
pub struct ScanContext<'m, S: ?Sized> {
    pub model: &'m Model,
    pub cells: &'m SpatialCellIndex,
    pub symmetry: &'m S,
    pub config: &'m LinkSearchConfig,
}

/// One end of a candidate pair.
#[derive(Clone, Copy)]
struct Endpoint<'m> {
    atom_ref: AtomRef,
    atom: &'m Atom,
    residue_name: &'m str,
    image: ImageKey,
}

struct Candidate<'a> {
    link: &'a ChemLink,
    /// The scanned atom plays side 1.
    point_is_side1: bool,
    deviation: f64,
}

pub struct LinkMatcher<'i, 'a> {
    index: &'i TemplateIndex<'a>,
}

impl<'i, 'a> LinkMatcher<'i, 'a> {
    pub fn new(index: &'i TemplateIndex<'a>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &TemplateIndex<'a> {
        self.index
    }

    /// Runs a whole search with default settings apart from the two margins.
    pub fn find_possible_links<'s>(
        &self,
        structure: &'s Structure,
        bond_margin: f64,
        radius_margin: f64,
    ) -> Result<Vec<Match<'s>>, LinkError>
    where
        'a: 's,
    {
        let config = LinkSearchConfigBuilder::new()
            .bond_margin(bond_margin)
            .radius_margin(radius_margin)
            .build()?;
        crate::workflows::link_search::find_possible_links(
            structure,
            self.index,
            &config,
            &ProgressReporter::new(),
        )
    }

    /// Links proposed while scanning from one atom of the model.
    ///
    /// Returns nothing for atoms whose name starts no template bond.
    pub fn matches_for_atom<S>(
        &self,
        ctx: &ScanContext<'_, S>,
        address: AtomAddress,
        atom_ref: AtomRef,
        atom: &Atom,
    ) -> Vec<Match<'a>>
    where
        S: SymmetryProvider + ?Sized,
    {
        let Some(reach) = self.index.reach(&atom.name) else {
            return Vec::new();
        };
        let Some(residue) = ctx.model.residue(atom_ref.residue) else {
            return Vec::new();
        };
        let point = Endpoint {
            atom_ref,
            atom,
            residue_name: &residue.name,
            image: ImageKey::IDENTITY,
        };

        ctx.cells
            .neighbors(&atom.position, atom.altloc, reach * ctx.config.bond_margin)
            .filter_map(|mark| self.evaluate(ctx, address, &point, &mark))
            .collect()
    }

    fn evaluate<S>(
        &self,
        ctx: &ScanContext<'_, S>,
        address: AtomAddress,
        point: &Endpoint<'_>,
        mark: &Mark,
    ) -> Option<Match<'a>>
    where
        S: SymmetryProvider + ?Sized,
    {
        if mark.image.is_identity() && mark.address.same_residue(&address) {
            return None;
        }
        if mark.address < address {
            return None;
        }
        if mark.address == address && mark.dist_sq < SPECIAL_POSITION_DIST_SQ {
            return None;
        }

        let neighbor = Endpoint {
            atom_ref: mark.atom,
            atom: ctx.model.atom(mark.atom.atom)?,
            residue_name: &ctx.model.residue(mark.atom.residue)?.name,
            image: mark.image,
        };
        let bond_length = mark.dist_sq.sqrt();
        let bond_margin = ctx.config.bond_margin;

        let mut passing = Vec::new();
        for &link in self.index.candidates(&point.atom.name, &neighbor.atom.name) {
            let Some(bond) = link.primary_bond() else {
                continue;
            };
            let limit = bond.value * bond_margin;
            if mark.dist_sq > limit * limit {
                continue;
            }
            let Some(point_is_side1) = self.orientation(link, point, &neighbor) else {
                continue;
            };
            if self.violates_chirality(ctx, link, point_is_side1, point, &neighbor) {
                continue;
            }
            passing.push(Candidate {
                link,
                point_is_side1,
                deviation: (bond_length - bond.value).abs(),
            });
        }

        let base = |template: Option<&'a ChemLink>,
                    template_count: usize,
                    partner1: AtomRef,
                    partner2: AtomRef| Match {
            template,
            template_count,
            partner1,
            partner2,
            image: mark.image,
            same_asu: mark.image.is_identity(),
            bond_length,
            connection: None,
        };

        if passing.is_empty() {
            let r1 = point.atom.element.covalent_radius()?;
            let r2 = neighbor.atom.element.covalent_radius()?;
            let limit = (r1 + r2) * ctx.config.radius_margin;
            if mark.dist_sq > limit * limit {
                return None;
            }
            return Some(base(None, 0, neighbor.atom_ref, point.atom_ref));
        }

        if passing.len() > 1 {
            debug!(
                point = %point.atom.name,
                neighbor = %neighbor.atom.name,
                templates = %passing.iter().map(|c| c.link.id.as_str()).join(", "),
                "Several link templates fit one atom pair"
            );
        }
        let chosen = select(&passing, ctx.config.tie_break)?;
        let (partner1, partner2) = if chosen.point_is_side1 {
            (point.atom_ref, neighbor.atom_ref)
        } else {
            (neighbor.atom_ref, point.atom_ref)
        };
        Some(base(Some(chosen.link), passing.len(), partner1, partner2))
    }

    /// `Some(true)` when the scanned atom plays side 1, `Some(false)` for side 2.
    fn orientation(&self, link: &ChemLink, point: &Endpoint<'_>, neighbor: &Endpoint<'_>) -> Option<bool> {
        let bond = link.primary_bond()?;
        let fits = |role: LinkSideRole, other: LinkSideRole| {
            bond.atom_on(role).name == point.atom.name
                && self.index.match_side(link.side(role), point.residue_name)
                && self.index.match_side(link.side(other), neighbor.residue_name)
        };
        if fits(LinkSideRole::First, LinkSideRole::Second) {
            Some(true)
        } else if fits(LinkSideRole::Second, LinkSideRole::First) {
            Some(false)
        } else {
            None
        }
    }

    fn violates_chirality<S>(
        &self,
        ctx: &ScanContext<'_, S>,
        link: &ChemLink,
        point_is_side1: bool,
        point: &Endpoint<'_>,
        neighbor: &Endpoint<'_>,
    ) -> bool
    where
        S: SymmetryProvider + ?Sized,
    {
        let altloc = point.atom.altloc.or(neighbor.atom.altloc);
        let locate = |link_atom: &LinkAtom| -> Option<Point3<f64>> {
            let on_point_side = (link_atom.side == LinkSideRole::First) == point_is_side1;
            let end = if on_point_side { point } else { neighbor };
            let (_, atom) = ctx.model.find_atom(end.atom_ref.residue, &link_atom.name, altloc)?;
            if end.image.is_identity() {
                Some(atom.position)
            } else {
                ctx.symmetry.apply(end.image, &atom.position)
            }
        };

        link.chiralities
            .iter()
            .filter(|chirality| chirality.sign != ChiralSign::Both)
            .any(|chirality| {
                let [center, a1, a2, a3] = chirality.atoms();
                let (Some(c), Some(p1), Some(p2), Some(p3)) =
                    (locate(center), locate(a1), locate(a2), locate(a3))
                else {
                    return false;
                };
                let volume = chiral_volume(&c, &p1, &p2, &p3);
                let wrong = chirality.is_wrong(volume);
                if wrong {
                    debug!(link = %link.id, volume, "Link template rejected by chirality");
                }
                wrong
            })
    }
}

fn select<'c, 'a>(passing: &'c [Candidate<'a>], tie_break: TieBreak) -> Option<&'c Candidate<'a>> {
    match tie_break {
        TieBreak::LastEnumerated => passing.last(),
        TieBreak::MostSpecific => passing.iter().min_by(|a, b| {
            b.link
                .specificity()
                .cmp(&a.link.specificity())
                .then_with(|| a.deviation.total_cmp(&b.deviation))
                .then_with(|| a.link.id.cmp(&b.link.id))
        }),
    }
}
