use crate::core::models::structure::Structure;
use crate::engine::config::LinkSearchConfig;
use crate::engine::error::LinkError;
use crate::engine::matcher::{LinkMatcher, Match, ScanContext};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::subcells::SpatialCellIndex;
use crate::engine::template_index::TemplateIndex;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Proposes links between atoms of the first model of `structure`.
///
/// Every atom whose name can start a template bond is scanned against its
/// neighbourhood, symmetry images included. Each proposed [`Match`] is then
/// paired with the connection already declared for the same two atoms, if any.
/// The structure is not modified.
///
/// # Errors
///
/// Returns [`LinkError::EmptyStructure`] if the structure has no model.
#[instrument(skip_all, name = "link_search_workflow")]
pub fn find_possible_links<'a>(
    structure: &'a Structure,
    index: &TemplateIndex<'a>,
    config: &LinkSearchConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<Match<'a>>, LinkError> {
    let model = structure.first_model().ok_or(LinkError::EmptyStructure)?;
    if structure.models.len() > 1 {
        warn!(
            models = structure.models.len(),
            "Only the first model is searched for links"
        );
    }

    let symmetry = structure.symmetry();
    let cutoff = config.cutoff(index.global_max_dist());
    info!(
        atoms = model.atom_count(),
        templates = index.len(),
        cutoff,
        symmetry_ops = structure.symmetry_ops.len(),
        "Starting link search"
    );

    let cells = reporter.phase("Indexing", || {
        SpatialCellIndex::build(model, &symmetry, cutoff)
    });

    let matcher = LinkMatcher::new(index);
    let ctx = ScanContext {
        model,
        cells: &cells,
        symmetry: &symmetry,
        config,
    };

    let mut matches = reporter.phase("Scanning", || {
        let atoms: Vec<_> = model.iter_atoms().collect();
        reporter.report(Progress::TaskStart {
            total_steps: atoms.len() as u64,
        });

        #[cfg(not(feature = "parallel"))]
        let iterator = atoms.iter();

        #[cfg(feature = "parallel")]
        let iterator = atoms.par_iter();

        let per_atom: Vec<Vec<Match<'a>>> = iterator
            .map(|&(address, atom_ref, atom)| {
                let found = matcher.matches_for_atom(&ctx, address, atom_ref, atom);
                reporter.report(Progress::TaskIncrement);
                found
            })
            .collect();

        reporter.report(Progress::TaskFinish);
        per_atom.into_iter().flatten().collect::<Vec<_>>()
    });

    reporter.phase("Cross-referencing", || {
        for m in &mut matches {
            m.connection = structure.find_connection(&m.partner1, &m.partner2);
        }
    });

    info!(
        matches = matches.len(),
        with_template = matches.iter().filter(|m| m.template.is_some()).count(),
        declared = matches.iter().filter(|m| m.connection.is_some()).count(),
        "Link search finished"
    );
    Ok(matches)
}
