// Hierarchical page paths from a flat page list with parent references

use crate::model::PageRecord;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Annotate every page with its `full_path`.
///
/// Each page's ancestors are walked through `parent_id`, collecting slugs until the
/// walk reaches a root, a dangling parent reference, or an id already seen *in this
/// walk*. A cycle is logged and the segments gathered so far become the path.
///
/// If two records share an id, the later one wins the lookup.
pub fn build_page_paths(pages: &[PageRecord]) -> Vec<PageRecord> {
    let lookup: HashMap<&str, &PageRecord> =
        pages.iter().map(|page| (page.id.as_str(), page)).collect();

    pages
        .iter()
        .map(|page| {
            let mut resolved = page.clone();
            resolved.full_path = Some(resolve_full_path(page, &lookup));
            resolved
        })
        .collect()
}

/// Find the page whose `full_path` equals `path` exactly.
///
/// Precondition: `full_path` is unique across `pages`; the first match is returned.
pub fn find_page_by_path<'a>(pages: &'a [PageRecord], path: &str) -> Option<&'a PageRecord> {
    pages
        .iter()
        .find(|page| page.full_path.as_deref() == Some(path))
}

fn resolve_full_path(page: &PageRecord, lookup: &HashMap<&str, &PageRecord>) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = Some(page);

    while let Some(node) = current {
        if !visited.insert(node.id.as_str()) {
            warn!(
                page = %page.id,
                repeated = %node.id,
                "Cycle in page parent chain, using partial path"
            );
            break;
        }
        segments.push(node.slug.as_str());

        current = match node.parent_id.as_deref() {
            Some(parent_id) => {
                let parent = lookup.get(parent_id).copied();
                if parent.is_none() {
                    debug!(page = %node.id, parent = %parent_id, "Dangling parent reference");
                }
                parent
            }
            None => None,
        };
    }

    join_segments(segments.into_iter().rev())
}

fn join_segments<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = segments
        .map(|segment| segment.trim_matches('/'))
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", parts.join("/"))
}
