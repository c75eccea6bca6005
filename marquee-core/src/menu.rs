use crate::model::{MenuItem, MenuLinkType, PageRecord};
use std::collections::HashMap;
use tracing::debug;

/// Rewrite internal menu links to the resolved `full_path` of the page they target.
///
/// `pages` must already carry paths (see [`build_page_paths`](crate::paths::build_page_paths)).
/// Internal items whose page is unknown keep whatever `url` they were authored with.
pub fn resolve_menu_urls(items: &[MenuItem], pages: &[PageRecord]) -> Vec<MenuItem> {
    let paths: HashMap<&str, &str> = pages
        .iter()
        .filter_map(|page| Some((page.id.as_str(), page.full_path.as_deref()?)))
        .collect();

    items.iter().map(|item| resolve_item(item, &paths)).collect()
}

fn resolve_item(item: &MenuItem, paths: &HashMap<&str, &str>) -> MenuItem {
    let mut resolved = item.clone();

    if item.link_type == MenuLinkType::Internal
        && let Some(page_id) = item.page_id.as_deref()
    {
        match paths.get(page_id) {
            Some(path) => resolved.url = Some((*path).to_string()),
            None => debug!(item = %item.id, page = %page_id, "Menu item targets unknown page"),
        }
    }

    resolved.children = item
        .children
        .iter()
        .map(|child| resolve_item(child, paths))
        .collect();
    resolved
}

/// Depth-first `(depth, item)` listing of a menu tree.
pub fn flatten_menu(items: &[MenuItem]) -> Vec<(usize, &MenuItem)> {
    fn walk<'a>(items: &'a [MenuItem], depth: usize, out: &mut Vec<(usize, &'a MenuItem)>) {
        for item in items {
            out.push((depth, item));
            walk(&item.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(items, 0, &mut out);
    out
}
