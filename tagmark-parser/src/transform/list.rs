//! Nested-list reconstruction from flat indentation levels.

use rustc_hash::FxHashMap;

use crate::{
    Error,
    model::{Item, Node},
};

/// Rebuilds a nested list body from items tagged with their indentation
/// level.
///
/// An append target is registered per level, addressed as an index path
/// into the growing tree (paths alternate body index and child-body index
/// from the root). Raising the level by any amount creates exactly one
/// synthetic sub-list under the last item appended at the current level
/// and registers it for the new level; dropping the level resumes the
/// target registered for it earlier. An item whose level was never
/// registered has nothing to attach to and is rejected.
pub(super) fn nest(items: Vec<(usize, Node)>) -> Result<Vec<Item>, Error> {
    let mut body: Vec<Item> = Vec::new();
    let mut targets: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    targets.insert(0, Vec::new());
    let mut current = 0usize;

    for (level, item) in items {
        if level > current {
            let parent_path = targets
                .get(&current)
                .cloned()
                .ok_or(Error::OrphanListItem { level })?;
            let parent = resolve(&mut body, &parent_path)
                .ok_or(Error::OrphanListItem { level })?;
            let last_index = parent
                .len()
                .checked_sub(1)
                .ok_or(Error::OrphanListItem { level })?;
            let Some(Item::Node(last)) = parent.get_mut(last_index) else {
                return Err(Error::OrphanListItem { level });
            };

            last.body.push(Item::Node(Node {
                parameters: super::flag_parameters("list"),
                body: Vec::new(),
            }));

            let mut path = parent_path;
            path.push(last_index);
            path.push(last.body.len() - 1);
            targets.insert(level, path);
            current = level;
        } else if level < current {
            current = level;
        }

        let path = targets
            .get(&current)
            .ok_or(Error::OrphanListItem { level })?;
        let target = resolve(&mut body, path).ok_or(Error::OrphanListItem { level })?;
        target.push(Item::Node(item));
    }

    Ok(body)
}

/// Follows an index path from the root body to a registered append target.
/// Registered paths only ever address node entries, and entries are never
/// removed, so a recorded path stays valid for the whole pass.
fn resolve<'a>(body: &'a mut Vec<Item>, path: &[usize]) -> Option<&'a mut Vec<Item>> {
    let mut target = body;
    let mut indices = path.iter();
    while let Some(&entry) = indices.next() {
        let child = *indices.next()?;
        let node = match target.get_mut(entry)? {
            Item::Node(node) => node,
            Item::Text(_) => return None,
        };
        let inner = match node.body.get_mut(child)? {
            Item::Node(node) => node,
            Item::Text(_) => return None,
        };
        target = &mut inner.body;
    }
    Some(target)
}
