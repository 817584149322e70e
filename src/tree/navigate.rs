//! Addressing nodes by their child-index path.
//!
//! An address is a dot-separated path of child indices rooted at `"0"`:
//! `"0.2.1"` is the second child of the third child of the root.

use super::types::TreeNode;

/// Looks up a node by address. Returns `None` for a malformed address or an
/// index past the end of a child list.
pub fn node_at<'a>(root: &'a TreeNode, address: &str) -> Option<&'a TreeNode> {
    let mut parts = address.split('.');
    if parts.next()? != "0" {
        return None;
    }
    parts.try_fold(root, |node, part| {
        let index: usize = part.parse().ok()?;
        node.children.get(index)
    })
}

/// Address of the highest-scoring terminal-valid leaf, if any.
///
/// Ties go to the leaf met first in pre-order.
pub fn best_leaf_address(root: &TreeNode) -> Option<String> {
    let mut best: Option<(i64, Vec<usize>)> = None;
    let mut stack: Vec<(&TreeNode, Vec<usize>)> = vec![(root, Vec::new())];
    while let Some((node, path)) = stack.pop() {
        if node.is_leaf() {
            if node.viability.is_terminal_valid
                && best.as_ref().map_or(true, |(score, _)| node.score > *score)
            {
                best = Some((node.score, path));
            }
            continue;
        }
        for (index, child) in node.children.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(index);
            stack.push((child, child_path));
        }
    }
    best.map(|(_, path)| format_address(&path))
}

fn format_address(path: &[usize]) -> String {
    std::iter::once("0".to_string())
        .chain(path.iter().map(usize::to_string))
        .collect::<Vec<_>>()
        .join(".")
}
