//! The traversal plan: dotted column paths folded into a tree.
//!
//! `["books.name", "books.publisher", "reviews.user.email"]` becomes
//!
//! ```text
//! books
//!   name
//!   publisher
//! reviews
//!   user
//!     email
//! ```
//!
//! Leaves are attributes read at their level ("handleable" keys). Inner
//! nodes are associations to descend into ("passable" keys).

use crate::data::SEPARATOR;

/// A node of the traversal plan.
///
/// Children keep insertion order, so keys come back in the order the
/// columns were configured. Equality ignores that order: two trees are equal
/// when they have the same keys mapping to equal subtrees.
#[derive(Debug, Clone, Default)]
pub struct PathTree {
    children: Vec<(String, PathTree)>,
}

impl PathTree {
    /// An empty node (a leaf when found under a key).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a key with its subtree, merging into an existing key.
    pub fn with(self, key: impl Into<String>, subtree: PathTree) -> Self {
        self.merge(PathTree {
            children: vec![(key.into(), subtree)],
        })
    }

    /// Builder: add a leaf key
    pub fn with_leaf(self, key: impl Into<String>) -> Self {
        self.with(key, PathTree::new())
    }

    /// Returns `true` if this node has no keys.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys at this node.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no keys.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up the subtree under a key.
    pub fn get(&self, key: &str) -> Option<&PathTree> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, subtree)| subtree)
    }

    /// Iterate keys and subtrees in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathTree)> {
        self.children.iter().map(|(k, t)| (k.as_str(), t))
    }

    /// Number of levels below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|(_, t)| t.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Merge two trees into a new one.
    ///
    /// Keys present in both are merged recursively instead of overwritten,
    /// so `books.name` and `books.publisher` share one `books` node.
    pub fn merge(self, other: PathTree) -> PathTree {
        let mut children = self.children;
        for (key, subtree) in other.children {
            match children.iter().position(|(k, _)| *k == key) {
                Some(idx) => {
                    let existing = std::mem::take(&mut children[idx].1);
                    children[idx].1 = existing.merge(subtree);
                }
                None => children.push((key, subtree)),
            }
        }
        PathTree { children }
    }
}

impl PartialEq for PathTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, subtree)| other.get(key) == Some(subtree))
    }
}

impl Eq for PathTree {}

/// Turn one dotted path into a single-branch tree.
///
/// An empty path yields an empty tree.
pub fn path_to_tree(path: &str) -> PathTree {
    if path.is_empty() {
        return PathTree::new();
    }
    path.rsplit(SEPARATOR).fold(PathTree::new(), |inner, segment| {
        PathTree::new().with(segment, inner)
    })
}

/// Fold an ordered list of dotted paths into one tree.
pub fn build_tree<I, S>(paths: I) -> PathTree
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths.into_iter().fold(PathTree::new(), |tree, path| {
        tree.merge(path_to_tree(path.as_ref()))
    })
}

/// Keys whose subtree is empty: read directly at this level.
pub fn handleable_keys(node: &PathTree) -> Vec<&str> {
    node.iter()
        .filter(|(_, subtree)| subtree.is_leaf())
        .map(|(key, _)| key)
        .collect()
}

/// Keys whose subtree is not empty: associations to descend into.
pub fn passable_keys(node: &PathTree) -> Vec<&str> {
    node.iter()
        .filter(|(_, subtree)| !subtree.is_leaf())
        .map(|(key, _)| key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> PathTree {
        PathTree::new()
    }

    #[test]
    fn test_path_to_tree() {
        assert_eq!(path_to_tree("books"), leaf().with_leaf("books"));
        assert_eq!(
            path_to_tree("reviews.user"),
            leaf().with("reviews", leaf().with_leaf("user"))
        );
    }

    #[test]
    fn test_path_to_tree_empty() {
        assert!(path_to_tree("").is_empty());
    }

    #[test]
    fn test_build_tree_single_path() {
        assert_eq!(
            build_tree(["books.name"]),
            leaf().with("books", leaf().with_leaf("name"))
        );
    }

    #[test]
    fn test_build_tree_merges_shared_prefixes() {
        let tree = build_tree([
            "books.name",
            "books.publisher",
            "reviews.rating",
            "reviews.user.email",
            "reviews.user.id",
        ]);
        let expected = leaf()
            .with("books", leaf().with_leaf("name").with_leaf("publisher"))
            .with(
                "reviews",
                leaf()
                    .with_leaf("rating")
                    .with("user", leaf().with_leaf("email").with_leaf("id")),
            );
        assert_eq!(tree, expected);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_build_tree_keeps_first_seen_order() {
        let tree = build_tree(["title", "books.title", "author"]);
        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "books", "author"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = leaf().with_leaf("x").with_leaf("y");
        let b = leaf().with_leaf("y").with_leaf("x");
        assert_eq!(a, b);
        assert_ne!(a, leaf().with_leaf("x"));
        assert_ne!(a, leaf().with_leaf("x").with("y", leaf().with_leaf("z")));
    }

    #[test]
    fn test_merge_does_not_disturb_inputs() {
        let books = path_to_tree("books.name");
        let merged = books.clone().merge(path_to_tree("books.publisher"));
        assert_eq!(books.get("books").map(PathTree::len), Some(1));
        assert_eq!(merged.get("books").map(PathTree::len), Some(2));
    }

    #[test]
    fn test_leaf_and_branch_for_same_key_merge_into_branch() {
        let tree = build_tree(["books", "books.title"]);
        assert_eq!(tree, leaf().with("books", leaf().with_leaf("title")));
    }

    #[test]
    fn test_partition() {
        let node = leaf()
            .with_leaf("name")
            .with("books", leaf().with_leaf("title"));
        assert_eq!(handleable_keys(&node), vec!["name"]);
        assert_eq!(passable_keys(&node), vec!["books"]);
    }

    #[test]
    fn test_partition_covers_every_key_once() {
        let node = build_tree(["a", "b.c", "d", "e.f.g"]);
        let mut all: Vec<&str> = handleable_keys(&node);
        all.extend(passable_keys(&node));
        all.sort();
        assert_eq!(all, vec!["a", "b", "d", "e"]);
    }
}
