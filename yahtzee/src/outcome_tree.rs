use std::sync::OnceLock;

use tracing::debug;

use crate::{Hand, FACES, NUM_DICE};

/// Index of the first node of each depth in the arena.
const LEVEL_OFFSETS: [usize; NUM_DICE + 2] = [0, 1, 7, 43, 259, 1555, 9331];

/// The number of nodes in the tree, including the root.
pub const NUM_NODES: usize = LEVEL_OFFSETS[NUM_DICE + 1];

/// Every sequence of up to five die values, as a tree of depth 5 with six
/// children per inner node.
///
/// The path from the root to a node is the sequence of dice fixed so far, and
/// the leaves below a node are all complete hands that can still result from
/// it. The tree is fully built on construction and never changes afterwards.
///
/// Nodes are stored level by level in value order, so that the children of a
/// node, and the leaves below it, occupy contiguous ranges of the arena.
#[derive(Clone, Debug)]
pub struct OutcomeTree {
    /// `paths[i]` is the path from the root to node `i`.
    paths: Vec<Hand>,
}

/// A node of an [`OutcomeTree`].
///
/// This is a cheap handle; the path it stands for lives in the tree.
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    tree: &'a OutcomeTree,
    depth: u8,
    /// Position of the node within its level.
    rank: usize,
}

/// The error type for [`OutcomeTree::child_for_path()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNotFound {
    pub path: Vec<u8>,
}

impl std::error::Error for PathNotFound {}

impl std::fmt::Display for PathNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No node at path {:?}: paths hold at most five values between 1 and 6",
            self.path
        )
    }
}

impl OutcomeTree {
    pub fn new() -> Self {
        let mut paths = Vec::with_capacity(NUM_NODES);
        paths.push(Hand::new());
        for depth in 0..NUM_DICE {
            for parent_idx in LEVEL_OFFSETS[depth]..LEVEL_OFFSETS[depth + 1] {
                let parent = paths[parent_idx];
                for value in FACES {
                    paths.push(parent.push_unchecked(value));
                }
            }
        }
        debug_assert_eq!(paths.len(), NUM_NODES);
        Self { paths }
    }

    /// A tree shared by the whole process, built on first use.
    pub fn shared() -> &'static OutcomeTree {
        static TREE: OnceLock<OutcomeTree> = OnceLock::new();
        TREE.get_or_init(|| {
            let tree = OutcomeTree::new();
            debug!(num_nodes = tree.num_nodes(), "Built outcome tree");
            tree
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.paths.len()
    }

    /// The empty path.
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            depth: 0,
            rank: 0,
        }
    }

    /// Descends from the root along `path`.
    pub fn child_for_path(&self, path: &[u8]) -> Result<Node<'_>, PathNotFound> {
        self.root().descend(path)
    }
}

impl Default for OutcomeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Node<'a> {
    pub fn depth(self) -> usize {
        usize::from(self.depth)
    }

    pub fn is_leaf(self) -> bool {
        self.depth() == NUM_DICE
    }

    /// The die values from the root to this node.
    pub fn path(self) -> Hand {
        self.tree.paths[LEVEL_OFFSETS[self.depth()] + self.rank]
    }

    /// The child reached by fixing the next die to `value`.
    ///
    /// Returns `None` for leaves and for values outside `1..=6`.
    pub fn child(self, value: u8) -> Option<Node<'a>> {
        if self.is_leaf() || !FACES.contains(&value) {
            return None;
        }
        Some(Node {
            tree: self.tree,
            depth: self.depth + 1,
            rank: self.rank * 6 + usize::from(value - 1),
        })
    }

    pub fn children(self) -> impl Iterator<Item = Node<'a>> {
        FACES.filter_map(move |value| self.child(value))
    }

    /// Descends along `path`, one value per level.
    pub fn descend(self, path: &[u8]) -> Result<Node<'a>, PathNotFound> {
        path.iter()
            .try_fold(self, |node, &value| node.child(value))
            .ok_or_else(|| PathNotFound {
                path: path.to_vec(),
            })
    }

    /// All leaves below this node (the node itself, if it is a leaf), with the
    /// subtree of value 1 first.
    pub fn leaves(self) -> impl ExactSizeIterator<Item = Node<'a>> {
        let width = 6usize.pow((NUM_DICE - self.depth()) as u32);
        let tree = self.tree;
        (self.rank * width..(self.rank + 1) * width).map(move |rank| Node {
            tree,
            depth: NUM_DICE as u8,
            rank,
        })
    }
}

impl std::fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.path().iter().map(|d| d.to_string()).collect();
        write!(f, "{}", values.join(" -> "))
    }
}
