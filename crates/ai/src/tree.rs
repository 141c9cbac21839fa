use engine::Move;
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// Handle to a node inside a `MoveTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One ply in the search tree. Nodes compare by score only.
#[derive(Debug, Clone)]
pub struct MoveNode {
    pub mv: Move,
    pub children: Vec<NodeId>,
    /// `None` for root moves
    pub parent: Option<NodeId>,
    pub point_advantage: i32,
}

impl MoveNode {
    fn new(mv: Move, parent: Option<NodeId>) -> Self {
        Self {
            mv,
            children: Vec::new(),
            parent,
            point_advantage: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl PartialEq for MoveNode {
    fn eq(&self, other: &Self) -> bool {
        self.point_advantage == other.point_advantage
    }
}

impl Eq for MoveNode {}

impl PartialOrd for MoveNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MoveNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point_advantage.cmp(&other.point_advantage)
    }
}

/// Arena holding every node of one search. Built fresh per decision and
/// dropped once the best move is extracted.
#[derive(Debug, Clone, Default)]
pub struct MoveTree {
    nodes: Vec<MoveNode>,
    roots: Vec<NodeId>,
}

impl MoveTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, mv: Move) -> NodeId {
        let id = self.push(MoveNode::new(mv, None));
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, mv: Move) -> NodeId {
        let id = self.push(MoveNode::new(mv, Some(parent)));
        self[parent].children.push(id);
        id
    }

    fn push(&mut self, node: MoveNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 1 for a root move, otherwise one more than the parent
    pub fn depth(&self, id: NodeId) -> u32 {
        match self[id].parent {
            Some(parent) => 1 + self.depth(parent),
            None => 1,
        }
    }

    /// Children sharing the lowest score, in enumeration order
    pub fn min_children(&self, id: NodeId) -> Vec<NodeId> {
        self.extremal(&self[id].children, Ordering::Less)
    }

    /// Children sharing the highest score, in enumeration order
    pub fn max_children(&self, id: NodeId) -> Vec<NodeId> {
        self.extremal(&self[id].children, Ordering::Greater)
    }

    /// Root moves sharing the highest score
    pub fn max_roots(&self) -> Vec<NodeId> {
        self.extremal(&self.roots, Ordering::Greater)
    }

    /// Single pass keeping every node tied at the extreme; a strictly better
    /// node in the `better` direction resets the set
    fn extremal(&self, ids: &[NodeId], better: Ordering) -> Vec<NodeId> {
        let mut best: Vec<NodeId> = Vec::new();
        for &id in ids {
            let Some(&current) = best.first() else {
                best.push(id);
                continue;
            };
            match self[id].cmp(&self[current]) {
                Ordering::Equal => best.push(id),
                ordering if ordering == better => {
                    best.clear();
                    best.push(id);
                }
                _ => {}
            }
        }
        best
    }

    /// Backward minimax pass. Resolves every descendant first, then stores
    /// the maximum child score when the children sit on an odd ply (the
    /// searching side's move) and the minimum on an even ply. Leaves keep
    /// the score they were given during expansion.
    pub fn optimal_point_advantage(&mut self, id: NodeId) -> i32 {
        let children = self[id].children.clone();
        let Some(&first) = children.first() else {
            return self[id].point_advantage;
        };

        let scores: Vec<i32> = children
            .iter()
            .map(|&child| self.optimal_point_advantage(child))
            .collect();

        let optimal = if self.depth(first) % 2 == 1 {
            scores.iter().max()
        } else {
            scores.iter().min()
        };
        // `children` is non-empty here
        let optimal = optimal.copied().unwrap_or(self[id].point_advantage);

        self[id].point_advantage = optimal;
        optimal
    }
}

impl Index<NodeId> for MoveTree {
    type Output = MoveNode;

    fn index(&self, id: NodeId) -> &MoveNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for MoveTree {
    fn index_mut(&mut self, id: NodeId) -> &mut MoveNode {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Piece, PieceKind, Side, Square};

    fn dummy_move(file: u8) -> Move {
        let pawn = Piece::new(PieceKind::Pawn, Side::White);
        Move::new(pawn, Square::new(file, 1), Square::new(file, 2))
    }

    /// Root with one child per score, returning (tree, root)
    fn root_with_scores(scores: &[i32]) -> (MoveTree, NodeId) {
        let mut tree = MoveTree::new();
        let root = tree.add_root(dummy_move(0));
        for (i, &score) in scores.iter().enumerate() {
            let child = tree.add_child(root, dummy_move(i as u8 % 8));
            tree[child].point_advantage = score;
        }
        (tree, root)
    }

    fn scores_of(tree: &MoveTree, ids: &[NodeId]) -> Vec<i32> {
        ids.iter().map(|&id| tree[id].point_advantage).collect()
    }

    #[test]
    fn depth_follows_parent_chain() {
        let mut tree = MoveTree::new();
        let root = tree.add_root(dummy_move(0));
        let child = tree.add_child(root, dummy_move(1));
        let grandchild = tree.add_child(child, dummy_move(2));

        assert_eq!(tree.depth(root), 1);
        assert_eq!(tree.depth(child), 2);
        assert_eq!(tree.depth(grandchild), 3);
        assert_eq!(tree[grandchild].parent, Some(child));
        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn nodes_order_by_score_only() {
        let (tree, root) = root_with_scores(&[4, 4, -2]);
        let children = &tree[root].children;
        assert_eq!(tree[children[0]], tree[children[1]]);
        assert!(tree[children[2]] < tree[children[0]]);
    }

    #[test]
    fn extremal_children_keep_all_ties() {
        let (tree, root) = root_with_scores(&[3, -1, 5, -1, 5, 0]);

        let max = tree.max_children(root);
        assert_eq!(max.len(), 2);
        assert_eq!(scores_of(&tree, &max), vec![5, 5]);

        let min = tree.min_children(root);
        assert_eq!(min.len(), 2);
        assert_eq!(scores_of(&tree, &min), vec![-1, -1]);
    }

    #[test]
    fn extremal_children_of_leaf_is_empty() {
        let (tree, root) = root_with_scores(&[]);
        assert!(tree.max_children(root).is_empty());
        assert!(tree.min_children(root).is_empty());
    }

    #[test]
    fn backward_pass_alternates_max_and_min() {
        // root (depth 1) -> two replies (depth 2, min) -> answers (depth 3, max)
        let mut tree = MoveTree::new();
        let root = tree.add_root(dummy_move(0));
        let reply_a = tree.add_child(root, dummy_move(1));
        let reply_b = tree.add_child(root, dummy_move(2));
        for (parent, scores) in [(reply_a, [1, 7]), (reply_b, [4, 2])] {
            for score in scores {
                let answer = tree.add_child(parent, dummy_move(3));
                tree[answer].point_advantage = score;
            }
        }

        // max(1, 7) = 7, max(4, 2) = 4, then min(7, 4) = 4
        assert_eq!(tree.optimal_point_advantage(root), 4);
        assert_eq!(tree[reply_a].point_advantage, 7);
        assert_eq!(tree[reply_b].point_advantage, 4);
        assert_eq!(tree[root].point_advantage, 4);
    }

    #[test]
    fn backward_pass_leaves_leaf_scores_alone() {
        let (mut tree, root) = root_with_scores(&[]);
        tree[root].point_advantage = -3;
        assert_eq!(tree.optimal_point_advantage(root), -3);
    }

    #[test]
    fn max_roots_picks_best_root_moves() {
        let mut tree = MoveTree::new();
        for score in [2, 9, 9, -4] {
            let root = tree.add_root(dummy_move(0));
            tree[root].point_advantage = score;
        }
        assert_eq!(scores_of(&tree, &tree.max_roots()), vec![9, 9]);
    }
}
