//! Search tree stored as an index arena.
//!
//! Nodes refer to their parent and children by index into one `Vec`, so the
//! tree has no reference cycles and is dropped in one go. Moving the root
//! forward copies the kept subtree into a fresh arena.

use chess_core::{Move, MoveGenerator, Position};

pub type NodeId = usize;

/// Index of the root in every tree.
pub const ROOT: NodeId = 0;

/// Added to playout counts so unvisited children have a finite, very large
/// UCB value instead of dividing by zero.
const EPSILON: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct Node {
    pub position: Position,
    /// Move that produced this node from its parent; `None` at the root
    pub mv: Option<Move>,
    /// Sum of playout results, each from the point of view of the side that
    /// played `mv` (1 win, 0.5 draw, 0 loss)
    pub score: f64,
    pub playouts: u32,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(position: Position, mv: Option<Move>, parent: Option<NodeId>) -> Self {
        Self {
            position,
            mv,
            score: 0.0,
            playouts: 0,
            children: Vec::new(),
            parent,
        }
    }

    /// Average result so far, or 0 before the first playout.
    pub fn win_rate(&self) -> f64 {
        if self.playouts == 0 {
            0.0
        } else {
            self.score / self.playouts as f64
        }
    }
}

/// Visit statistics of one root child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub score: f64,
    pub playouts: u32,
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(position: Position) -> Self {
        Self {
            nodes: vec![Node::new(position, None, None)],
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// UCB1 of `child` under a parent with `parent_playouts` visits.
    pub fn ucb1(child: &Node, parent_playouts: u32, exploration: f64) -> f64 {
        let n = child.playouts as f64 + EPSILON;
        let parent = (parent_playouts.max(1) as f64).ln();
        child.score / n + (exploration * parent / n).sqrt()
    }

    /// Walks from the root to a leaf, always taking the child with the
    /// highest UCB1. Ties go to the earliest child.
    pub fn select(&self, exploration: f64) -> NodeId {
        let mut id = ROOT;
        loop {
            let node = &self.nodes[id];
            let mut best: Option<(NodeId, f64)> = None;
            for &child in &node.children {
                let value = Self::ucb1(&self.nodes[child], node.playouts, exploration);
                if best.map_or(true, |(_, v)| value > v) {
                    best = Some((child, value));
                }
            }
            match best {
                Some((child, _)) => id = child,
                None => return id,
            }
        }
    }

    /// Adds one child per legal move of `id`. Returns false, adding nothing,
    /// if the node already has children or its position is terminal.
    pub fn expand(&mut self, id: NodeId, gen: &MoveGenerator) -> bool {
        if !self.nodes[id].children.is_empty() {
            return false;
        }
        let moves = gen.generate(&self.nodes[id].position, false);
        if moves.is_empty() {
            return false;
        }

        let first = self.nodes.len();
        for mv in moves {
            let mut position = self.nodes[id].position.clone();
            position.apply_move(mv);
            self.nodes.push(Node::new(position, Some(mv), Some(id)));
        }
        self.nodes[id].children = (first..self.nodes.len()).collect();
        true
    }

    /// Credits `result` to `id` and every ancestor, flipping it to the
    /// other side's point of view at each step up.
    pub fn backpropagate(&mut self, id: NodeId, result: f64) {
        let mut current = Some(id);
        let mut result = result;
        while let Some(i) = current {
            let node = &mut self.nodes[i];
            node.score += result;
            node.playouts += 1;
            result = 1.0 - result;
            current = node.parent;
        }
    }

    /// Root child with the most playouts.
    pub fn best_child(&self) -> Option<&Node> {
        self.root()
            .children
            .iter()
            .map(|&c| &self.nodes[c])
            .fold(None, |best: Option<&Node>, node| match best {
                Some(b) if b.playouts >= node.playouts => Some(b),
                _ => Some(node),
            })
    }

    pub fn child_stats(&self) -> Vec<ChildStats> {
        self.root()
            .children
            .iter()
            .filter_map(|&c| {
                let node = &self.nodes[c];
                node.mv.map(|mv| ChildStats {
                    mv,
                    score: node.score,
                    playouts: node.playouts,
                })
            })
            .collect()
    }

    /// The subtree under the root child reached by `mv`, copied into a new
    /// arena with that child as root. `None` if the root was never expanded
    /// with that move.
    pub fn reroot(&self, mv: Move) -> Option<Tree> {
        let new_root = self
            .root()
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].mv == Some(mv))?;

        let mut nodes = Vec::new();
        // (old id, new parent id)
        let mut queue = std::collections::VecDeque::from([(new_root, None)]);
        while let Some((old, parent)) = queue.pop_front() {
            let new_id = nodes.len();
            let source = &self.nodes[old];
            nodes.push(Node {
                position: source.position.clone(),
                mv: if parent.is_none() { None } else { source.mv },
                score: source.score,
                playouts: source.playouts,
                children: Vec::with_capacity(source.children.len()),
                parent,
            });
            if let Some(p) = parent {
                nodes[p].children.push(new_id);
            }
            queue.extend(source.children.iter().map(|&c| (c, Some(new_id))));
        }
        Some(Tree { nodes })
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
