use crate::{board::Position, movegen::MoveGenerator, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`, walking
/// the tree with make/unmake on a single position.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let gen = MoveGenerator::global();
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    perft_inner(&gen, pos, depth, &mut layers[..])
}

/// Node count below each root move, in generation order.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let gen = MoveGenerator::global();
    let mut layers = vec![Vec::with_capacity(64); depth as usize - 1];
    gen.generate(pos, false)
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = perft_inner(&gen, pos, depth - 1, &mut layers[..]);
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect()
}

fn perft_inner(gen: &MoveGenerator, pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
    if depth == 0 {
        return 1;
    }
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };

    gen.generate_into(pos, false, buf);
    if depth == 1 {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in buf.iter().copied() {
        let undo = pos.make_move(mv);
        nodes += perft_inner(gen, pos, depth - 1, rest);
        pos.unmake_move(mv, undo);
    }
    nodes
}
