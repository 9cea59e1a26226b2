use anchor_lang::prelude::*;
use solana_program::keccak::hashv;

/// Leaf of the participants tree: keccak256(wallet || weight_le).
pub fn participant_leaf(wallet: &Pubkey, weight: u64) -> [u8; 32] {
    hashv(&[wallet.as_ref(), &weight.to_le_bytes()]).0
}

/// Leaf of the winners tree: keccak256(wallet || prize_tier || slot_index).
pub fn winner_leaf(wallet: &Pubkey, prize_tier: u8, slot_index: u8) -> [u8; 32] {
    hashv(&[wallet.as_ref(), &[prize_tier], &[slot_index]]).0
}

/// Compute hash of two sibling nodes.
/// The pair is sorted first so proofs carry no left/right flags.
pub fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    if left <= right {
        hashv(&[left, right]).0
    } else {
        hashv(&[right, left]).0
    }
}

/// Folds `proof` into `leaf` with [`hash_pair`] and compares the result
/// against `root`.
pub fn verify_proof(leaf: [u8; 32], proof: &[[u8; 32]], root: &[u8; 32]) -> bool {
    let mut current = leaf;

    for sibling in proof.iter() {
        current = hash_pair(&current, sibling);
    }

    current == *root
}

fn next_level(level: &[[u8; 32]]) -> Vec<[u8; 32]> {
    level
        .chunks(2)
        // odd node is promoted unchanged
        .map(|pair| pair.get(1).map_or(pair[0], |right| hash_pair(&pair[0], right)))
        .collect()
}

/// Root over `leaves` in the given order. An empty tree has the zero root.
pub fn merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    if leaves.is_empty() {
        return [0u8; 32];
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }
    level[0]
}

/// Sibling path for the leaf at `index`, or `None` if out of range.
pub fn build_proof(leaves: &[[u8; 32]], index: usize) -> Option<Vec<[u8; 32]>> {
    if index >= leaves.len() {
        return None;
    }

    let mut proof = Vec::new();
    let mut level = leaves.to_vec();
    let mut position = index;
    while level.len() > 1 {
        let sibling = position ^ 1;
        if sibling < level.len() {
            proof.push(level[sibling]);
        }
        level = next_level(&level);
        position /= 2;
    }
    Some(proof)
}
