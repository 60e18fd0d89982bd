//! Magic bitboards for sliding-piece attacks.
//!
//! Each square gets a `(mask, magic, shift, offset)` record; the occupancy
//! restricted to `mask` is multiplied by `magic` and shifted down to index a
//! slice of one shared attack table. The magic multipliers are found once at
//! first use by a seeded random search, so the tables are identical on every
//! run and platform.

use once_cell::sync::Lazy;
use rand::prelude::*;

/// Per-square magic record indexing the shared attack table.
struct Magic {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

struct SlidingTables {
    rook: [Magic; 64],
    bishop: [Magic; 64],
    attacks: Vec<u64>,
}

/// Fixed seed for the magic search; changing it changes nothing observable.
const MAGIC_SEED: u64 = 0x0F1E_2D3C_4B5A_6978;

static SLIDING: Lazy<SlidingTables> = Lazy::new(build_sliding_tables);

#[inline]
pub(crate) fn rook_attacks(square: usize, occupied: u64) -> u64 {
    lookup(&SLIDING.rook[square], occupied)
}

#[inline]
pub(crate) fn bishop_attacks(square: usize, occupied: u64) -> u64 {
    lookup(&SLIDING.bishop[square], occupied)
}

#[inline]
pub(crate) fn queen_attacks(square: usize, occupied: u64) -> u64 {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}

#[inline]
fn lookup(entry: &Magic, occupied: u64) -> u64 {
    let index = ((occupied & entry.mask).wrapping_mul(entry.magic) >> entry.shift) as usize;
    SLIDING.attacks[entry.offset + index]
}

const ROOK_DELTAS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DELTAS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Ray-scan reference attacks, including the first blocker in each ray.
pub(super) fn sliding_attacks_slow(square: usize, occupied: u64, deltas: &[(isize, isize)]) -> u64 {
    let mut attacks = 0u64;
    for &(dr, df) in deltas {
        let mut r = (square / 8) as isize + dr;
        let mut f = (square % 8) as isize + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupied & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// The occupancy-relevant mask: the rays without their board-edge endpoints.
fn relevant_mask(square: usize, deltas: &[(isize, isize)]) -> u64 {
    let mut mask = 0u64;
    for &(dr, df) in deltas {
        let mut r = (square / 8) as isize + dr;
        let mut f = (square % 8) as isize + df;
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

fn build_sliding_tables() -> SlidingTables {
    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);
    let mut attacks = Vec::new();
    let rook = std::array::from_fn(|sq| find_magic(sq, &ROOK_DELTAS, &mut attacks, &mut rng));
    let bishop = std::array::from_fn(|sq| find_magic(sq, &BISHOP_DELTAS, &mut attacks, &mut rng));
    attacks.shrink_to_fit();
    SlidingTables {
        rook,
        bishop,
        attacks,
    }
}

/// Find a collision-free magic for one square and append its attack slice
/// to the shared table.
fn find_magic(
    square: usize,
    deltas: &[(isize, isize)],
    table: &mut Vec<u64>,
    rng: &mut StdRng,
) -> Magic {
    let mask = relevant_mask(square, deltas);
    let bits = mask.count_ones();
    let size = 1usize << bits;
    let shift = 64 - bits;

    // Enumerate every subset of the mask (carry-rippler) with its attacks.
    let mut occupancies = Vec::with_capacity(size);
    let mut reference = Vec::with_capacity(size);
    let mut subset = 0u64;
    loop {
        occupancies.push(subset);
        reference.push(sliding_attacks_slow(square, subset, deltas));
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }

    // Epoch-stamped scratch table: no clearing between candidates.
    let mut scratch = vec![0u64; size];
    let mut epoch = vec![0u32; size];
    let mut attempt = 0u32;

    let magic = loop {
        // Sparse candidates collide far less often.
        let candidate = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.wrapping_mul(candidate) >> 56).count_ones() < 6 {
            continue;
        }
        attempt += 1;
        let mut ok = true;
        for i in 0..size {
            let index = (occupancies[i].wrapping_mul(candidate) >> shift) as usize;
            if epoch[index] != attempt {
                epoch[index] = attempt;
                scratch[index] = reference[i];
            } else if scratch[index] != reference[i] {
                ok = false;
                break;
            }
        }
        if ok {
            break candidate;
        }
    };

    let offset = table.len();
    table.resize(offset + size, 0);
    for i in 0..size {
        let index = (occupancies[i].wrapping_mul(magic) >> shift) as usize;
        table[offset + index] = reference[i];
    }

    Magic {
        mask,
        magic,
        shift,
        offset,
    }
}
