use crate::types::Square;
use std::sync::OnceLock;

pub type Bitboard = u64;

pub fn get_bit(bitboard: Bitboard, square: u8) -> bool {
    (bitboard & (1u64 << square)) != 0
}

pub fn count_bits(bitboard: Bitboard) -> u32 {
    bitboard.count_ones()
}

// Pop LSB (remove and return the least significant bit)
pub fn pop_lsb(bitboard: &mut Bitboard) -> Option<u8> {
    if *bitboard == 0 {
        None
    } else {
        let lsb = bitboard.trailing_zeros() as u8;
        *bitboard &= *bitboard - 1;
        Some(lsb)
    }
}

// Iterator for set bits, lowest square first
pub struct BitboardIterator {
    bitboard: Bitboard,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        pop_lsb(&mut self.bitboard).map(Square)
    }
}

pub fn iterate_bits(bitboard: Bitboard) -> BitboardIterator {
    BitboardIterator { bitboard }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];
const KING_OFFSETS: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

static KNIGHT_ATTACKS: OnceLock<[Bitboard; 64]> = OnceLock::new();
static KING_ATTACKS: OnceLock<[Bitboard; 64]> = OnceLock::new();

fn generate_attack_mask(square: u8, offsets: &[(i8, i8)]) -> Bitboard {
    let origin = Square(square);
    offsets
        .iter()
        .filter_map(|&(df, dr)| origin.offset(df, dr))
        .fold(0u64, |attacks, target| attacks | (1u64 << target.0))
}

fn build_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    for (square, mask) in table.iter_mut().enumerate() {
        *mask = generate_attack_mask(square as u8, offsets);
    }
    table
}

pub fn get_knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS.get_or_init(|| build_table(&KNIGHT_OFFSETS))[square.0 as usize]
}

pub fn get_king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS.get_or_init(|| build_table(&KING_OFFSETS))[square.0 as usize]
}
