// Copyright (C) 2025 Andy Kurnia.

use super::cache::FastHashMap;
use super::error;

// A set of letters as a bit mask. Bit i stands for the i'th rune of the
// owning alphabet, so an alphabet can hold at most LetterSet::BITS runes.
pub type LetterSet = u64;

// The blank/wildcard rune. Never part of an alphabet.
pub const BLANK: char = '?';

// Alphabets as they are indexed in the compressed binary word graphs.
// Note that the Icelandic alphabet does not contain 'c', 'q', 'w' or 'z'.
pub const ICELANDIC_ALPHABET: &str = "aábdðeéfghiíjklmnoóprstuúvxyýþæö";
pub const ENGLISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
pub const POLISH_ALPHABET: &str = "aąbcćdeęfghijklłmnńoóprsśtuwyzźż";
pub const NORWEGIAN_ALPHABET: &str = "aäbcdefghijklmnoöpqrstuüvwxyzæøå";

// The ordered set of runes of one dictionary, with a precalculated
// rune-to-bit mapping supporting bit map (set) operations.
pub struct Alphabet {
    as_string: String,
    as_runes: Vec<char>,
    bit_map: FastHashMap<char, LetterSet>,
    all_set: LetterSet,
}

impl Alphabet {
    pub fn new(alphabet: &str) -> error::Returns<Alphabet> {
        let as_runes: Vec<char> = alphabet.chars().collect();
        if as_runes.len() > LetterSet::BITS as usize {
            return Err(error::invalid_input(
                "alphabet",
                "more runes than bits in a letter set",
            )
            .into());
        }
        let mut bit_map = FastHashMap::default();
        let mut all_set: LetterSet = 0;
        for (i, &r) in as_runes.iter().enumerate() {
            if r == BLANK {
                return Err(error::invalid_input("alphabet", "must not contain '?'").into());
            }
            if bit_map.insert(r, 1 << i).is_some() {
                return Err(error::invalid_input("alphabet", "duplicate rune").into());
            }
            all_set |= 1 << i;
        }
        Ok(Alphabet {
            as_string: alphabet.to_string(),
            as_runes,
            bit_map,
            all_set,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_runes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.as_runes.is_empty()
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.as_string
    }

    #[inline(always)]
    pub fn runes(&self) -> &[char] {
        &self.as_runes
    }

    #[inline(always)]
    pub fn rune_at(&self, idx: usize) -> Option<char> {
        self.as_runes.get(idx).copied()
    }

    #[inline(always)]
    pub fn all_set(&self) -> LetterSet {
        self.all_set
    }

    // Converts a list of runes to a bit map, with the extra twist that if
    // any of the runes is '?', a bit map with all bits set is returned.
    pub fn set_of(&self, runes: &[char]) -> LetterSet {
        let mut s: LetterSet = 0;
        for &r in runes {
            if r == BLANK {
                return self.all_set;
            }
            // Runes outside the alphabet contribute nothing.
            s |= self.bit_map.get(&r).copied().unwrap_or(0);
        }
        s
    }

    // Checks whether a rune is represented in a bit map. Runes outside
    // the alphabet are never members.
    #[inline(always)]
    pub fn member(&self, r: char, set: LetterSet) -> bool {
        (set & self.bit_map.get(&r).copied().unwrap_or(0)) != 0
    }
}
