// Copyright (C) 2025 Andy Kurnia.

use super::alphabet::{Alphabet, LetterSet, BLANK};
use super::bag::{Bag, TileSet};
use super::board::{Square, Tile, RACK_SIZE};
use super::cache::FastHashMap;
use super::error;
use rand::prelude::*;

// A player's rack of tiles: seven slots plus a letter multiset, with
// blank tiles keyed by '?'.
pub struct Rack {
    pub slots: [Square; RACK_SIZE],
    pub letters: FastHashMap<char, u8>,
}

impl Default for Rack {
    fn default() -> Rack {
        Rack::new()
    }
}

impl Rack {
    pub fn new() -> Rack {
        Rack {
            slots: std::array::from_fn(|i| Square::rack_slot(i as i8)),
            letters: FastHashMap::default(),
        }
    }

    // A rack containing the given letters, with '?' denoting the blank
    // tile. Letters must exist in the tile set.
    pub fn from_letters(letters: &[char], tile_set: &TileSet) -> error::Returns<Rack> {
        if letters.len() > RACK_SIZE {
            return Err(error::invalid_input("rack", "too many letters").into());
        }
        let mut rack = Rack::new();
        for (slot, &letter) in letters.iter().enumerate() {
            if !tile_set.contains(letter) {
                return Err(error::invalid_input("rack", "letter not in tile set").into());
            }
            rack.slots[slot].tile = Some(Tile::new(letter, tile_set.score(letter)));
            *rack.letters.entry(letter).or_insert(0) += 1;
        }
        Ok(rack)
    }

    // Draws tiles from the bag to fill all empty slots. Returns false if
    // the bag runs dry first.
    pub fn fill(&mut self, bag: &mut Bag, rng: &mut dyn RngCore) -> bool {
        for slot in self.slots.iter_mut() {
            if slot.tile.is_none() {
                match bag.draw_tile(rng) {
                    None => return false,
                    Some(tile) => {
                        *self.letters.entry(tile.letter).or_insert(0) += 1;
                        slot.tile = Some(tile);
                    }
                }
            }
        }
        true
    }

    // Draws the given letters from the bag to fill empty slots, as far
    // as possible. Returns false if a requested tile is not in the bag.
    pub fn fill_by_letters(&mut self, bag: &mut Bag, letters: &[char]) -> bool {
        let mut letters = letters.iter();
        for slot in self.slots.iter_mut() {
            if slot.tile.is_none() {
                match letters.next() {
                    None => break,
                    Some(&letter) => match bag.draw_tile_by_letter(letter) {
                        None => return false,
                        Some(tile) => {
                            *self.letters.entry(tile.letter).or_insert(0) += 1;
                            slot.tile = Some(tile);
                        }
                    },
                }
            }
        }
        true
    }

    // The tiles in the rack as a list of runes.
    pub fn as_runes(&self) -> Vec<char> {
        self.slots
            .iter()
            .filter_map(|slot| slot.tile.as_ref().map(|tile| tile.letter))
            .collect()
    }

    pub fn as_string(&self) -> String {
        self.as_runes().into_iter().collect()
    }

    // The rack as a bit-mapped set of runes; all bits are set when the
    // rack holds a blank.
    pub fn as_set(&self, alphabet: &Alphabet) -> LetterSet {
        alphabet.set_of(&self.as_runes())
    }

    pub fn num_tiles(&self) -> usize {
        self.slots.iter().filter(|slot| slot.tile.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.tile.is_none())
    }

    pub fn has_letter(&self, letter: char) -> bool {
        self.letters.get(&letter).copied().unwrap_or(0) > 0
    }

    // Finds a tile with the given letter (or '?') without removing it.
    pub fn find_tile(&self, letter: char) -> Option<Tile> {
        self.slots
            .iter()
            .find_map(|slot| slot.tile.filter(|tile| tile.letter == letter))
    }

    // Removes and returns a tile with the given letter (or '?').
    pub fn remove_letter(&mut self, letter: char) -> Option<Tile> {
        for slot in self.slots.iter_mut() {
            if slot.tile.is_some_and(|tile| tile.letter == letter) {
                let tile = slot.tile.take();
                if let Some(count) = self.letters.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
                return tile;
            }
        }
        None
    }

    // Returns all tiles in the rack to the bag.
    pub fn return_to_bag(&mut self, bag: &mut Bag) {
        for slot in self.slots.iter_mut() {
            if let Some(mut tile) = slot.tile.take() {
                if let Some(count) = self.letters.get_mut(&tile.letter) {
                    *count = count.saturating_sub(1);
                }
                // Reset any assigned blank meaning before bagging
                if tile.letter == BLANK {
                    tile.meaning = BLANK;
                }
                bag.return_tile(tile);
            }
        }
    }

    // Copies the first num_tiles tiles out of the rack, assigning the
    // given meaning to blanks. Useful for tests.
    pub fn extract(&self, num_tiles: usize, meaning: char) -> Vec<Tile> {
        let mut extracted = Vec::with_capacity(num_tiles);
        for slot in self.slots.iter() {
            if extracted.len() >= num_tiles {
                break;
            }
            if let Some(mut tile) = slot.tile {
                if tile.letter == BLANK {
                    tile.meaning = meaning;
                }
                extracted.push(tile);
            }
        }
        extracted
    }

    // The sum of the nominal scores of the tiles in the rack.
    pub fn score(&self) -> i32 {
        self.slots
            .iter()
            .filter_map(|slot| slot.tile.as_ref().map(|tile| tile.score))
            .sum()
    }
}

impl std::fmt::Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for slot in &self.slots {
            write!(f, "{slot} ")?;
        }
        Ok(())
    }
}
