// Copyright (C) 2025 Andy Kurnia.

// The TileSet and Bag logic. A TileSet is a static prototype (letter
// scores and frequencies for one locale); a Bag is the per-game pool of
// tiles yet to be drawn.

use super::alphabet::BLANK;
use super::board::{Tile, RACK_SIZE};
use super::cache::FastHashMap;
use rand::prelude::*;

pub struct TileSet {
    pub tiles: Vec<Tile>,
    pub scores: FastHashMap<char, i32>,
    // The initial size of the bag, before tiles are drawn
    pub size: usize,
}

impl TileSet {
    fn new(scores: &[(char, i32)], counts: &[(char, u8)]) -> TileSet {
        let mut score_map = FastHashMap::default();
        for &(letter, score) in scores {
            score_map.insert(letter, score);
        }
        let mut tiles = Vec::new();
        for &(letter, count) in counts {
            let score = score_map.get(&letter).copied().unwrap_or(0);
            for _ in 0..count {
                tiles.push(Tile::new(letter, score));
            }
        }
        let size = tiles.len();
        TileSet {
            tiles,
            scores: score_map,
            size,
        }
    }

    #[inline(always)]
    pub fn contains(&self, letter: char) -> bool {
        self.scores.contains_key(&letter)
    }

    // The nominal score of a letter; unknown letters and '?' score 0.
    #[inline(always)]
    pub fn score(&self, letter: char) -> i32 {
        self.scores.get(&letter).copied().unwrap_or(0)
    }

    // The new standard Icelandic tile set, as defined by Skraflfélag
    // Íslands. 100 tiles.
    pub fn new_icelandic() -> TileSet {
        TileSet::new(
            &[
                ('a', 1),
                ('á', 3),
                ('b', 5),
                ('d', 5),
                ('ð', 2),
                ('e', 3),
                ('é', 7),
                ('f', 3),
                ('g', 3),
                ('h', 4),
                ('i', 1),
                ('í', 4),
                ('j', 6),
                ('k', 2),
                ('l', 2),
                ('m', 2),
                ('n', 1),
                ('o', 5),
                ('ó', 3),
                ('p', 5),
                ('r', 1),
                ('s', 1),
                ('t', 2),
                ('u', 2),
                ('ú', 4),
                ('v', 5),
                ('x', 10),
                ('y', 6),
                ('ý', 5),
                ('þ', 7),
                ('æ', 4),
                ('ö', 6),
                (BLANK, 0),
            ],
            &[
                ('a', 11),
                ('á', 2),
                ('b', 1),
                ('d', 1),
                ('ð', 4),
                ('e', 3),
                ('é', 1),
                ('f', 3),
                ('g', 3),
                ('h', 1),
                ('i', 7),
                ('í', 1),
                ('j', 1),
                ('k', 4),
                ('l', 5),
                ('m', 3),
                ('n', 7),
                ('o', 1),
                ('ó', 2),
                ('p', 1),
                ('r', 8),
                ('s', 7),
                ('t', 6),
                ('u', 6),
                ('ú', 1),
                ('v', 1),
                ('x', 1),
                ('y', 1),
                ('ý', 1),
                ('þ', 1),
                ('æ', 2),
                ('ö', 1),
                (BLANK, 2),
            ],
        )
    }

    // The classic English tile set. 98 tiles, no blanks.
    pub fn english() -> TileSet {
        TileSet::new(
            &[
                ('a', 1),
                ('b', 3),
                ('c', 3),
                ('d', 2),
                ('e', 1),
                ('f', 4),
                ('g', 2),
                ('h', 4),
                ('i', 1),
                ('j', 8),
                ('k', 5),
                ('l', 1),
                ('m', 3),
                ('n', 1),
                ('o', 1),
                ('p', 3),
                ('q', 10),
                ('r', 1),
                ('s', 1),
                ('t', 1),
                ('u', 1),
                ('v', 4),
                ('w', 4),
                ('x', 8),
                ('y', 4),
                ('z', 10),
                (BLANK, 0),
            ],
            &[
                ('a', 9),
                ('b', 2),
                ('c', 2),
                ('d', 4),
                ('e', 12),
                ('f', 2),
                ('g', 3),
                ('h', 2),
                ('i', 9),
                ('j', 1),
                ('k', 1),
                ('l', 4),
                ('m', 2),
                ('n', 6),
                ('o', 8),
                ('p', 2),
                ('q', 1),
                ('r', 6),
                ('s', 4),
                ('t', 6),
                ('u', 4),
                ('v', 2),
                ('w', 2),
                ('x', 1),
                ('y', 2),
                ('z', 1),
            ],
        )
    }

    // The Explo English tile set, used with the explo board.
    pub fn new_english() -> TileSet {
        TileSet::new(
            &[
                ('i', 1),
                ('o', 1),
                ('s', 1),
                ('a', 1),
                ('e', 1),
                ('t', 2),
                ('h', 2),
                ('y', 2),
                ('m', 2),
                ('u', 2),
                ('d', 2),
                ('n', 2),
                ('l', 2),
                ('r', 2),
                ('p', 2),
                ('k', 3),
                ('b', 3),
                ('g', 3),
                ('c', 3),
                ('f', 3),
                ('w', 4),
                ('x', 5),
                ('v', 5),
                ('j', 6),
                ('z', 6),
                ('q', 12),
                (BLANK, 0),
            ],
            &[
                ('e', 12),
                ('a', 11),
                ('s', 9),
                ('o', 7),
                ('i', 6),
                ('r', 6),
                ('n', 5),
                ('l', 5),
                ('t', 4),
                ('u', 4),
                ('d', 4),
                ('m', 3),
                ('g', 3),
                ('c', 3),
                ('h', 2),
                ('y', 2),
                ('p', 2),
                ('b', 2),
                ('k', 1),
                ('w', 1),
                ('f', 1),
                ('x', 1),
                ('v', 1),
                ('j', 1),
                ('z', 1),
                ('q', 1),
                (BLANK, 2),
            ],
        )
    }

    // The standard Polish tile set.
    pub fn polish() -> TileSet {
        TileSet::new(
            &[
                ('a', 1),
                ('ą', 5),
                ('b', 3),
                ('c', 2),
                ('ć', 6),
                ('d', 2),
                ('e', 1),
                ('ę', 5),
                ('f', 5),
                ('g', 3),
                ('h', 3),
                ('i', 1),
                ('j', 3),
                ('k', 3),
                ('l', 2),
                ('ł', 3),
                ('m', 2),
                ('n', 1),
                ('ń', 7),
                ('o', 1),
                ('ó', 5),
                ('p', 2),
                ('r', 1),
                ('s', 1),
                ('ś', 5),
                ('t', 2),
                ('u', 3),
                ('w', 1),
                ('y', 2),
                ('z', 1),
                ('ź', 9),
                ('ż', 5),
                (BLANK, 0),
            ],
            &[
                ('a', 9),
                ('ą', 1),
                ('b', 2),
                ('c', 3),
                ('ć', 1),
                ('d', 3),
                ('e', 7),
                ('ę', 1),
                ('f', 1),
                ('g', 2),
                ('h', 2),
                ('i', 8),
                ('j', 2),
                ('k', 3),
                ('l', 3),
                ('ł', 2),
                ('m', 3),
                ('n', 5),
                ('ń', 1),
                ('o', 6),
                ('ó', 1),
                ('p', 3),
                ('r', 4),
                ('s', 4),
                ('ś', 1),
                ('t', 3),
                ('u', 2),
                ('w', 4),
                ('y', 4),
                ('z', 5),
                ('ź', 1),
                ('ż', 1),
                (BLANK, 2),
            ],
        )
    }

    // The new Norwegian tile set designed by Taral Guldahl Seierstad,
    // used by permission.
    pub fn norwegian() -> TileSet {
        TileSet::new(
            &[
                ('a', 1),
                ('b', 3),
                ('c', 8),
                ('d', 2),
                ('e', 1),
                ('f', 4),
                ('g', 2),
                ('h', 3),
                ('i', 1),
                ('j', 5),
                ('k', 2),
                ('l', 1),
                ('m', 2),
                ('n', 1),
                ('o', 2),
                ('p', 3),
                ('r', 1),
                ('s', 1),
                ('t', 1),
                ('u', 3),
                ('v', 3),
                ('w', 10),
                ('y', 3),
                ('æ', 6),
                ('ø', 4),
                ('å', 3),
                (BLANK, 0),
            ],
            &[
                ('a', 11),
                ('b', 3),
                ('c', 1),
                ('d', 4),
                ('e', 12),
                ('f', 2),
                ('g', 3),
                ('h', 3),
                ('i', 5),
                ('j', 2),
                ('k', 4),
                ('l', 5),
                ('m', 2),
                ('n', 5),
                ('o', 4),
                ('p', 2),
                ('r', 6),
                ('s', 4),
                ('t', 5),
                ('u', 4),
                ('v', 3),
                ('w', 1),
                ('y', 2),
                ('æ', 1),
                ('ø', 2),
                ('å', 2),
                (BLANK, 2),
            ],
        )
    }
}

// A randomized pool of tiles, copied from a tile set at the start of a
// game.
pub struct Bag {
    contents: Vec<Tile>,
}

impl Bag {
    pub fn new(tile_set: &TileSet) -> Bag {
        Bag {
            contents: tile_set.tiles.clone(),
        }
    }

    #[inline(always)]
    pub fn tile_count(&self) -> usize {
        self.contents.len()
    }

    // Draws one random tile from the bag.
    pub fn draw_tile(&mut self, rng: &mut dyn RngCore) -> Option<Tile> {
        if self.contents.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..self.contents.len());
        Some(self.contents.swap_remove(i))
    }

    // Draws the specified tile from the bag, if present.
    pub fn draw_tile_by_letter(&mut self, letter: char) -> Option<Tile> {
        self.contents
            .iter()
            .position(|tile| tile.letter == letter)
            .map(|i| self.contents.swap_remove(i))
    }

    // Returns a previously drawn tile to the bag.
    pub fn return_tile(&mut self, tile: Tile) {
        self.contents.push(tile);
    }

    // Tile exchange requires at least a full rack's worth of tiles left.
    #[inline(always)]
    pub fn exchange_allowed(&self) -> bool {
        self.contents.len() >= RACK_SIZE
    }
}

impl std::fmt::Display for Bag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.contents.is_empty() {
            return write!(f, "Empty");
        }
        write!(f, "({} tiles): ", self.tile_count())?;
        for tile in &self.contents {
            write!(f, "{tile} ")?;
        }
        Ok(())
    }
}
