// Copyright (C) 2025 Andy Kurnia.

// The various types of moves, their validation and their scoring.

use super::alphabet::BLANK;
use super::board::{Board, Coord, Direction, BOARD_SIZE, RACK_SIZE};
use super::cache::FastHashMap;
use super::game::{Game, GameState};
use std::cell::Cell;

// Extra points for laying down all seven rack tiles in one move.
pub const BINGO_BONUS: i32 = 50;

// The word of an illegal tile move.
pub const ILLEGAL_MOVE_WORD: &str = "[???]";

// The covering of a single square by a letter. The letter may be '?'
// for a blank tile, in which case meaning gives the letter it stands
// for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cover {
    pub letter: char,
    pub meaning: char,
}

pub type Covers = FastHashMap<Coord, Cover>;

// A normal tile move: one or more squares covered by tiles from the
// player's rack.
pub struct TileMove {
    pub top_left: Coord,
    pub bottom_right: Coord,
    pub covers: Covers,
    pub horizontal: bool,
    // The main word in reading order, with '?' preceding the meaning of
    // each blank for display. Strip the markers before dictionary work.
    pub word: String,
    // Number of on-board tiles preceding the first cover in the word
    pub prefix_len: usize,
    // When set, is_valid() checks all words formed by this move against
    // the dictionary. Robot-generated moves skip this: the generator
    // guarantees legality by construction.
    pub validate_words: bool,
    cached_score: Cell<Option<i32>>,
}

impl TileMove {
    pub fn new(board: &Board, covers: Covers, validate_words: bool) -> TileMove {
        let mut top = BOARD_SIZE as i8;
        let mut left = BOARD_SIZE as i8;
        let mut bottom = -1i8;
        let mut right = -1i8;
        for coord in covers.keys() {
            top = top.min(coord.row);
            left = left.min(coord.col);
            bottom = bottom.max(coord.row);
            right = right.max(coord.col);
        }
        let horizontal = if covers.len() >= 2 {
            top == bottom
        } else {
            // Single cover: pick the orientation with the longer cross,
            // horizontal on a tie
            let hcross = board.fragment(top, left, Direction::Left).len()
                + board.fragment(top, left, Direction::Right).len();
            let vcross = board.fragment(top, left, Direction::Above).len()
                + board.fragment(top, left, Direction::Below).len();
            hcross >= vcross
        };
        let mut mv = TileMove {
            top_left: Coord::new(top, left),
            bottom_right: Coord::new(bottom, right),
            covers,
            horizontal,
            word: String::new(),
            prefix_len: 0,
            validate_words,
            cached_score: Cell::new(None),
        };
        mv.collect_word(board);
        mv
    }

    // Collects the entire word being laid down: any on-board prefix, the
    // covering line from top left to bottom right, and any on-board
    // suffix.
    fn collect_word(&mut self, board: &Board) {
        let direction = Direction::forward(self.horizontal);
        let reverse = Direction::back(self.horizontal);
        let (top, left) = (self.top_left.row, self.top_left.col);
        if board.sq(top, left).is_none() {
            self.word = ILLEGAL_MOVE_WORD.to_string();
            return;
        }
        // Start with any prefix that is being extended
        let prefix = board.word_fragment(top, left, reverse);
        self.prefix_len = prefix.len();
        let mut word: String = prefix.into_iter().collect();
        let (row_incr, col_incr) = if self.horizontal { (0, 1) } else { (1, 0) };
        let (mut row, mut col) = (top, left);
        loop {
            if let Some(cover) = self.covers.get(&Coord::new(row, col)) {
                // This square is being covered by the move
                if cover.letter == BLANK {
                    word.push(BLANK);
                }
                word.push(cover.meaning);
            } else {
                // This square must hold a previously laid tile
                match board.tile_at(row, col) {
                    None => {
                        self.word = ILLEGAL_MOVE_WORD.to_string();
                        return;
                    }
                    Some(tile) => word.push(tile.meaning),
                }
            }
            if row == self.bottom_right.row && col == self.bottom_right.col {
                break;
            }
            row += row_incr;
            col += col_incr;
            if board.sq(row, col).is_none() {
                self.word = ILLEGAL_MOVE_WORD.to_string();
                return;
            }
        }
        // Add any suffix already on the board
        word.extend(board.word_fragment(self.bottom_right.row, self.bottom_right.col, direction));
        self.word = word;
    }

    // The main word without blank display markers, for dictionary work.
    pub fn stripped_word(&self) -> String {
        self.word.chars().filter(|&chr| chr != BLANK).collect()
    }

    pub fn is_valid(&self, game: &Game) -> bool {
        if self.covers.is_empty() || self.covers.len() > RACK_SIZE {
            return false;
        }
        let board = &game.board;
        // Count the tiles adjacent to the covers as we validate them
        let mut num_adjacent_tiles = 0;
        for coord in self.covers.keys() {
            if board.sq(coord.row, coord.col).is_none() {
                return false;
            }
            if board.tile_at(coord.row, coord.col).is_some() {
                // There is already a tile in this square
                return false;
            }
            num_adjacent_tiles += board.num_adjacent_tiles(coord.row, coord.col);
        }
        if self.bottom_right.row > self.top_left.row && self.bottom_right.col > self.top_left.col {
            // Not strictly horizontal or strictly vertical
            return false;
        }
        // Check for gaps along the axis
        if self.horizontal {
            let row = self.top_left.row;
            for col in self.top_left.col..=self.bottom_right.col {
                if !self.covers.contains_key(&Coord::new(row, col))
                    && board.tile_at(row, col).is_none()
                {
                    return false;
                }
            }
        } else {
            let col = self.top_left.col;
            for row in self.top_left.row..=self.bottom_right.row {
                if !self.covers.contains_key(&Coord::new(row, col))
                    && board.tile_at(row, col).is_none()
                {
                    return false;
                }
            }
        }
        if board.num_tiles == 0 {
            // The first tile move must go through the start square
            if !self.covers.contains_key(&board.start_square()) {
                return false;
            }
        } else {
            // At least one cover must touch a tile already on the board
            if num_adjacent_tiles == 0 {
                return false;
            }
        }
        if !self.validate_words {
            return true;
        }
        if self.word == ILLEGAL_MOVE_WORD || self.word.is_empty() {
            return false;
        }
        if !game.dawg.find(&self.stripped_word()) {
            return false;
        }
        // Check the cross words formed by each cover
        for (coord, cover) in &self.covers {
            let (left, right) = board.cross_words(coord.row, coord.col, !self.horizontal);
            if !left.is_empty() || !right.is_empty() {
                let mut cross: String = left.into_iter().collect();
                cross.push(cover.meaning);
                cross.extend(right);
                if !game.dawg.find(&cross) {
                    return false;
                }
            }
        }
        true
    }

    // The score of this move in the given game state: letter multipliers
    // on covers, word multipliers accumulated over covers, cross scores
    // counted once per cover with the square's word multiplier, and the
    // bingo bonus for a full rack. The result is computed once and
    // cached.
    pub fn score(&self, state: &GameState) -> i32 {
        if let Some(score) = self.cached_score.get() {
            return score;
        }
        let board = state.board;
        let mut score = 0;
        let mut cross_score = 0;
        let mut multiplier = 1;
        let (row_incr, col_incr) = if self.horizontal { (0, 1) } else { (1, 0) };
        // Tiles before the top left
        for tile in board.fragment(
            self.top_left.row,
            self.top_left.col,
            Direction::back(self.horizontal),
        ) {
            score += tile.score;
        }
        // Progress from the top left to the bottom right
        let (mut row, mut col) = (self.top_left.row, self.top_left.col);
        loop {
            let Some(sq) = board.sq(row, col) else {
                break;
            };
            if let Some(cover) = self.covers.get(&Coord::new(row, col)) {
                // Covered by the move: apply letter and word multipliers
                let this_score = state.tile_set.score(cover.letter) * sq.letter_multiplier;
                score += this_score;
                multiplier *= sq.word_multiplier;
                let (has_crossing, cross_sum) = board.cross_score(row, col, !self.horizontal);
                if has_crossing {
                    cross_score += (cross_sum + this_score) * sq.word_multiplier;
                }
            } else if let Some(tile) = &sq.tile {
                // Already covered: letter score only
                score += tile.score;
            }
            if row >= self.bottom_right.row && col >= self.bottom_right.col {
                break;
            }
            row += row_incr;
            col += col_incr;
        }
        // Tiles beyond the bottom right
        for tile in board.fragment(
            self.bottom_right.row,
            self.bottom_right.col,
            Direction::forward(self.horizontal),
        ) {
            score += tile.score;
        }
        let mut total = score * multiplier + cross_score;
        if self.covers.len() == RACK_SIZE {
            total += BINGO_BONUS;
        }
        self.cached_score.set(Some(total));
        total
    }
}

impl std::fmt::Display for TileMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.top_left.label(self.horizontal), self.word)
    }
}

// A move that exchanges 1-7 rack tiles with the bag. Only valid while
// at least a rack's worth of tiles remains in the bag.
pub struct ExchangeMove {
    pub letters: String,
}

impl ExchangeMove {
    pub fn new(letters: &str) -> ExchangeMove {
        ExchangeMove {
            letters: letters.to_string(),
        }
    }

    pub fn is_valid(&self, game: &Game) -> bool {
        if !game.bag.exchange_allowed() {
            // Too few tiles left in the bag
            return false;
        }
        let runes: Vec<char> = self.letters.chars().collect();
        if runes.is_empty() || runes.len() > RACK_SIZE {
            return false;
        }
        let mut rack = game.racks[game.player_to_move()].as_runes();
        for letter in runes {
            match rack.iter().position(|&r| r == letter) {
                None => return false,
                Some(pos) => {
                    rack.remove(pos);
                }
            }
        }
        true
    }
}

// The final adjustments made to player scores at the end of a game.
pub struct FinalMove {
    pub opponent_rack: String,
    pub multiply_factor: i32,
}

impl FinalMove {
    pub fn new(opponent_rack: &str, multiply_factor: i32) -> FinalMove {
        FinalMove {
            opponent_rack: opponent_rack.to_string(),
            multiply_factor,
        }
    }

    pub fn score(&self, state: &GameState) -> i32 {
        self.opponent_rack
            .chars()
            .map(|letter| state.tile_set.score(letter))
            .sum::<i32>()
            * self.multiply_factor
    }
}

// All move types as one tagged union.
pub enum Move {
    Tile(TileMove),
    Pass,
    Exchange(ExchangeMove),
    Final(FinalMove),
}

impl Move {
    pub fn is_valid(&self, game: &Game) -> bool {
        match self {
            Move::Tile(mv) => mv.is_valid(game),
            Move::Pass => true,
            Move::Exchange(mv) => mv.is_valid(game),
            Move::Final(_) => true,
        }
    }

    pub fn score(&self, state: &GameState) -> i32 {
        match self {
            Move::Tile(mv) => mv.score(state),
            Move::Pass | Move::Exchange(_) => 0,
            Move::Final(mv) => mv.score(state),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Tile(mv) => mv.fmt(f),
            Move::Pass => write!(f, "Pass"),
            Move::Exchange(mv) => write!(f, "Exch {}", mv.letters),
            Move::Final(mv) => write!(f, "Rack {}", mv.opponent_rack),
        }
    }
}
