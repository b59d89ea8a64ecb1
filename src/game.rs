// Copyright (C) 2025 Andy Kurnia.

// The Game container: a board, two racks, a bag and a move list, plus
// the GameState snapshot consumed by the move generator.

use super::alphabet::BLANK;
use super::bag::{Bag, TileSet};
use super::board::{Board, BoardType, Coord, Tile, BOARD_SIZE, RACK_SIZE};
use super::dawg::Dawg;
use super::moves::{Cover, Covers, FinalMove, Move, TileMove};
use super::rack::Rack;
use rand::prelude::*;

// An entry in the move list: the player's rack as it was before the
// move, and the move itself.
pub struct MoveItem {
    pub rack_before: String,
    pub mv: Move,
}

// The number of consecutive zero-point moves that ends a game.
const MAX_ZERO_POINT_MOVES: u32 = 6;

pub struct Game<'a> {
    pub player_names: [String; 2],
    pub scores: [i32; 2],
    pub board: Board,
    pub racks: [Rack; 2],
    pub bag: Bag,
    pub move_list: Vec<MoveItem>,
    pub dawg: &'a Dawg,
    pub tile_set: &'a TileSet,
    // Consecutive non-tile, zero-point moves so far
    pub num_pass_moves: u32,
    // Whether tile moves entered via make_tile_move are checked against
    // the dictionary
    pub validate_words: bool,
}

// The bare minimum of information a robot player needs to decide on a
// move. The generator reads this snapshot and nothing else.
pub struct GameState<'a> {
    pub dawg: &'a Dawg,
    pub tile_set: &'a TileSet,
    pub board: &'a Board,
    // The rack of the player whose move it is
    pub rack: &'a Rack,
    // With fewer than RACK_SIZE tiles in the bag, exchanging is not
    // allowed
    pub(crate) exchange_forbidden: bool,
}

impl<'a> GameState<'a> {
    // A free-standing snapshot, for callers that assemble board and
    // rack without a full Game.
    pub fn new(
        dawg: &'a Dawg,
        tile_set: &'a TileSet,
        board: &'a Board,
        rack: &'a Rack,
        exchange_forbidden: bool,
    ) -> GameState<'a> {
        GameState {
            dawg,
            tile_set,
            board,
            rack,
            exchange_forbidden,
        }
    }
}

impl<'a> Game<'a> {
    // A new game with a fresh bag copied from the tile set, racks drawn
    // from the bag.
    pub fn new(
        dawg: &'a Dawg,
        tile_set: &'a TileSet,
        board_type: BoardType,
        rng: &mut dyn RngCore,
    ) -> Game<'a> {
        let mut game = Game {
            player_names: [String::new(), String::new()],
            scores: [0, 0],
            board: Board::new(board_type),
            racks: [Rack::new(), Rack::new()],
            bag: Bag::new(tile_set),
            move_list: Vec::with_capacity(30),
            dawg,
            tile_set,
            num_pass_moves: 0,
            validate_words: true,
        };
        game.racks[0].fill(&mut game.bag, rng);
        game.racks[1].fill(&mut game.bag, rng);
        game
    }

    pub fn set_player_names(&mut self, player0: &str, player1: &str) {
        self.player_names[0] = player0.to_string();
        self.player_names[1] = player1.to_string();
    }

    // 0 or 1 depending on which player's move it is.
    #[inline(always)]
    pub fn player_to_move(&self) -> usize {
        self.move_list.len() % 2
    }

    pub fn tiles_on_board(&self) -> u16 {
        self.board.num_tiles
    }

    pub fn tile_at(&self, row: i8, col: i8) -> Option<&Tile> {
        self.board.tile_at(row, col)
    }

    // The state snapshot the robot player decides from.
    pub fn state(&self) -> GameState<'_> {
        GameState {
            dawg: self.dawg,
            tile_set: self.tile_set,
            board: &self.board,
            rack: &self.racks[self.player_to_move()],
            exchange_forbidden: !self.bag.exchange_allowed(),
        }
    }

    // Moves a tile from the player's rack to the board.
    pub fn play_tile(&mut self, tile: Tile, row: i8, col: i8) -> bool {
        if self.board.tile_at(row, col).is_some() || self.board.sq(row, col).is_none() {
            return false;
        }
        if tile.letter == BLANK && tile.meaning == BLANK {
            // A blank must have an assigned meaning when played
            log::warn!("internal invariant: blank played without a meaning");
            return false;
        }
        let player_to_move = self.player_to_move();
        let Some(mut played) = self.racks[player_to_move].remove_letter(tile.letter) else {
            // This tile isn't in the rack
            return false;
        };
        if tile.letter == BLANK {
            played.meaning = tile.meaning;
        } else {
            played.meaning = played.letter;
        }
        played.played_by = player_to_move as u8;
        self.board.place_tile(row, col, played)
    }

    // Empties the given player's rack into the bag and redraws the
    // requested letters. For reproducible tests and replays.
    pub fn force_rack(&mut self, player: usize, letters: &str) -> bool {
        let letters: Vec<char> = letters.chars().collect();
        self.racks[player].return_to_bag(&mut self.bag);
        self.racks[player].fill_by_letters(&mut self.bag, &letters)
    }

    // Creates a tile move starting at the given square in the given
    // direction, laying down the given tiles while skipping over
    // occupied squares, and applies it.
    pub fn make_tile_move(
        &mut self,
        row: i8,
        col: i8,
        horizontal: bool,
        tiles: &[Tile],
        rng: &mut dyn RngCore,
    ) -> bool {
        if row < 0
            || row >= BOARD_SIZE as i8
            || col < 0
            || col >= BOARD_SIZE as i8
            || tiles.is_empty()
            || tiles.len() > RACK_SIZE
        {
            return false;
        }
        // The played tiles must be in the player's rack
        {
            let rack = &self.racks[self.player_to_move()];
            let mut rack_runes = rack.as_runes();
            for tile in tiles {
                match rack_runes.iter().position(|&r| r == tile.letter) {
                    None => return false,
                    Some(pos) => {
                        rack_runes.remove(pos);
                    }
                }
            }
        }
        // A tile move must start at an empty square
        if self.tile_at(row, col).is_some() {
            return false;
        }
        let (row_incr, col_incr) = if horizontal { (0, 1) } else { (1, 0) };
        let (mut row, mut col) = (row, col);
        let mut covers = Covers::default();
        for tile in tiles {
            if row >= BOARD_SIZE as i8 || col >= BOARD_SIZE as i8 {
                // Gone off the board
                return false;
            }
            while self.tile_at(row, col).is_some() {
                // Occupied square: try the next one
                row += row_incr;
                col += col_incr;
                if row >= BOARD_SIZE as i8 || col >= BOARD_SIZE as i8 {
                    return false;
                }
            }
            covers.insert(Coord::new(row, col), Cover {
                letter: tile.letter,
                meaning: tile.meaning,
            });
            row += row_incr;
            col += col_incr;
        }
        let mv = TileMove::new(&self.board, covers, self.validate_words);
        self.apply(Move::Tile(mv), rng)
    }

    pub fn make_pass_move(&mut self, rng: &mut dyn RngCore) -> bool {
        self.apply(Move::Pass, rng)
    }

    // Applies a move to the game, after validating it.
    pub fn apply(&mut self, mv: Move, rng: &mut dyn RngCore) -> bool {
        if !mv.is_valid(self) {
            return false;
        }
        self.apply_valid(mv, rng)
    }

    // Applies an already validated move, appends it to the move list,
    // replenishes the player's rack and updates scores.
    pub fn apply_valid(&mut self, mv: Move, rng: &mut dyn RngCore) -> bool {
        self.raw_apply(mv, None, rng)
    }

    fn raw_apply(&mut self, mv: Move, force_draw: Option<&[char]>, rng: &mut dyn RngCore) -> bool {
        // Careful to read player_to_move() before appending to the move
        // list (that reverses the players)
        let player_to_move = self.player_to_move();
        let rack_before = self.racks[player_to_move].as_string();
        if !self.apply_effects(&mv, rng) {
            log::warn!("internal invariant: valid move failed to apply");
            return false;
        }
        self.accept_move(rack_before, mv);
        // Replenish the player's rack as needed
        match force_draw {
            None => {
                self.racks[player_to_move].fill(&mut self.bag, rng);
            }
            Some(letters) => {
                if !self.racks[player_to_move].fill_by_letters(&mut self.bag, letters) {
                    log::warn!("internal invariant: forced draw not satisfiable");
                    return false;
                }
            }
        }
        if self.is_over() {
            // The game is now over: add the final adjustment moves
            let rack_this = self.racks[player_to_move].as_string();
            let rack_opp = self.racks[1 - player_to_move].as_string();
            // When the game does not end by the final player emptying
            // the rack, both players are adjusted by the opponent's
            // remaining tile scores
            let multiply_factor = if rack_this.is_empty() { 2 } else { 1 };
            let final_opp = Move::Final(FinalMove::new(&rack_this, multiply_factor));
            self.accept_move(rack_opp.clone(), final_opp);
            let final_this = Move::Final(FinalMove::new(&rack_opp, multiply_factor));
            self.accept_move(rack_this, final_this);
        }
        true
    }

    // Mutates the board, racks and bag according to the move.
    fn apply_effects(&mut self, mv: &Move, rng: &mut dyn RngCore) -> bool {
        match mv {
            Move::Tile(mv) => {
                for (coord, cover) in &mv.covers {
                    let Some(tile) = self.racks[self.player_to_move()].find_tile(cover.letter)
                    else {
                        return false;
                    };
                    let tile = Tile {
                        meaning: cover.meaning,
                        ..tile
                    };
                    if !self.play_tile(tile, coord.row, coord.col) {
                        // Not good: the move may have been partially
                        // applied
                        return false;
                    }
                }
                // A tile move resets the zero-point move counter
                self.num_pass_moves = 0;
                true
            }
            Move::Pass => {
                self.num_pass_moves += 1;
                true
            }
            Move::Exchange(mv) => {
                let player = self.player_to_move();
                let mut tiles = Vec::with_capacity(RACK_SIZE);
                for letter in mv.letters.chars() {
                    match self.racks[player].remove_letter(letter) {
                        None => return false,
                        Some(tile) => tiles.push(tile),
                    }
                }
                // Note: the exchanged tiles only return to the bag after
                // the redraw, so they cannot be drawn right back
                self.racks[player].fill(&mut self.bag, rng);
                for tile in tiles {
                    self.bag.return_tile(tile);
                }
                self.num_pass_moves += 1;
                true
            }
            Move::Final(_) => true,
        }
    }

    // Updates the score and appends the move to the move list.
    fn accept_move(&mut self, rack_before: String, mv: Move) {
        let score = mv.score(&self.state());
        self.scores[self.player_to_move()] += score;
        self.move_list.push(MoveItem { rack_before, mv });
    }

    // True if the game is over after the last move played.
    pub fn is_over(&self) -> bool {
        if self.move_list.is_empty() {
            return false;
        }
        if self.num_pass_moves >= MAX_ZERO_POINT_MOVES {
            // E.g. three rounds of passes finish the game
            return true;
        }
        let last_player = 1 - (self.move_list.len() % 2);
        self.racks[last_player].is_empty()
    }
}

impl std::fmt::Display for Game<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} ({} : {}) {}",
            self.player_names[0], self.scores[0], self.scores[1], self.player_names[1]
        )?;
        writeln!(f, "{}", self.board)?;
        writeln!(f, "Rack 0: {}", self.racks[0])?;
        writeln!(f, "Rack 1: {}", self.racks[1])?;
        writeln!(f, "Bag: {}", self.bag)?;
        if !self.move_list.is_empty() {
            let state = self.state();
            writeln!(f, "Moves:")?;
            for (i, item) in self.move_list.iter().enumerate() {
                if i % 2 == 0 {
                    write!(f, "  {:2}: ({}) {}", i / 2 + 1, item.mv.score(&state), item.mv)?;
                } else {
                    writeln!(f, " / {} ({})", item.mv, item.mv.score(&state))?;
                }
            }
            if self.move_list.len() % 2 == 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
