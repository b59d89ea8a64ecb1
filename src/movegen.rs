// Copyright (C) 2025 Andy Kurnia.

// Generation of all valid tile moves on the board, given a player's
// rack. The algorithm is the classic Appel & Jacobson one ("The World's
// Fastest Scrabble Program"): moves are found by examining each
// one-dimensional axis of the board in turn, 15 rows and 15 columns for
// a total of 30 axes.
//
// For each axis the cross-check set of each empty square is calculated,
// i.e. the set of letters that form valid words by connecting with word
// parts across the square's axis, intersected with the letters in the
// rack. Any empty square adjacent to a covered square is an anchor, and
// each anchor is examined in turn, from left to right:
//
// 1) Count the open squares to the left of the anchor; call it maxleft.
// 2) All rack permutations of length 1..maxleft (the possible word
//    beginnings) have been precomputed once per generation call, each
//    with the graph cursor standing at its end.
// 3) For each such left part, complete the word by placing tiles on the
//    anchor square and to its right, obeying three constraints: the
//    cross-check set of the square, the existence of a path in the
//    graph, and availability of a matching tile in the rack (with
//    blanks always matching).
// 4) A left part already on the board is followed instead by resuming
//    from its position in the graph.
// 5) Coming to a tile already on the board while extending right, it
//    must correspond to the graph path being followed.
// 6) At a final node, when off the edge or at an empty square, a
//    complete word has been laid: record the tile move.

use super::alphabet::{LetterSet, BLANK};
use super::board::{Coord, Direction, Square, Tile, BOARD_SIZE};
use super::dawg::{Dawg, NavState};
use super::game::GameState;
use super::moves::{Cover, Covers, Move, TileMove};
use super::navigators::{contains_rune, remove_rune, Navigator};
use std::sync::mpsc;

// Like FindNavigator, but instead of a bool result it saves the full
// navigation state where the sought prefix ends, so navigation can
// continue from there under further constraints.
pub struct LeftFindNavigator {
    prefix: Vec<char>,
    index: usize,
    state: Option<NavState>,
}

impl LeftFindNavigator {
    pub fn new(prefix: Vec<char>) -> LeftFindNavigator {
        LeftFindNavigator {
            prefix,
            index: 0,
            state: None,
        }
    }

    pub fn into_state(self) -> Option<NavState> {
        self.state
    }
}

impl Navigator for LeftFindNavigator {
    fn push_edge(&mut self, chr: char) -> bool {
        self.prefix.get(self.index) == Some(&chr)
    }

    fn pop_edge(&mut self) -> bool {
        // Only one outgoing edge can be the right one
        false
    }

    fn is_accepting(&self) -> bool {
        self.index < self.prefix.len()
    }

    fn accepts(&mut self, _chr: char) -> bool {
        // We never enter an edge without the correct rune
        self.index += 1;
        true
    }

    fn accept(&mut self, _matched: &[char], _is_final: bool, state: Option<&NavState>) {
        if self.index == self.prefix.len() {
            // Found the whole left part; save its position
            self.state = state.cloned();
        }
    }
}

// The navigation state after matching a left part within the graph,
// with the residual rack. Resuming from here completes an anchor square
// and a right part.
pub struct LeftPart {
    pub matched: Vec<char>,
    pub rack: Vec<char>,
    pub state: NavState,
}

// Finds all left parts of words that are possible with a particular
// rack, accumulated by length. This runs once at the start of move
// generation: the same left parts apply to every anchor of every axis.
pub struct LeftPermutationNavigator {
    rack: Vec<char>,
    stack: Vec<(Vec<char>, usize)>,
    max_left: usize,
    left_parts: Vec<Vec<LeftPart>>,
    index: usize,
}

impl LeftPermutationNavigator {
    pub fn new(rack: &[char]) -> LeftPermutationNavigator {
        // One rack tile goes on the anchor square itself; the rest are
        // available to be played to the left of it
        let max_left = rack.len().saturating_sub(1);
        LeftPermutationNavigator {
            rack: rack.to_vec(),
            stack: Vec::with_capacity(8),
            max_left,
            left_parts: (0..max_left).map(|_| Vec::new()).collect(),
            index: 0,
        }
    }
}

impl Navigator for LeftPermutationNavigator {
    fn push_edge(&mut self, chr: char) -> bool {
        if !contains_rune(&self.rack, chr) && !contains_rune(&self.rack, BLANK) {
            return false;
        }
        self.stack.push((self.rack.clone(), self.index));
        true
    }

    fn pop_edge(&mut self) -> bool {
        if let Some((rack, index)) = self.stack.pop() {
            self.rack = rack;
            self.index = index;
        }
        true
    }

    fn is_accepting(&self) -> bool {
        self.index < self.max_left
    }

    fn accepts(&mut self, chr: char) -> bool {
        let exact_match = contains_rune(&self.rack, chr);
        if !exact_match && !contains_rune(&self.rack, BLANK) {
            return false;
        }
        self.index += 1;
        if exact_match {
            remove_rune(&mut self.rack, chr);
        } else {
            remove_rune(&mut self.rack, BLANK);
        }
        true
    }

    fn accept(&mut self, matched: &[char], _is_final: bool, state: Option<&NavState>) {
        if let Some(state) = state {
            self.left_parts[matched.len() - 1].push(LeftPart {
                matched: matched.to_vec(),
                rack: self.rack.clone(),
                state: state.clone(),
            });
        }
    }
}

// All left part permutations of the rack, grouped by length.
pub fn find_left_parts(dawg: &Dawg, rack: &[char]) -> Vec<Vec<LeftPart>> {
    let mut lpn = LeftPermutationNavigator::new(rack);
    dawg.navigate_resumable(&mut lpn);
    lpn.left_parts
}

// How a candidate rune fits the current square.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TileFit {
    No,
    BoardTile,
    RackTile,
}

// The core of the Appel-Jacobson algorithm: proceeds along an axis,
// covering empty squares with rack tiles while obeying the graph and
// the cross-check sets. Valid tile moves are collected as final nodes
// are encountered.
pub struct ExtendRightNavigator<'a, 'b> {
    axis: &'b Axis<'a>,
    index: usize,
    rack: Vec<char>,
    wildcard_in_rack: bool,
    stack: Vec<(Vec<char>, usize, bool)>,
    last_check: Option<TileFit>,
    moves: Vec<Move>,
}

impl<'a, 'b> ExtendRightNavigator<'a, 'b> {
    pub fn new(axis: &'b Axis<'a>, anchor: usize, rack: Vec<char>) -> ExtendRightNavigator<'a, 'b> {
        let wildcard_in_rack = contains_rune(&rack, BLANK);
        ExtendRightNavigator {
            axis,
            index: anchor,
            rack,
            wildcard_in_rack,
            stack: Vec::with_capacity(8),
            last_check: None,
            moves: Vec::new(),
        }
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    fn check(&self, letter: char) -> TileFit {
        if let Some(tile) = self.axis.tile_at(self.index) {
            // A tile on the board must be matched exactly, by meaning so
            // that words extend through played blanks
            return if letter == tile.meaning {
                TileFit::BoardTile
            } else {
                TileFit::No
            };
        }
        // Does the current rack allow this letter?
        if !self.wildcard_in_rack && !contains_rune(&self.rack, letter) {
            return TileFit::No;
        }
        // Finally, the cross-check set of the square
        if self.axis.allows(self.index, letter) {
            TileFit::RackTile
        } else {
            TileFit::No
        }
    }
}

impl Navigator for ExtendRightNavigator<'_, '_> {
    fn push_edge(&mut self, letter: char) -> bool {
        let fit = self.check(letter);
        self.last_check = Some(fit);
        if fit == TileFit::No {
            return false;
        }
        self.stack
            .push((self.rack.clone(), self.index, self.wildcard_in_rack));
        true
    }

    fn pop_edge(&mut self) -> bool {
        if let Some((rack, index, wildcard_in_rack)) = self.stack.pop() {
            self.rack = rack;
            self.index = index;
            self.wildcard_in_rack = wildcard_in_rack;
        }
        // All outgoing edges need to be tried
        true
    }

    fn is_accepting(&self) -> bool {
        if self.index >= BOARD_SIZE {
            // Gone off the board edge
            return false;
        }
        // Continue while there is something on the rack or the current
        // square is occupied
        !self.rack.is_empty() || self.axis.tile_at(self.index).is_some()
    }

    fn accepts(&mut self, letter: char) -> bool {
        // We are on the anchor square or to its right
        let fit = self.last_check.take().unwrap_or_else(|| self.check(letter));
        if fit == TileFit::No {
            return false;
        }
        self.index += 1;
        if fit == TileFit::RackTile {
            if contains_rune(&self.rack, letter) {
                remove_rune(&mut self.rack, letter);
            } else {
                // Used a blank tile
                remove_rune(&mut self.rack, BLANK);
            }
            self.wildcard_in_rack = contains_rune(&self.rack, BLANK);
        }
        true
    }

    fn accept(&mut self, matched: &[char], is_final: bool, state: Option<&NavState>) {
        debug_assert!(state.is_none(), "extend-right navigation is not resumable");
        if !is_final
            || (self.index < BOARD_SIZE && self.axis.tile_at(self.index).is_some())
        {
            // Not a complete word, or the match is swallowed by an
            // occupied square to its right
            return;
        }
        if matched.len() < 2 {
            return;
        }
        // Legal move found: construct the covers for the rack tiles
        // laid down, with blanks recorded by their assigned meaning
        let start = self.index - matched.len();
        let mut rack = self.axis.rack().to_vec();
        let mut covers = Covers::default();
        for (i, &meaning) in matched.iter().enumerate() {
            if self.axis.tile_at(start + i).is_none() {
                let letter = if contains_rune(&rack, meaning) {
                    remove_rune(&mut rack, meaning);
                    meaning
                } else {
                    // Must be using a blank tile
                    remove_rune(&mut rack, BLANK);
                    BLANK
                };
                covers.insert(self.axis.coord(start + i), Cover { letter, meaning });
            }
        }
        let mv = TileMove::new(self.axis.board(), covers, false);
        self.moves.push(Move::Tile(mv));
    }
}

// A row or column of the board where the generator is looking for valid
// moves, with its anchor flags and per-square cross-check sets.
pub struct Axis<'a> {
    state: &'a GameState<'a>,
    index: usize,
    horizontal: bool,
    rack: Vec<char>,
    cross_check: [LetterSet; BOARD_SIZE],
    is_anchor: [bool; BOARD_SIZE],
}

impl<'a> Axis<'a> {
    pub fn new(
        state: &'a GameState<'a>,
        rack: &[char],
        rack_set: LetterSet,
        index: usize,
        horizontal: bool,
    ) -> Axis<'a> {
        let mut axis = Axis {
            state,
            index,
            horizontal,
            rack: rack.to_vec(),
            cross_check: [0; BOARD_SIZE],
            is_anchor: [false; BOARD_SIZE],
        };
        let board = state.board;
        let start = board.start_square();
        for i in 0..BOARD_SIZE {
            if axis.tile_at(i).is_some() {
                // Occupied: not an anchor, no cross-check set needed
                continue;
            }
            let coord = axis.coord(i);
            let is_anchor = if board.num_tiles == 0 {
                // Empty board: the sole anchor is the start square, on
                // its horizontal axis only, to avoid generating each
                // first move twice
                horizontal && index == start.row as usize && i == start.col as usize
            } else {
                board.num_adjacent_tiles(coord.row, coord.col) > 0
            };
            if !is_anchor {
                // No adjacent tiles: any rack letter may go here
                axis.cross_check[i] = rack_set;
            } else {
                // An anchor square. Its cross-check set may still be
                // empty if no rack tile forms a legal cross word here.
                let cross_set = axis.cross_set(coord);
                axis.is_anchor[i] = true;
                axis.cross_check[i] = rack_set & cross_set;
            }
        }
        axis
    }

    fn cross_set(&self, coord: Coord) -> LetterSet {
        let (left, right) = self
            .state
            .board
            .cross_words(coord.row, coord.col, !self.horizontal);
        if left.is_empty() && right.is_empty() {
            // No cross word, no constraint
            return !0;
        }
        self.state.dawg.cross_set(&left, &right)
    }

    #[inline(always)]
    pub(crate) fn board(&self) -> &'a super::board::Board {
        self.state.board
    }

    #[inline(always)]
    pub(crate) fn rack(&self) -> &[char] {
        &self.rack
    }

    #[inline(always)]
    fn coord(&self, i: usize) -> Coord {
        if self.horizontal {
            Coord::new(self.index as i8, i as i8)
        } else {
            Coord::new(i as i8, self.index as i8)
        }
    }

    #[inline(always)]
    fn square(&self, i: usize) -> &Square {
        let coord = self.coord(i);
        self.state.board.sq(coord.row, coord.col).unwrap()
    }

    #[inline(always)]
    fn tile_at(&self, i: usize) -> Option<&Tile> {
        self.square(i).tile.as_ref()
    }

    // True if the square is empty and a rack tile can legally go there.
    #[inline(always)]
    fn is_open(&self, i: usize) -> bool {
        self.tile_at(i).is_none() && self.cross_check[i] > 0
    }

    // True if the letter passes the cross checks for the empty square.
    fn allows(&self, i: usize, letter: char) -> bool {
        if self.tile_at(i).is_some() {
            return false;
        }
        self.state
            .dawg
            .alphabet()
            .member(letter, self.cross_check[i])
    }

    // The moves using the given square as an anchor.
    fn gen_moves_from_anchor(
        &self,
        anchor: usize,
        max_left: usize,
        left_parts: &[Vec<LeftPart>],
    ) -> Vec<Move> {
        let dawg = self.state.dawg;

        // Is a fixed left part already on the board?
        if max_left == 0 && anchor > 0 && self.tile_at(anchor - 1).is_some() {
            let coord = self.coord(anchor);
            // Read the pinned prefix in reading order
            let left = self.state.board.word_fragment(
                coord.row,
                coord.col,
                Direction::back(self.horizontal),
            );
            let mut lfn = LeftFindNavigator::new(left.clone());
            dawg.navigate_resumable(&mut lfn);
            let Some(state) = lfn.into_state() else {
                // The prefix is not in the graph: nothing can complete it
                return Vec::new();
            };
            // Extend right from the end of the prefix, whole rack in hand
            let mut ern = ExtendRightNavigator::new(self, anchor, self.rack.clone());
            dawg.resume(&mut ern, &state, &left);
            return ern.into_moves();
        }

        // Not completing an existing left part: extend an empty prefix
        // to the right of the anchor
        let mut ern = ExtendRightNavigator::new(self, anchor, self.rack.clone());
        dawg.navigate(&mut ern);
        let mut moves = ern.into_moves();

        // Then permute left prefixes into the open space to the left of
        // the anchor, if any
        for left_len in 1..=max_left {
            for left_part in &left_parts[left_len - 1] {
                let mut ern = ExtendRightNavigator::new(self, anchor, left_part.rack.clone());
                dawg.resume(&mut ern, &left_part.state, &left_part.matched);
                moves.append(&mut ern.into_moves());
            }
        }
        moves
    }

    // All legal moves along this axis, anchors processed left to right.
    pub fn generate_moves(&self, len_rack: usize, left_parts: &[Vec<LeftPart>]) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut last_anchor: isize = -1;
        for i in 0..BOARD_SIZE {
            if !self.is_anchor[i] {
                continue;
            }
            if self.cross_check[i] > 0 {
                // A rack tile can actually be placed here: count open
                // squares to the left, up to but not including the
                // previous anchor
                let mut open_cnt = 0;
                let mut left = i as isize;
                while left > 0 && left > last_anchor + 1 && self.is_open(left as usize - 1) {
                    open_cnt += 1;
                    left -= 1;
                }
                moves.append(&mut self.gen_moves_from_anchor(
                    i,
                    open_cnt.min(len_rack.saturating_sub(1)),
                    left_parts,
                ));
            }
            last_anchor = i as isize;
        }
        moves
    }
}

impl GameState<'_> {
    // All legal moves in this game state, considering the board and the
    // player's rack. The work splits into 30 sub-tasks, one per axis,
    // run on the shared worker pool; each sends its list on the bounded
    // result channel, drained here. The concatenated order is
    // unspecified; sort by score for determinism.
    pub fn generate_moves(&self) -> Vec<Move> {
        let rack = self.rack.as_runes();
        let rack_set = self.dawg.alphabet().set_of(&rack);
        let len_rack = rack.len();
        let left_parts = find_left_parts(self.dawg, &rack);
        let (tx, rx) = mpsc::sync_channel::<Vec<Move>>(2 * BOARD_SIZE);
        rayon::scope(|scope| {
            for index in 0..BOARD_SIZE {
                for horizontal in [true, false] {
                    let tx = tx.clone();
                    let rack = &rack;
                    let left_parts = &left_parts;
                    scope.spawn(move |_| {
                        let axis = Axis::new(self, rack, rack_set, index, horizontal);
                        // A send on the bounded channel never blocks:
                        // capacity equals the number of tasks
                        let _ = tx.send(axis.generate_moves(len_rack, left_parts));
                    });
                }
            }
        });
        drop(tx);
        let mut moves = Vec::new();
        for mut list in rx.try_iter() {
            moves.append(&mut list);
        }
        moves
    }
}
