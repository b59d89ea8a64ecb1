// Copyright (C) 2025 Andy Kurnia.

// Move generator scenarios: first-move constraint, cross checks,
// soundness against full validation, and completeness spot checks.

mod common;

use common::small_lexicon;
use rand::rngs::StdRng;
use rand::SeedableRng;
use skrafl::alphabet::BLANK;
use skrafl::bag::TileSet;
use skrafl::board::{BoardType, Coord, Tile};
use skrafl::game::Game;
use skrafl::movegen::find_left_parts;
use skrafl::moves::{Move, TileMove};
use skrafl::robot::new_high_score_robot;

// A canonical key for deduplication checks: sorted covers plus the
// orientation flag.
fn move_key(mv: &TileMove) -> String {
    let mut covers: Vec<String> = mv
        .covers
        .iter()
        .map(|(coord, cover)| {
            format!("{},{},{},{}", coord.row, coord.col, cover.letter, cover.meaning)
        })
        .collect();
    covers.sort();
    format!("{}|{}", mv.horizontal, covers.join(";"))
}

fn revalidate(mv: &TileMove, game: &Game) -> bool {
    // Robot moves skip validation by construction; rebuild with full
    // word checking to assert soundness
    TileMove::new(&game.board, mv.covers.clone(), true).is_valid(game)
}

// Puts both racks back in the bag, then draws exactly these letters for
// the player. Scarce letters may otherwise hide in the other rack.
fn set_rack(game: &mut Game, player: usize, letters: &str) {
    let letters: Vec<char> = letters.chars().collect();
    game.racks[1 - player].return_to_bag(&mut game.bag);
    game.racks[player].return_to_bag(&mut game.bag);
    assert!(game.racks[player].fill_by_letters(&mut game.bag, &letters));
}

#[test]
fn empty_board_first_moves() {
    let dawg = small_lexicon();
    let tile_set = TileSet::english();
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = Game::new(&dawg, &tile_set, BoardType::Standard, &mut rng);
    set_rack(&mut game, 0, "dogcats");
    let state = game.state();
    let moves = state.generate_moves();
    assert!(!moves.is_empty());

    let start = game.board.start_square();
    let mut seen = std::collections::HashSet::new();
    let mut found_left_shifted = false;
    for mv in &moves {
        let Move::Tile(mv) = mv else {
            panic!("generator must only produce tile moves");
        };
        // Unless the start square is covered, a first move is invalid
        assert!(
            mv.covers.contains_key(&start),
            "first move {mv} does not cover the start square"
        );
        assert!(revalidate(mv, &game), "unsound first move {mv}");
        // The sole start anchor must not generate duplicates
        assert!(seen.insert(move_key(mv)), "duplicate first move {mv}");
        if mv.top_left.col < start.col {
            found_left_shifted = true;
        }
    }
    // Left parts shift words to start before the anchor: "dog" ending
    // on the start square is one of them
    assert!(found_left_shifted);
    let dog = moves.iter().any(|mv| match mv {
        Move::Tile(mv) => {
            mv.word == "dog"
                && mv.covers.contains_key(&Coord::new(7, 5))
                && mv.covers.contains_key(&Coord::new(7, 7))
        }
        _ => false,
    });
    assert!(dog, "expected dog ending on the start square");
}

#[test]
fn completeness_around_a_single_word() {
    // Board has "do" across the start; rack is just 'g'. The complete
    // legal move set is: "dog" extending right, and "go" hanging off
    // the 'o'.
    let dawg = small_lexicon();
    let tile_set = TileSet::english();
    let mut rng = StdRng::seed_from_u64(1);
    let mut game = Game::new(&dawg, &tile_set, BoardType::Standard, &mut rng);
    game.board.place_tile(7, 6, Tile::new('d', 2));
    game.board.place_tile(7, 7, Tile::new('o', 1));
    set_rack(&mut game, 0, "g");

    let state = game.state();
    let moves = state.generate_moves();
    let mut keys: Vec<String> = moves
        .iter()
        .map(|mv| match mv {
            Move::Tile(mv) => {
                assert!(revalidate(mv, &game), "unsound move {mv}");
                move_key(mv)
            }
            _ => panic!("generator must only produce tile moves"),
        })
        .collect();
    keys.sort();
    let mut expected = vec![
        // "dog" horizontally at (7,8)
        "true|7,8,g,g".to_string(),
        // "go" vertically above the 'o'
        "false|6,7,g,g".to_string(),
    ];
    expected.sort();
    assert_eq!(keys, expected);
}

#[test]
fn cross_check_blocks_illegal_letters() {
    // With "do" on the board and 'g' and 'x' in the rack, "dog" and
    // "ox" are legal but nothing may read "dox" or "og".
    let dawg = small_lexicon();
    let tile_set = TileSet::english();
    let mut rng = StdRng::seed_from_u64(2);
    let mut game = Game::new(&dawg, &tile_set, BoardType::Standard, &mut rng);
    game.board.place_tile(7, 6, Tile::new('d', 2));
    game.board.place_tile(7, 7, Tile::new('o', 1));
    set_rack(&mut game, 0, "gx");

    let state = game.state();
    let moves = state.generate_moves();
    let mut keys: Vec<String> = moves
        .iter()
        .map(|mv| match mv {
            Move::Tile(mv) => {
                assert!(revalidate(mv, &game), "unsound move {mv}");
                move_key(mv)
            }
            _ => panic!("generator must only produce tile moves"),
        })
        .collect();
    keys.sort();
    let mut expected = vec![
        "true|7,8,g,g".to_string(),  // dog
        "false|6,7,g,g".to_string(), // go
        "false|8,7,x,x".to_string(), // ox
    ];
    expected.sort();
    assert_eq!(keys, expected);
    // In particular, no move ever places 'x' right of the 'o'
    assert!(!moves.iter().any(|mv| match mv {
        Move::Tile(mv) => mv.covers.contains_key(&Coord::new(7, 8)) && mv.word.contains('x'),
        _ => false,
    }));
}

#[test]
fn left_parts_drawable_from_rack() {
    let dawg = small_lexicon();
    let rack: Vec<char> = "dogca?s".chars().collect();
    let left_parts = find_left_parts(&dawg, &rack);
    assert_eq!(left_parts.len(), rack.len() - 1);
    let mut total = 0;
    for (bucket, parts) in left_parts.iter().enumerate() {
        for part in parts {
            total += 1;
            assert_eq!(part.matched.len(), bucket + 1);
            // The matched prefix plus the residual rack account for the
            // whole original rack
            assert_eq!(part.matched.len() + part.rack.len(), rack.len());
            // Each matched rune is drawable: exact tile or blank
            let mut pool = rack.clone();
            for &chr in &part.matched {
                if let Some(pos) = pool.iter().position(|&r| r == chr) {
                    pool.remove(pos);
                } else if let Some(pos) = pool.iter().position(|&r| r == BLANK) {
                    pool.remove(pos);
                } else {
                    panic!("left part not drawable from rack");
                }
            }
        }
    }
    assert!(total > 0, "a rack this rich must have left parts");
}

#[test]
fn midgame_soundness_with_blank() {
    // Row 7 reads "dog", column 6 reads "card" sharing the 'd'. A rich
    // rack with a blank generates plenty; every move must survive full
    // validation.
    let dawg = small_lexicon();
    // The classic English tile set has no blanks; the Explo one does
    let tile_set = TileSet::new_english();
    let mut rng = StdRng::seed_from_u64(3);
    let mut game = Game::new(&dawg, &tile_set, BoardType::Standard, &mut rng);
    for (row, col, chr) in [
        (7, 6, 'd'),
        (7, 7, 'o'),
        (7, 8, 'g'),
        (4, 6, 'c'),
        (5, 6, 'a'),
        (6, 6, 'r'),
    ] {
        game.board
            .place_tile(row, col, Tile::new(chr, tile_set.score(chr)));
    }
    set_rack(&mut game, 0, "s?tenal");

    let state = game.state();
    let moves = state.generate_moves();
    assert!(!moves.is_empty());
    for mv in &moves {
        let Move::Tile(mv) = mv else {
            panic!("generator must only produce tile moves");
        };
        assert!(revalidate(mv, &game), "unsound move {mv}");
    }
    // "dogs" and "cards" hang off the existing words
    let words: std::collections::HashSet<String> = moves
        .iter()
        .filter_map(|mv| match mv {
            Move::Tile(mv) => Some(mv.stripped_word()),
            _ => None,
        })
        .collect();
    assert!(words.contains("dogs"), "missing dogs in {words:?}");
    assert!(words.contains("cards"), "missing cards in {words:?}");
}

#[test]
fn blank_covers_carry_meaning_and_score_zero() {
    // Rack "?o": the blank can stand for 'd' or 'g' to make "do"/"go"
    // against the board, and the cover must record letter '?' with the
    // assigned meaning.
    let dawg = small_lexicon();
    // Blanks only exist in the Explo tile set
    let tile_set = TileSet::new_english();
    let mut rng = StdRng::seed_from_u64(4);
    let mut game = Game::new(&dawg, &tile_set, BoardType::Standard, &mut rng);
    game.board
        .place_tile(7, 7, Tile::new('o', tile_set.score('o')));
    game.board
        .place_tile(7, 8, Tile::new('x', tile_set.score('x')));
    set_rack(&mut game, 0, "?");

    let state = game.state();
    let moves = state.generate_moves();
    assert!(!moves.is_empty());
    for mv in &moves {
        let Move::Tile(mv) = mv else {
            panic!("generator must only produce tile moves");
        };
        assert!(revalidate(mv, &game), "unsound move {mv}");
        for cover in mv.covers.values() {
            assert_eq!(cover.letter, BLANK);
            assert_ne!(cover.meaning, BLANK);
        }
        // A blank scores zero: the move's value is the board tiles it
        // touches, scaled by any premium squares
        assert!(mv.word.contains(BLANK));
    }
    // A blank standing for 'b' left of the on-board "ox" reads "box"
    let meanings: std::collections::HashSet<char> = moves
        .iter()
        .filter_map(|mv| match mv {
            Move::Tile(mv) => mv.covers.get(&Coord::new(7, 6)).map(|c| c.meaning),
            _ => None,
        })
        .collect();
    assert!(meanings.contains(&'b'), "missing box in {meanings:?}");
}

#[test]
fn no_moves_from_a_useless_rack() {
    let dawg = small_lexicon();
    let tile_set = TileSet::english();
    let mut rng = StdRng::seed_from_u64(5);
    let mut game = Game::new(&dawg, &tile_set, BoardType::Standard, &mut rng);
    game.board.place_tile(7, 6, Tile::new('d', 2));
    game.board.place_tile(7, 7, Tile::new('o', 1));
    set_rack(&mut game, 0, "q");
    let state = game.state();
    assert!(state.generate_moves().is_empty());
}

#[test]
fn robot_plays_a_full_game() {
    let dawg = small_lexicon();
    let tile_set = TileSet::new_english();
    let mut rng = StdRng::seed_from_u64(31743);
    let mut game = Game::new(&dawg, &tile_set, BoardType::Standard, &mut rng);
    game.set_player_names("Villi", "Gopher");
    let robot = new_high_score_robot();

    let mut iterations = 0;
    loop {
        let mv = {
            let state = game.state();
            robot.generate_move(&state)
        };
        assert!(mv.is_valid(&game), "robot produced an invalid move");
        if let Move::Tile(tile_move) = &mv {
            assert!(
                revalidate(tile_move, &game),
                "robot move fails word validation: {tile_move}"
            );
        }
        assert!(game.apply_valid(mv, &mut rng));
        iterations += 1;
        if game.is_over() {
            break;
        }
        assert!(iterations < 1000, "game does not terminate");
    }
    // The final adjustment moves were appended automatically
    assert!(game
        .move_list
        .iter()
        .rev()
        .take(2)
        .all(|item| matches!(item.mv, Move::Final(_))));
    // Accounting: the recorded scores equal the per-move scores
    let state = game.state();
    let mut totals = [0i32; 2];
    for (i, item) in game.move_list.iter().enumerate() {
        totals[i % 2] += item.mv.score(&state);
    }
    assert_eq!(totals, game.scores);
}
