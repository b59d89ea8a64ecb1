// Copyright (C) 2025 Andy Kurnia.

// JSON-driven move generation: reads a question from stdin, answers
// with the generated moves sorted by score.

use skrafl::{alphabet, bag, board, dawg, error, game, moves, rack};

// board: 15 strings of 15 characters. '.' for an empty square, a
// lowercase letter for a tile, an uppercase letter for a blank standing
// for that letter.
// rack: up to 7 letters, '?' for a blank.
// count: maximum number of moves returned. Equal scores are not stably
// sorted; different counts may tie-break the tail differently.
#[derive(serde::Deserialize)]
struct Question {
    lexicon: String,
    #[serde(default = "default_dicts")]
    dicts: String,
    #[serde(default = "default_tile_set")]
    tile_set: String,
    #[serde(default = "default_board_type")]
    board_type: String,
    #[serde(rename = "board")]
    board_rows: Vec<String>,
    rack: String,
    #[serde(rename = "count")]
    max_moves: usize,
}

fn default_dicts() -> String {
    "dicts".to_string()
}

fn default_tile_set() -> String {
    "english".to_string()
}

fn default_board_type() -> String {
    "standard".to_string()
}

#[derive(serde::Serialize)]
struct Answer {
    pos: String,
    word: String,
    score: i32,
}

fn tile_set_by_name(name: &str) -> error::Returns<bag::TileSet> {
    Ok(match name {
        "english" => bag::TileSet::english(),
        "new_english" => bag::TileSet::new_english(),
        "icelandic" => bag::TileSet::new_icelandic(),
        "polish" => bag::TileSet::polish(),
        "norwegian" => bag::TileSet::norwegian(),
        _ => return Err(error::invalid_input("tile_set", name).into()),
    })
}

fn build_board(
    question: &Question,
    tile_set: &bag::TileSet,
) -> error::Returns<board::Board> {
    let board_type = board::BoardType::from_name(&question.board_type)?;
    let mut board = board::Board::new(board_type);
    if question.board_rows.len() != board::BOARD_SIZE {
        return Err(error::invalid_input("board", "need 15 rows").into());
    }
    for (row, row_str) in question.board_rows.iter().enumerate() {
        let runes: Vec<char> = row_str.chars().collect();
        if runes.len() != board::BOARD_SIZE {
            return Err(error::invalid_input("board", "row needs 15 squares").into());
        }
        for (col, &chr) in runes.iter().enumerate() {
            if chr == '.' {
                continue;
            }
            let tile = if chr.is_uppercase() {
                // A blank standing for the lowercase letter
                let meaning = chr.to_lowercase().next().unwrap_or(chr);
                board::Tile {
                    letter: alphabet::BLANK,
                    meaning,
                    score: 0,
                    played_by: 0,
                }
            } else {
                if !tile_set.contains(chr) {
                    return Err(error::invalid_input("board", "letter not in tile set").into());
                }
                board::Tile::new(chr, tile_set.score(chr))
            };
            if !board.place_tile(row as i8, col as i8, tile) {
                return Err(error::internal_invariant("tile placement failed").into());
            }
        }
    }
    Ok(board)
}

fn main() -> error::Returns<()> {
    let mut data = String::new();
    std::io::Read::read_to_string(&mut std::io::stdin(), &mut data)?;
    let question = serde_json::from_str::<Question>(&data)?;

    let lexicon = dawg::Lexicon::from_name(&question.lexicon)?;
    let dawg = lexicon.load_from_dir(&question.dicts)?;
    let tile_set = tile_set_by_name(&question.tile_set)?;
    let board = build_board(&question, &tile_set)?;
    let rack_runes: Vec<char> = question.rack.chars().collect();
    let rack = rack::Rack::from_letters(&rack_runes, &tile_set)?;

    let state = game::GameState::new(&dawg, &tile_set, &board, &rack, false);
    let mut generated = state.generate_moves();
    generated.sort_by_key(|mv| std::cmp::Reverse(mv.score(&state)));
    generated.truncate(question.max_moves);

    let result: Vec<Answer> = generated
        .iter()
        .map(|mv| Answer {
            pos: match mv {
                moves::Move::Tile(mv) => mv.top_left.label(mv.horizontal),
                _ => String::new(),
            },
            word: match mv {
                moves::Move::Tile(mv) => mv.word.clone(),
                _ => mv.to_string(),
            },
            score: mv.score(&state),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
