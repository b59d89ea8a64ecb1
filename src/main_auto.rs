// Copyright (C) 2025 Andy Kurnia.

// Self-play driver: two high-score robots play each other to the end
// of the game, printing the moves as they go.
//
// Usage: skrafl_auto <dicts-dir> <lexicon> [tile-set] [board-type]
//                    [num-games] [seed]

use rand::rngs::StdRng;
use rand::SeedableRng;
use skrafl::bag::TileSet;
use skrafl::board::BoardType;
use skrafl::dawg::Lexicon;
use skrafl::error;
use skrafl::game::Game;
use skrafl::moves::Move;
use skrafl::return_error;
use skrafl::robot::new_high_score_robot;

fn tile_set_by_name(name: &str) -> error::Returns<TileSet> {
    Ok(match name {
        "english" => TileSet::english(),
        "new_english" => TileSet::new_english(),
        "icelandic" => TileSet::new_icelandic(),
        "polish" => TileSet::polish(),
        "norwegian" => TileSet::norwegian(),
        _ => return Err(error::invalid_input("tile_set", name).into()),
    })
}

fn main() -> error::Returns<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        return_error!(format!(
            "usage: {} <dicts-dir> <lexicon> [tile-set] [board-type] [num-games] [seed]",
            args[0]
        ));
    }
    let lexicon = Lexicon::from_name(&args[2])?;
    let dawg = lexicon.load_from_dir(&args[1])?;
    let tile_set = tile_set_by_name(args.get(3).map_or("english", String::as_str))?;
    let board_type = BoardType::from_name(args.get(4).map_or("standard", String::as_str))?;
    let num_games: u32 = match args.get(5) {
        None => 1,
        Some(s) => s.parse()?,
    };
    let mut rng = match args.get(6) {
        None => StdRng::from_entropy(),
        Some(s) => StdRng::seed_from_u64(s.parse()?),
    };

    let robot = new_high_score_robot();
    let mut wins = [0u32; 2];
    for game_num in 0..num_games {
        let mut game = Game::new(&dawg, &tile_set, board_type, &mut rng);
        game.set_player_names("Robot A", "Robot B");
        loop {
            let mv = {
                let state = game.state();
                robot.generate_move(&state)
            };
            let player = game.player_to_move();
            let score = mv.score(&game.state());
            println!("{player}: {mv} {score}");
            if !game.apply_valid(mv, &mut rng) {
                return_error!("generated move failed to apply".to_string());
            }
            if game.is_over() {
                break;
            }
        }
        // The last two moves are the final rack adjustments
        for item in game.move_list.iter().rev().take(2) {
            if let Move::Final(_) = item.mv {
                println!("final: {}", item.mv);
            }
        }
        println!(
            "game {}: {} {} - {} {}",
            game_num + 1,
            game.player_names[0],
            game.scores[0],
            game.player_names[1],
            game.scores[1],
        );
        match game.scores[0].cmp(&game.scores[1]) {
            std::cmp::Ordering::Greater => wins[0] += 1,
            std::cmp::Ordering::Less => wins[1] += 1,
            std::cmp::Ordering::Equal => {}
        }
    }
    if num_games > 1 {
        println!("wins: {} - {}", wins[0], wins[1]);
    }
    Ok(())
}
