//! Terminal front-end for the skill Gomoku engine
//!
//! A thin line-oriented driver: reads commands from stdin, feeds them
//! to [`Game`], drains the event queue after each one and renders the
//! board. All rule logic lives in the library.

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use skill_gomoku::skills::{self, CapturePhase, RelocatePhase};
use skill_gomoku::{
    Cell, Game, GameError, GameEvent, GameStatus, Pos, SkillState, BOARD_SIZE, CATALOG,
};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut game = Game::new();
    print_help();
    render(&game);

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        print!("> ");
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match run_command(&mut game, line.trim()) {
            Command::Quit => break,
            Command::Handled => {}
            Command::Unknown => {
                println!("unrecognized command");
                print_help();
                continue;
            }
        }

        report_events(&mut game);

        // The computer may act more than once in a row (extra-turn skills)
        while game.turn() == Cell::Ai && game.status() == GameStatus::Playing {
            if let Err(err) = game.play_ai_turn() {
                println!("computer turn failed: {err}");
                break;
            }
            report_events(&mut game);
        }

        render(&game);
    }
    Ok(())
}

enum Command {
    Handled,
    Unknown,
    Quit,
}

fn run_command(game: &mut Game, line: &str) -> Command {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let outcome = match parts.as_slice() {
        ["q"] | ["quit"] => return Command::Quit,
        ["restart"] => {
            game.restart();
            Ok(())
        }
        ["skills"] => {
            print_skills(game);
            Ok(())
        }
        ["p", row, col] => match parse_pos(row, col) {
            Some(pos) => game.place_piece(pos),
            None => {
                println!("coordinates must be 0..{}", BOARD_SIZE - 1);
                return Command::Handled;
            }
        },
        ["t", row, col] => match parse_pos(row, col) {
            Some(pos) => game.provide_skill_target(pos),
            None => {
                println!("coordinates must be 0..{}", BOARD_SIZE - 1);
                return Command::Handled;
            }
        },
        ["s" | "skill", number] => match number
            .parse::<usize>()
            .ok()
            .and_then(|n| CATALOG.get(n.checked_sub(1)?))
        {
            Some(skill) => game.activate_skill(skill.id),
            None => {
                println!("skill number must be 1..={}", CATALOG.len());
                return Command::Handled;
            }
        },
        _ => return Command::Unknown,
    };

    if let Err(err) = outcome {
        report_error(err);
    }
    Command::Handled
}

fn parse_pos(row: &str, col: &str) -> Option<Pos> {
    let r: i32 = row.parse().ok()?;
    let c: i32 = col.parse().ok()?;
    Pos::is_valid(r, c).then(|| Pos::new(r as u8, c as u8))
}

fn report_error(err: GameError) {
    match err {
        GameError::InvalidTarget => println!("that cell does not work for this action"),
        GameError::InsufficientScore => println!("not enough score for that skill"),
        GameError::ActionWhileBusy => println!("finish the pending action first"),
        GameError::ActionAfterTerminal => println!("the game is over; use `restart`"),
        GameError::NotYourTurn => println!("it is not your turn"),
    }
}

fn report_events(game: &mut Game) {
    for event in game.drain_events() {
        match event {
            GameEvent::StatusChanged { status, .. } => match status {
                GameStatus::HumanWin => println!("*** you win! ***"),
                GameStatus::AiWin => println!("*** the computer wins ***"),
                GameStatus::Draw => println!("*** draw: board is full ***"),
                GameStatus::Playing => {}
            },
            GameEvent::SkillActivated { side, skill } => {
                let who = if side == Cell::Human { "you" } else { "computer" };
                println!("{who} used {}", skills::skill(skill).name);
            }
            GameEvent::SkillStepAdvanced { state } => describe_step(state),
            GameEvent::ScoreChanged { .. }
            | GameEvent::BoardChanged
            | GameEvent::TurnChanged { .. } => {}
        }
    }
}

fn describe_step(state: SkillState) {
    match state {
        SkillState::RemovePiece => println!("pick the opponent piece to remove (t r c)"),
        SkillState::Relocate(RelocatePhase::SelectPiece) => {
            println!("pick the opponent piece to move (t r c)")
        }
        SkillState::Relocate(RelocatePhase::PlacePiece { .. }) => {
            println!("pick the empty destination (t r c)")
        }
        SkillState::Capture(CapturePhase::PlaceOwnFirst) => {
            println!("place your first piece (t r c)")
        }
        SkillState::Capture(CapturePhase::PlaceOpponent) => {
            println!("place the opponent's piece (t r c)")
        }
        SkillState::Capture(CapturePhase::PlaceOwnSecond) => {
            println!("place your second piece (t r c)")
        }
        SkillState::Idle => {}
    }
}

fn print_skills(game: &Game) {
    println!("score: {}", game.score(Cell::Human));
    for (i, skill) in CATALOG.iter().enumerate() {
        let marker = if skill.cost <= game.score(Cell::Human) {
            ' '
        } else {
            '*'
        };
        println!(
            "{marker}{}. {} ({} pts) - {}",
            i + 1,
            skill.name,
            skill.cost,
            skill.description
        );
    }
    println!("(* = not affordable yet)");
}

fn print_help() {
    println!("commands:");
    println!("  p <row> <col>   place a piece");
    println!("  s <n>           activate skill n (see `skills`)");
    println!("  t <row> <col>   give a target to the pending skill");
    println!("  skills          list skills and costs");
    println!("  restart         start over");
    println!("  q               quit");
}

fn render(game: &Game) {
    let board = game.board();
    print!("   ");
    for c in 0..BOARD_SIZE {
        print!("{c:>2} ");
    }
    println!();
    for r in 0..BOARD_SIZE as u8 {
        print!("{r:>2} ");
        for c in 0..BOARD_SIZE as u8 {
            let glyph = match board.get(Pos::new(r, c)) {
                Cell::Empty => '.',
                Cell::Human => 'X',
                Cell::Ai => 'O',
            };
            print!(" {glyph} ");
        }
        println!();
    }
    println!(
        "you: {}  computer: {}  turn: {}",
        game.score(Cell::Human),
        game.score(Cell::Ai),
        if game.turn() == Cell::Human {
            "you"
        } else {
            "computer"
        }
    );
}
