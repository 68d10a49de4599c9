use std::io::{self, Write};

use crossterm::{
    QueueableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use rand::Rng;

use crate::{
    board::{Board, Direction},
    game::{Game, TurnOutcome},
};

const PROMPT: &str = "Push with the arrow keys or WASD; q quits.";

enum Input {
    Push(Direction),
    Quit,
}

enum Exit {
    Lost,
    Quit,
}

/// Runs the interactive loop until the player quits or loses, then prints
/// the final grid and a sign-off to the regular screen.
pub fn run<R: Rng>(mut game: Game<R>, plain: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let played = play(&mut stdout, &mut game, plain);

    execute!(stdout, LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;

    let exit = played?;
    print!("{}", game.board());
    if let Exit::Lost = exit {
        println!("You Lose!");
    }
    println!("Thanks for playing.");

    Ok(())
}

fn play<R: Rng>(stdout: &mut io::Stdout, game: &mut Game<R>, plain: bool) -> io::Result<Exit> {
    let mut message = PROMPT;

    loop {
        draw(stdout, game.board(), plain, message)?;

        let Some(input) = read_key()? else {
            message = "Invalid choice.";
            continue;
        };

        message = PROMPT;
        match input {
            Input::Quit => return Ok(Exit::Quit),
            Input::Push(direction) => match game.apply(direction) {
                TurnOutcome::Unchanged | TurnOutcome::Moved => {}
                TurnOutcome::Lost => return Ok(Exit::Lost),
            },
        }
    }
}

/// Blocks until a key press and maps it to an input. `None` is a key the
/// game does not know; the caller re-prompts without consuming a turn.
fn read_key() -> io::Result<Option<Input>> {
    loop {
        let event = event::read()?;
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            return Ok(match code {
                KeyCode::Left | KeyCode::Char('a') => Some(Input::Push(Direction::Left)),
                KeyCode::Right | KeyCode::Char('d') => Some(Input::Push(Direction::Right)),
                KeyCode::Up | KeyCode::Char('w') => Some(Input::Push(Direction::Up)),
                KeyCode::Down | KeyCode::Char('s') => Some(Input::Push(Direction::Down)),
                KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
                _ => None,
            });
        }
    }
}

fn draw(stdout: &mut io::Stdout, board: &Board, plain: bool, message: &str) -> io::Result<()> {
    stdout.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;

    if plain {
        for line in board.to_string().lines() {
            stdout.queue(Print(line))?.queue(Print("\r\n"))?;
        }
    } else {
        draw_tiles(stdout, board)?;
    }

    stdout.queue(Print("\r\n"))?.queue(Print(message))?;
    stdout.flush()
}

fn draw_tiles(stdout: &mut io::Stdout, board: &Board) -> io::Result<()> {
    for ((_, col), cell) in board.cells() {
        match cell {
            Some(value) => {
                let (fg, bg) = tile_colors(value);
                stdout
                    .queue(SetForegroundColor(fg))?
                    .queue(SetBackgroundColor(bg))?
                    .queue(Print(format!("{value:^6}")))?
                    .queue(ResetColor)?;
            }
            None => {
                stdout
                    .queue(SetForegroundColor(Color::DarkGrey))?
                    .queue(Print("  .   "))?
                    .queue(ResetColor)?;
            }
        }

        if col + 1 == board.cols() {
            stdout.queue(Print("\r\n"))?.queue(Print("\r\n"))?;
        } else {
            stdout.queue(Print(' '))?;
        }
    }

    Ok(())
}

/// (foreground, background) per tile value, following the classic console
/// palette: plain backgrounds up to 128, bright two-tone pairs above that.
fn tile_colors(value: u32) -> (Color, Color) {
    match value {
        2 => (Color::White, Color::DarkGreen),
        4 => (Color::White, Color::DarkRed),
        8 => (Color::Black, Color::DarkYellow),
        16 => (Color::White, Color::DarkBlue),
        32 => (Color::White, Color::DarkMagenta),
        64 => (Color::Black, Color::DarkCyan),
        128 => (Color::Black, Color::White),
        256 => (Color::Red, Color::Green),
        512 => (Color::Green, Color::Red),
        1024 => (Color::Cyan, Color::Yellow),
        2048 => (Color::Yellow, Color::Blue),
        4096 => (Color::Cyan, Color::Magenta),
        8192 => (Color::Yellow, Color::Cyan),
        16384 => (Color::Red, Color::White),
        32768 => (Color::Green, Color::Cyan),
        65536 => (Color::White, Color::Red),
        _ => (Color::White, Color::Yellow),
    }
}
