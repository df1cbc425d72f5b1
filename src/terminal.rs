use std::io::{
    BufRead,
    Write,
};

use rand::Rng;

use crate::{
    core::{
        Clock,
        ReviewOutcome,
        VokabelError,
    },
    persistence::KeyValueStore,
    quota::QuotaDisplay,
    session::DrillSession,
};

const BAR_WIDTH: usize = 35;

/// Text version of the segmented bar: one letter per filled cell, taken from
/// the segment color (`R`ed, `O`range, ...), dots for the rest.
pub fn render_progress_bar(display: &QuotaDisplay) -> String {
    let mut cells = vec!['.'; BAR_WIDTH];
    for segment in &display.segments {
        let start = (segment.offset_fraction * BAR_WIDTH as f64).round() as usize;
        let len = (segment.width_fraction * BAR_WIDTH as f64).round() as usize;
        let letter = segment.color().name().chars().next().unwrap_or('#').to_ascii_uppercase();
        for cell in cells.iter_mut().skip(start).take(len) {
            *cell = letter;
        }
    }

    format!(
        "[{}] {}/{} ({:.1}%)",
        cells.into_iter().collect::<String>(),
        display.count,
        display.target,
        display.percentage
    )
}

enum Command {
    Reveal,
    Answer(ReviewOutcome),
    Continue,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_lowercase().as_str() {
        "" | "r" => Command::Reveal,
        "y" | "j" => Command::Answer(ReviewOutcome::Correct),
        "n" => Command::Answer(ReviewOutcome::Incorrect),
        "c" => Command::Continue,
        "q" => Command::Quit,
        _ => Command::Unknown,
    }
}

/// Runs the interactive drill until the user quits or input ends.
pub fn run_drill<S, C, R, I, O>(
    session: &mut DrillSession<S, C, R>,
    mut input: I,
    mut output: O,
) -> Result<(), VokabelError>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
    I: BufRead,
    O: Write,
{
    session.start();
    let mut line = String::new();

    loop {
        writeln!(output, "{}", render_progress_bar(&session.quota()))?;

        if session.is_completion_showing() {
            writeln!(
                output,
                "Congratulations! You have completed {} cards today!",
                session.today_count()
            )?;
            writeln!(output, "[c] continue practicing, [q] quit")?;
        } else {
            match session.current_card() {
                None => {
                    writeln!(output, "No cards available.")?;
                    return Ok(());
                }
                Some(card) => {
                    writeln!(output, "\n  {}\n  {}", card.word, card.sentence)?;
                    match card.translation {
                        Some(translation) => {
                            writeln!(output, "  {}", translation)?;
                            writeln!(output, "[y] correct, [n] wrong, [q] quit")?;
                        }
                        None => writeln!(output, "[Enter] reveal, [q] quit")?,
                    }
                }
            }
        }
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let revealed = session.current_card().map(|card| card.revealed).unwrap_or(false);
        match parse_command(&line) {
            Command::Quit => return Ok(()),
            Command::Continue if session.is_completion_showing() => {
                session.dismiss_completion();
            }
            Command::Reveal if !session.is_completion_showing() && !revealed => {
                session.reveal()?;
            }
            Command::Answer(outcome) if revealed => {
                if let Err(e) = session.answer(outcome) {
                    writeln!(output, "Could not save the answer ({}), try again.", e)?;
                }
            }
            _ => writeln!(output, "?")?,
        }
    }
}
