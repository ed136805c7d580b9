use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::{Path, PathBuf};
use wordle_six::assist::assist_loop;
use wordle_six::cli::{Cli, CliInterface, Command, parse_cli};
use wordle_six::logging::{LogTarget, default_log_path, init_logging};
use wordle_six::stats::default_stats_path;
use wordle_six::tui::TuiInterface;
use wordle_six::wordbank::{EMBEDDED_ANSWERS, EMBEDDED_VOCABULARY};
use wordle_six::{
    GameInterface, Stats, WordLists, compute_feedback, load_words_from_file, load_words_from_str,
    run_session,
};

fn load_list(path: Option<&Path>, embedded: &str) -> Result<Vec<String>> {
    match path {
        Some(path) => load_words_from_file(path)
            .with_context(|| format!("Failed to load word list from '{}'", path.display())),
        None => Ok(load_words_from_str(embedded)),
    }
}

fn load_word_lists(cli: &Cli) -> Result<WordLists> {
    let vocabulary = load_list(cli.vocab_path.as_deref(), EMBEDDED_VOCABULARY)?;
    let answers = load_list(cli.answers_path.as_deref(), EMBEDDED_ANSWERS)?;
    Ok(WordLists::new(vocabulary, answers)?)
}

fn stats_path(cli: &Cli) -> Option<PathBuf> {
    if cli.no_stats {
        return None;
    }
    cli.stats_path.clone().or_else(default_stats_path)
}

fn play(cli: &Cli, words: &WordLists, interface: &mut dyn GameInterface) -> Result<()> {
    let path = stats_path(cli);
    let stats = path.as_deref().map(Stats::load).unwrap_or_default();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut stats = run_session(words, interface, &mut rng, stats)?;

    if let Some(path) = path {
        stats
            .save(&path)
            .with_context(|| format!("Failed to save stats to '{}'", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = parse_cli();
    let command = cli.command.clone().unwrap_or(Command::Play { tui: false });

    // Logs must not be written over the full-screen interface
    let full_screen = matches!(command, Command::Play { tui: true });
    let log_target = LogTarget::select(cli.log_file.clone(), full_screen, default_log_path());
    init_logging(&log_target).context("Failed to initialise logging")?;

    let words = load_word_lists(&cli)?;
    log::info!(
        "Loaded {} answers and {} accepted guesses",
        words.answers().len(),
        words.vocabulary().len()
    );

    match command {
        Command::Play { tui: false } => {
            let mut interface = CliInterface::new(io::stdin().lock());
            play(&cli, &words, &mut interface)
        }
        Command::Play { tui: true } => {
            let mut interface = TuiInterface::new().context("Failed to start the terminal UI")?;
            let result = play(&cli, &words, &mut interface);
            interface.cleanup().context("Failed to restore the terminal")?;
            result
        }
        Command::Assist => {
            assist_loop(words.vocabulary(), io::stdin().lock());
            Ok(())
        }
        Command::Feedback { guess, answer } => {
            let feedback = compute_feedback(&guess.to_lowercase(), &answer.to_lowercase())?;
            println!("{guess}\n{feedback}\n{}", feedback.to_code());
            Ok(())
        }
    }
}
