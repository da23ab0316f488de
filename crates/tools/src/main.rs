use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wordmaze_core::{Dictionary, InputJournal, ReplayResult, replay_to_end};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Word list JSON (`{ "words": [...] }`); the built-in list is used when omitted
    #[arg(short, long)]
    dictionary: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let result = replay_file(&args.journal, args.dictionary.as_deref())?;

    println!("Replay complete.");
    println!("Final Time: {} ms", result.final_time_ms);
    println!("Outcome: {:?}", result.final_status);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}

fn replay_file(journal_path: &Path, dictionary_path: Option<&Path>) -> Result<ReplayResult> {
    let journal_data = fs::read_to_string(journal_path)
        .with_context(|| format!("Failed to read journal file: {}", journal_path.display()))?;
    let journal = InputJournal::from_json_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;
    let dictionary = load_dictionary(dictionary_path)?;

    replay_to_end(&journal, &dictionary).context("Replay failed during execution")
}

fn load_dictionary(path: Option<&Path>) -> Result<Dictionary> {
    let Some(path) = path else {
        log::info!("using built-in word list");
        return Ok(Dictionary::builtin());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list: {}", path.display()))?;
    let dictionary = Dictionary::from_json_str(&source)
        .with_context(|| format!("Failed to load word list: {}", path.display()))?;
    log::info!("loaded {} words from {}", dictionary.word_count(), path.display());
    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use wordmaze_core::{GameConfig, InputEvent, SessionStatus};

    use super::*;

    fn standard_config() -> GameConfig {
        GameConfig::from_toml_str(include_str!("../../../config/standard.toml"))
            .expect("standard config is valid")
    }

    #[test]
    fn replays_a_journal_written_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let journal_path = dir.path().join("run.json");
        let mut journal = InputJournal::new(standard_config(), 16, 2_000);
        journal.append(0, InputEvent::Char('e'));
        journal.append(500, InputEvent::DeleteChar);
        fs::write(&journal_path, journal.to_json_string().expect("serializes")).expect("write");

        let from_file = replay_file(&journal_path, None).expect("replay from file");
        let in_memory = replay_to_end(&journal, &Dictionary::builtin()).expect("replay in memory");
        assert_eq!(from_file, in_memory);
        assert_eq!(from_file.final_status, SessionStatus::Active);
    }

    #[test]
    fn custom_word_list_is_loaded_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let words_path = dir.path().join("words.json");
        fs::write(&words_path, r#"{ "words": ["lava", "maze", "type"] }"#).expect("write");

        let dictionary = load_dictionary(Some(&words_path)).expect("word list loads");
        assert_eq!(dictionary.word_count(), 3);
    }

    #[test]
    fn missing_journal_reports_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.json");
        let err = replay_file(&missing, None).expect_err("missing file must fail");
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
