//! Demo wiring for emergent structure via survival pressure.
//!
//! Everything here is illustrative glue around the core loop: load a token
//! table, stand in for an external vector service with the in-memory
//! backend, show a few pre-training samples, train, show samples again.
//!
//! Usage:
//!   seqcull [tokens.json]
//!
//! The optional file holds an array of
//!   { "token_id": 2, "token_string": "jake", "token_type": "word" }
//! records; without it a small built-in table is used.

use hashbrown::HashMap;
use serde::Deserialize;
use tracing::info;

use seqcull::coherence::{survives, DEFAULT_SURVIVAL_THRESHOLD};
use seqcull::prng::Prng;
use seqcull::provider::{MemoryVectorBackend, VectorProvider};
use seqcull::token::TokenId;
use seqcull::trainer::{generate_sequence, run_training, RunStats, TrainConfig};

#[derive(Debug, Clone, Deserialize)]
struct TokenRecord {
    token_id: TokenId,
    token_string: String,
    #[allow(dead_code)]
    token_type: String,
}

fn builtin_tokens() -> Vec<TokenRecord> {
    let table = [
        (0, "<BOS>", "special"),
        (1, "<EOS>", "special"),
        (2, "<UNK>", "special"),
        (3, "jake", "word"),
        (4, "started", "word"),
        (5, "the", "word"),
        (6, "car", "word"),
        (7, "dog", "word"),
        (8, "saw", "word"),
        (9, "a", "word"),
        (10, "ran", "word"),
        (11, ".", "punct"),
        (12, ",", "punct"),
    ];
    table
        .iter()
        .map(|&(token_id, s, ty)| TokenRecord {
            token_id,
            token_string: s.to_string(),
            token_type: ty.to_string(),
        })
        .collect()
}

fn load_tokens(path: &str) -> Result<Vec<TokenRecord>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn render(seq: &[TokenId], id_to_str: &HashMap<TokenId, String>) -> String {
    seq.iter()
        .map(|t| id_to_str.get(t).map(String::as_str).unwrap_or("<?>"))
        .collect::<Vec<_>>()
        .join(" ")
}

// Extremely plain tokenization: lowercase split + punctuation isolation.
fn parse_input(text: &str, str_to_id: &HashMap<String, TokenId>) -> Vec<TokenId> {
    let flat = text.to_lowercase().replace('.', " . ").replace(',', " , ");
    flat.split_whitespace()
        .map(|tok| {
            str_to_id
                .get(tok)
                .or_else(|| str_to_id.get("<UNK>"))
                .copied()
                .unwrap_or(2)
        })
        .collect()
}

fn show_samples(
    label: &str,
    count: usize,
    vocab: &[TokenId],
    provider: &dyn VectorProvider,
    id_to_str: &HashMap<TokenId, String>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n{label}:");
    // Fixed sampling seed so before/after use the same draw sequence.
    let mut rng = Prng::new(3);
    for i in 0..count {
        let seq = generate_sequence(vocab, 8, &mut rng)?;
        let (ok, score) = survives(&seq, DEFAULT_SURVIVAL_THRESHOLD, provider)?;
        println!("  [{i}] {}", render(&seq, id_to_str));
        println!("      coherence={score:.3} survive={ok}");
    }
    Ok(())
}

fn print_help() {
    println!("seqcull - emergent structure via survival pressure");
    println!();
    println!("Usage:");
    println!("  seqcull               run the demo with the built-in token table");
    println!("  seqcull tokens.json   run the demo with a token table from a JSON file");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return Ok(());
    }

    let tokens = if args.len() >= 2 {
        load_tokens(&args[1])?
    } else {
        builtin_tokens()
    };

    let vocab: Vec<TokenId> = tokens.iter().map(|t| t.token_id).collect();
    let id_to_str: HashMap<TokenId, String> = tokens
        .iter()
        .map(|t| (t.token_id, t.token_string.clone()))
        .collect();
    let str_to_id: HashMap<String, TokenId> = tokens
        .iter()
        .map(|t| (t.token_string.clone(), t.token_id))
        .collect();

    // Demo stand-in for the external vector service.
    let mut backend = MemoryVectorBackend::new(&vocab, 12, 42);

    let user_input = "Jake started the car.";
    let encoded = parse_input(user_input, &str_to_id);
    println!("Input: {user_input}");
    println!("Encoded input: {encoded:?}");

    show_samples("Before training", 3, &vocab, &backend, &id_to_str)?;

    let cfg = TrainConfig {
        steps: 250,
        max_len: 8,
        seed: 11,
        ..TrainConfig::default()
    };
    info!(
        "training: steps={} max_len={} seed={}",
        cfg.steps, cfg.max_len, cfg.seed
    );
    let history = run_training(&vocab, &cfg, &mut backend)?;

    let stats = RunStats::from_history(&history);
    info!(
        "training finished: survivors={}/{} survival_rate={:.3} mean_coherence={:.3}",
        stats.survivors,
        stats.episodes,
        stats.survival_rate(),
        stats.mean_coherence()
    );

    show_samples("After training", 5, &vocab, &backend, &id_to_str)?;

    Ok(())
}
