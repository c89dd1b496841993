use clap::Parser;
use plan_simulator::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate a random answers file for the simulator CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form steps JSON file to answer
    #[arg(default_value = "data/steps.json")]
    steps_path: String,

    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_answers.json")]
    output: String,

    /// Seed for reproducible answers
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let content = fs::read_to_string(&cli.steps_path)?;
    let steps: Vec<FormStep> = serde_json::from_str(&content)?;
    println!(
        "Generating answers for {} steps from '{}'...",
        steps.len(),
        cli.steps_path
    );

    let mut bank = FormData::new();
    for step in &steps {
        let mut count = 0;
        for field in step.fields.iter().filter(|f| f.accepts_answer()) {
            // Optional fields are sometimes left blank
            if !field.required && rng.random_bool(0.2) {
                continue;
            }
            if let Some(value) = generate_answer(&mut rng, field) {
                bank.insert(field.id.clone(), value);
                count += 1;
            }
        }
        println!("-> Step {}: answered {} field(s).", step.step_number, count);
    }

    let json_output = serde_json::to_string_pretty(&bank)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved answers to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_answer(rng: &mut StdRng, field: &FormField) -> Option<AnswerValue> {
    let value = match field.field_type {
        FieldType::Radio | FieldType::Select => {
            AnswerValue::Text(field.options.choose(rng)?.clone())
        }
        FieldType::Checkbox => {
            if field.options.is_empty() {
                return None;
            }
            let amount = rng.random_range(1..=field.options.len());
            let mut picked: Vec<String> = field
                .options
                .choose_multiple(rng, amount)
                .cloned()
                .collect();
            // Keep the order the options are listed in
            picked.sort_by_key(|p| field.options.iter().position(|o| o == p));
            AnswerValue::List(picked)
        }
        FieldType::Date => AnswerValue::Text(format!(
            "{:04}-{:02}-{:02}",
            rng.random_range(1950..=2015),
            rng.random_range(1..=12),
            rng.random_range(1..=28)
        )),
        FieldType::Tel => AnswerValue::Text(format!(
            "(11) 9{:04}-{:04}",
            rng.random_range(0..10_000),
            rng.random_range(0..10_000)
        )),
        FieldType::Email => {
            AnswerValue::Text(format!("lead{}@example.com", rng.random_range(1..10_000)))
        }
        FieldType::Text => AnswerValue::Text(generate_text(rng, field)),
        FieldType::Heading | FieldType::Paragraph | FieldType::Image => return None,
    };
    Some(value)
}

/// Numeric-looking fields get small integers so numeric rules have something to compare.
fn generate_text(rng: &mut StdRng, field: &FormField) -> String {
    let key = format!("{} {}", field.id, field.label).to_lowercase();
    if key.contains("age") || key.contains("idade") {
        rng.random_range(18..=80).to_string()
    } else if key.contains("dependent") {
        rng.random_range(0..=8).to_string()
    } else {
        const NAMES: [&str; 5] = [
            "Maria Silva",
            "João Souza",
            "Ana Oliveira",
            "Carlos Pereira",
            "Beatriz Costa",
        ];
        NAMES.choose(rng).copied().unwrap_or("Cliente").to_string()
    }
}
