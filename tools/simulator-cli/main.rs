use clap::Parser;
use plan_simulator::prelude::*;
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Walk a plan-simulator form from the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form steps JSON file
    #[arg(default_value = "data/steps.json")]
    steps_path: String,
    /// Path to the health plans JSON file
    #[arg(default_value = "data/plans.json")]
    plans_path: String,
    /// Path to an answers JSON file (field id -> value) to replay non-interactively
    #[arg(short, long)]
    answers: Option<String>,

    /// Stop replaying after this many submissions (guards against looping rules)
    #[arg(long, default_value_t = 100)]
    max_submissions: usize,

    /// Recommend at most this many plans when a step has no curated list
    #[arg(long, default_value_t = 3)]
    max_recommendations: usize,

    /// Run in interactive mode to be prompted for each field
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let source = JsonCatalogSource::new(&cli.steps_path, &cli.plans_path);
    let catalog = Catalog::load(&source)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load catalog: {}", e)));
    println!(
        "Loaded {} steps and {} plans.",
        catalog.len(),
        catalog.plans().len()
    );

    let mut flow = FlowController::builder(catalog)
        .max_recommendations(cli.max_recommendations)
        .build();

    if cli.human {
        run_interactive(&mut flow);
    } else {
        let answers_path = cli.answers.unwrap_or_else(|| {
            exit_with_error("An answers file is required in non-interactive mode (or pass -i).")
        });
        run_replay(&mut flow, &answers_path, cli.max_submissions);
    }

    print_summary(&flow);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "plan_simulator=info,simulator_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Submits, for every step reached, the answers the file holds for that step's fields.
fn run_replay(flow: &mut FlowController, answers_path: &str, max_submissions: usize) {
    let content = fs::read_to_string(answers_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read answers file '{}': {}",
            answers_path, e
        ))
    });
    let bank: FormData = serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse answers JSON: {}", e)));

    let mut submissions = 0;
    while !flow.is_complete() {
        if submissions == max_submissions {
            exit_with_error(&format!(
                "Flow did not complete after {} submissions",
                max_submissions
            ));
        }

        let (title, values) = {
            let step = flow.current_step().unwrap_or_else(|e| {
                exit_with_error(&format!("Sorry, this form is unavailable: {}", e))
            });
            let values: FormData = step
                .fields
                .iter()
                .filter(|f| f.accepts_answer())
                .filter_map(|f| bank.get(&f.id).map(|v| (f.id.clone(), v.clone())))
                .collect();
            (format!("{}. {}", step.step_number, step.title), values)
        };

        println!("\n-> {}", title);
        for (field, value) in &values {
            println!("     {} = {}", field, value);
        }
        let resolution = flow
            .submit_step(values)
            .unwrap_or_else(|e| exit_with_error(&format!("Submission failed: {}", e)));
        print_resolution(&resolution);
        submissions += 1;
    }
}

/// Prompts for every field of the current step until the flow completes.
fn run_interactive(flow: &mut FlowController) {
    println!("--- plan-simulator Interactive Mode ---");
    println!("Type '<' to go back or '!' to start over.");

    while !flow.is_complete() {
        let step = match flow.current_step() {
            Ok(step) => step.clone(),
            Err(e) => exit_with_error(&format!("Sorry, this form is unavailable: {}", e)),
        };
        let progress = flow.progress();
        println!(
            "\n=== [{}/{}] {} ===",
            progress.position, progress.total, step.title
        );
        if let Some(description) = &step.description {
            println!("{}", description);
        }

        let mut values = FormData::new();
        let mut command = None;
        for field in &step.fields {
            if !field.accepts_answer() {
                let text = field.content.as_deref().unwrap_or(&field.label);
                if !text.is_empty() {
                    println!("{}", text);
                }
                continue;
            }
            let previous = flow.state().form_data.get(&field.id);
            let raw = prompt_for_field(field, previous);
            if raw == "<" || raw == "!" {
                command = Some(raw);
                break;
            }
            if let Some(value) = parse_answer(field, &raw) {
                values.insert(field.id.clone(), value);
            }
        }

        match command.as_deref() {
            Some("<") => {
                if let Err(e) = flow.go_previous() {
                    println!("{}", e);
                }
                continue;
            }
            Some(_) => {
                flow.reset();
                continue;
            }
            None => {}
        }

        let missing = flow.missing_required(&values).unwrap_or_default();
        if !missing.is_empty() {
            println!("Please answer: {}", missing.join(", "));
            continue;
        }

        match flow.submit_step(values) {
            Ok(resolution) => print_resolution(&resolution),
            Err(e) => exit_with_error(&format!("Submission failed: {}", e)),
        }
    }
}

fn prompt_for_field(field: &FormField, previous: Option<&AnswerValue>) -> String {
    if field.field_type.is_choice() {
        for (i, option) in field.options.iter().enumerate() {
            println!("  {}: {}", i + 1, option);
        }
        if field.field_type == FieldType::Checkbox {
            println!("  (several allowed, separated by commas)");
        }
    }
    let default = previous.map(|v| v.to_text());
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };
    prompt_for_input(&label, default.as_deref())
}

/// Accepts option numbers or option text for choice fields.
fn parse_answer(field: &FormField, raw: &str) -> Option<AnswerValue> {
    if raw.is_empty() {
        return None;
    }
    let pick = |token: &str| -> String {
        token
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| field.options.get(idx).cloned())
            .unwrap_or_else(|| token.to_string())
    };
    match field.field_type {
        FieldType::Checkbox => Some(AnswerValue::List(
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(pick)
                .collect(),
        )),
        FieldType::Radio | FieldType::Select => Some(AnswerValue::Text(pick(raw))),
        _ => Some(AnswerValue::Text(raw.to_string())),
    }
}

fn print_resolution(resolution: &Resolution) {
    match &resolution.matched {
        Some(matched) => println!(
            "   rule {} (priority {}): {}",
            matched.rule_id, matched.priority, matched.reason
        ),
        None => println!("   no rule matched, continuing in order"),
    }
}

fn print_summary(flow: &FlowController) {
    let state = flow.state();
    println!("\nFlow Finished!");
    match &state.exit {
        Some(FlowExit::Finished { message }) => {
            if let Some(message) = message {
                println!("  -> {}", message);
            }
        }
        Some(FlowExit::Redirect { url, message }) => {
            if let Some(message) = message {
                println!("  -> {}", message);
            }
            println!("  -> Continue at: {}", url);
        }
        None => {}
    }

    println!("\n--- Recommended Plans ---");
    if state.recommendations.is_empty() {
        println!("(none)");
    }
    for plan in &state.recommendations {
        let badge = if plan.is_recommended { " [recomendado]" } else { "" };
        println!("  {} - R$ {}/mês{}", plan.name, plan.monthly_price, badge);
    }

    if let Some(lead) = flow.lead() {
        match serde_json::to_string_pretty(&lead) {
            Ok(json) => println!("\n--- Lead Payload ---\n{}", json),
            Err(e) => eprintln!("Could not serialize lead: {}", e),
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }

    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
