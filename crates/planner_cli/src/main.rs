use clap::{CommandFactory, Parser};
use planner_cli::cli::{Cli, Command};
use planner_core::config::{self, Palette};
use planner_core::error::AppError;
use planner_core::model::Task;
use planner_core::planner::TaskManager;
use planner_core::storage::csv_store;
use std::io::{self, BufRead};

fn print_tasks_plain(tasks: &[Task], palette: &Palette) {
    if tasks.is_empty() {
        println!("No tasks planned.");
        return;
    }

    for (index, task) in tasks.iter().enumerate() {
        let marker = if task.completed { "x" } else { " " };
        let title = if task.completed {
            palette.mutedize(&task.title)
        } else {
            task.title.clone()
        };
        println!(
            "{:>3}. [{}] {} - {}",
            index + 1,
            marker,
            palette.accentize(&task.time),
            title
        );
    }
}

fn print_tasks_json(tasks: &[Task]) {
    let payload: Vec<serde_json::Value> = tasks
        .iter()
        .map(|task| {
            serde_json::json!({
                "title": task.title,
                "time": task.time,
                "completed": task.completed,
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn print_task_json(task: &Task) {
    let json = serde_json::json!({
        "title": task.title,
        "time": task.time,
        "completed": task.completed,
    });
    println!("{}", json);
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        match ch {
            _ if escape => {
                if ch != '"' && ch != '\\' {
                    current.push('\\');
                }
                current.push(ch);
                escape = false;
            }
            '\\' if in_quotes => escape = true,
            '"' => in_quotes = !in_quotes,
            _ if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

// CLI positions are 1-based; the engine indexes from 0.
fn resolve_position(position: usize, len: usize) -> Result<usize, AppError> {
    if position == 0 || position > len {
        return Err(AppError::invalid_input(format!(
            "no task at position {position}"
        )));
    }
    Ok(position - 1)
}

fn run_command(
    cli: Cli,
    manager: &mut TaskManager,
    palette: &Palette,
) -> Result<(), AppError> {
    match cli.command {
        Command::Add { title, time } => {
            if title.trim().is_empty() {
                return Err(AppError::invalid_input("title is required"));
            }

            let task = manager.add_task(&title, &time)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added: {task}");
            }
        }
        Command::List => {
            if cli.json {
                print_tasks_json(manager.get_all_tasks());
            } else {
                print_tasks_plain(manager.get_all_tasks(), palette);
            }
        }
        Command::Done { position } => {
            let index = resolve_position(position, manager.get_all_tasks().len())?;
            manager.toggle_task_by_index(index);
            let task = &manager.get_all_tasks()[index];
            if cli.json {
                print_task_json(task);
            } else {
                println!("Updated: {task}");
            }
        }
        Command::Delete { position } => {
            let index = resolve_position(position, manager.get_all_tasks().len())?;
            let task = manager.get_all_tasks()[index].clone();
            manager.delete_task_by_index(index);
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Deleted: {task}");
            }
        }
    }

    Ok(())
}

fn run_interactive(manager: &mut TaskManager, palette: &Palette) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("dayplan".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, manager, palette) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn bootstrap() -> (TaskManager, Palette) {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = &loaded.error {
        eprintln!("WARN: {err}");
    }

    let palette = config::palette_for_theme(loaded.config.theme.as_deref());
    let store = csv_store::store_path(loaded.config.store_path.as_deref());
    let mut manager = TaskManager::new(store);

    // Best-effort load: a broken store must not block startup.
    if let Err(err) = manager.load_from_file() {
        eprintln!("WARN: could not load tasks: {err}");
    }

    (manager, palette)
}

fn save_best_effort(manager: &TaskManager) {
    if let Err(err) = manager.save_to_file() {
        eprintln!("WARN: could not save tasks: {err}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        let (mut manager, palette) = bootstrap();
        if let Err(err) = run_interactive(&mut manager, &palette) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        save_best_effort(&manager);
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let (mut manager, palette) = bootstrap();
    if let Err(err) = run_command(cli, &mut manager, &palette) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
    save_best_effort(&manager);
}
