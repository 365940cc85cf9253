use std::io::{self, Write};
use timetable_widget::render::render_view;
use timetable_widget::{
    JsonFileStore, KeyValueStore, MemoryStore, SelectedFile, TimetableWidget, WidgetConfig,
};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!(
        "Commands:\n  help                 Show this help\n  show                 Show the timetable panel\n  state                Show which timetable kind is stored\n  upload <path>        Upload a CSV file or an image\n  remove               Remove the stored timetable\n  expand               Toggle the expanded view\n  close                Close the expanded view\n  next                 Next day (slider)\n  prev                 Previous day (slider)\n  quit|exit            Exit"
    );
}

fn print_usage() {
    println!("Usage: cli [STORE_PATH] [--config CONFIG_JSON]");
    println!("  STORE_PATH ending in .db/.sqlite/.sqlite3 uses SQLite, any other path a JSON file.");
    println!("  Without STORE_PATH the timetable is kept in memory only.");
}

struct Args {
    store_path: Option<String>,
    config_path: Option<String>,
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut args = Args {
        store_path: None,
        config_path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--config" => match iter.next() {
                Some(path) => args.config_path = Some(path),
                None => return Err("--config needs a path".into()),
            },
            other if other.starts_with("--") => return Err(format!("unknown option '{other}'")),
            other => {
                if args.store_path.is_some() {
                    return Err(format!("unexpected argument '{other}'"));
                }
                args.store_path = Some(other.to_string());
            }
        }
    }
    Ok(Some(args))
}

#[cfg(feature = "sqlite")]
fn is_sqlite_path(path: &str) -> bool {
    matches!(
        std::path::Path::new(path).extension().and_then(|e| e.to_str()),
        Some("db" | "sqlite" | "sqlite3")
    )
}

fn show<S: KeyValueStore>(widget: &TimetableWidget<S>) {
    print!("{}", render_view(&widget.view(), widget.config().panel_rows));
}

fn run<S: KeyValueStore>(mut widget: TimetableWidget<S>) {
    println!("Timetable (CLI) - type 'help' for commands\n");
    show(&widget);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => show(&widget),
            "state" => println!("State: {}", widget.state().as_str()),
            "upload" => {
                if rest.is_empty() {
                    println!("Usage: upload <path>");
                    continue;
                }
                let file = match SelectedFile::from_path(rest) {
                    Ok(file) => file,
                    Err(e) => {
                        println!("Error reading {}: {}", rest, e);
                        continue;
                    }
                };
                match widget.upload(&file) {
                    Ok(artifact) => {
                        println!("Uploaded {} as {}.", file.name, artifact.kind());
                        show(&widget);
                    }
                    Err(e) => println!("Upload failed: {}", e),
                }
            }
            "remove" => match widget.remove() {
                Ok(()) => {
                    println!("Timetable removed.");
                    show(&widget);
                }
                Err(e) => println!("Error removing timetable: {}", e),
            },
            "expand" => {
                if widget.artifact().is_none() {
                    println!("Nothing to expand; upload a timetable first.");
                    continue;
                }
                widget.toggle_expand();
                show(&widget);
            }
            "close" => {
                widget.close_expanded();
                show(&widget);
            }
            "next" => {
                widget.next_day();
                show(&widget);
            }
            "prev" => {
                widget.previous_day();
                show(&widget);
            }
            other => {
                println!("Unknown command '{}'. Type 'help' for commands.", other);
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("timetable_widget=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            std::process::exit(2);
        }
    };

    let config = match &args.config_path {
        Some(path) => match WidgetConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => WidgetConfig::default(),
    };

    match args.store_path {
        None => run(TimetableWidget::mount(MemoryStore::new(), config)),
        #[cfg(feature = "sqlite")]
        Some(path) if is_sqlite_path(&path) => match timetable_widget::SqliteStore::new(&path) {
            Ok(store) => run(TimetableWidget::mount(store, config)),
            Err(e) => {
                eprintln!("Error opening {}: {}", path, e);
                std::process::exit(1);
            }
        },
        Some(path) => match JsonFileStore::open(&path) {
            Ok(store) => run(TimetableWidget::mount(store, config)),
            Err(e) => {
                eprintln!("Error opening {}: {}", path, e);
                std::process::exit(1);
            }
        },
    }
}
