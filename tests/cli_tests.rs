//! CLI subcommands run against a catalog file and in-memory or file state.

mod common;

use common::{sample_catalog, write_catalog};
use fontpair::cli::{Commands, execute};
use fontpair::selection::{HEADING_CATEGORY_KEY, HEADING_FONT_KEY, ListKind};
use fontpair::storage::{FileStorage, MemoryStorage, StateStorage};
use fontpair_config::Config;
use std::path::Path;

fn config_for(catalog: &Path) -> Config {
    Config::default().with_catalog_source(catalog.display().to_string())
}

fn run(command: Commands, config: &Config, storage: Box<dyn StateStorage>) -> String {
    let mut out = Vec::new();
    execute(&command, config, storage, &mut out).expect("command should succeed");
    String::from_utf8(out).expect("output is UTF-8")
}

#[test]
fn test_categories() {
    let (_dir, catalog) = write_catalog(sample_catalog());
    let output = run(
        Commands::Categories,
        &config_for(&catalog),
        Box::new(MemoryStorage::new()),
    );
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("display"));
    assert!(lines[0].ends_with("25 fonts"));
    assert!(lines[2].starts_with("serif"));
    assert!(lines[2].ends_with("45 fonts"));
}

#[test]
fn test_list_pages() {
    let (_dir, catalog) = write_catalog(sample_catalog());
    let config = config_for(&catalog);

    let output = run(
        Commands::List {
            list: ListKind::Body,
            category: Some("serif".into()),
            pages: 2,
        },
        &config,
        Box::new(MemoryStorage::new()),
    );
    assert!(output.starts_with("Showing 40 of 45 fonts\n"));
    assert!(output.contains("Serif Font 39"));
    assert!(!output.contains("Serif Font 40"));
    assert!(!output.contains("You've reached the end"));

    let output = run(
        Commands::List {
            list: ListKind::Body,
            category: Some("serif".into()),
            pages: 5,
        },
        &config,
        Box::new(MemoryStorage::new()),
    );
    assert!(output.starts_with("Showing 45 of 45 fonts\n"));
    assert!(output.ends_with("You've reached the end of the serif fonts\n"));
}

#[test]
fn test_list_unknown_category_fails() {
    let (_dir, catalog) = write_catalog(sample_catalog());
    let mut out = Vec::new();
    let result = execute(
        &Commands::List {
            list: ListKind::Heading,
            category: Some("gothic".into()),
            pages: 1,
        },
        &config_for(&catalog),
        Box::new(MemoryStorage::new()),
        &mut out,
    );
    assert!(result.is_err());
}

#[test]
fn test_search() {
    let (_dir, catalog) = write_catalog(sample_catalog());
    let config = config_for(&catalog);

    let output = run(
        Commands::Search {
            query: "lob".into(),
            list: ListKind::Heading,
        },
        &config,
        Box::new(MemoryStorage::new()),
    );
    assert_eq!(
        output.lines().next(),
        Some("Found 1 fonts matching \"lob\" across all categories")
    );
    assert!(output.contains("Lobster"));
    assert!(output.contains("• handwriting"));

    let output = run(
        Commands::Search {
            query: "qqq".into(),
            list: ListKind::Heading,
        },
        &config,
        Box::new(MemoryStorage::new()),
    );
    assert_eq!(output, "No fonts found matching \"qqq\"\n");

    let mut out = Vec::new();
    let short = execute(
        &Commands::Search {
            query: "lo".into(),
            list: ListKind::Heading,
        },
        &config,
        Box::new(MemoryStorage::new()),
        &mut out,
    );
    assert!(short.is_err());
}

#[test]
fn test_select_persists_and_status_restores() {
    let (dir, catalog) = write_catalog(sample_catalog());
    let config = config_for(&catalog);
    let state = dir.path().join("state.yaml");

    let output = run(
        Commands::Select {
            list: ListKind::Heading,
            family: "Serif Font 33".into(),
        },
        &config,
        Box::new(FileStorage::open(&state)),
    );
    assert_eq!(output, "Heading font set to Serif Font 33 (serif)\n");

    let stored = FileStorage::open(&state);
    assert_eq!(stored.get(HEADING_FONT_KEY).as_deref(), Some("Serif Font 33"));
    assert_eq!(stored.get(HEADING_CATEGORY_KEY).as_deref(), Some("serif"));

    let output = run(Commands::Status, &config, Box::new(FileStorage::open(&state)));
    assert!(output.contains("95 fonts, 3 categories"));
    assert!(output.contains("Heading: Serif Font 33 [serif, #34]"));
    assert!(output.contains("Body: Not selected [display]"));
}

#[test]
fn test_select_unknown_font_fails() {
    let (_dir, catalog) = write_catalog(sample_catalog());
    let mut out = Vec::new();
    let result = execute(
        &Commands::Select {
            list: ListKind::Body,
            family: "Comic Sans".into(),
        },
        &config_for(&catalog),
        Box::new(MemoryStorage::new()),
        &mut out,
    );
    assert!(result.is_err());
}

#[test]
fn test_read_only_commands_do_not_write_state() {
    let (dir, catalog) = write_catalog(sample_catalog());
    let state = dir.path().join("state.yaml");
    run(
        Commands::List {
            list: ListKind::Heading,
            category: Some("serif".into()),
            pages: 1,
        },
        &config_for(&catalog),
        Box::new(FileStorage::open(&state)),
    );
    assert_eq!(FileStorage::open(&state).get(HEADING_CATEGORY_KEY), None);
}

#[test]
fn test_clear_forgets_saved_selection() {
    let (dir, catalog) = write_catalog(sample_catalog());
    let config = config_for(&catalog);
    let state = dir.path().join("state.yaml");

    run(
        Commands::Select {
            list: ListKind::Heading,
            family: "Lobster".into(),
        },
        &config,
        Box::new(FileStorage::open(&state)),
    );
    let output = run(
        Commands::Clear {
            list: ListKind::Heading,
        },
        &config,
        Box::new(FileStorage::open(&state)),
    );
    assert_eq!(output, "Heading selection cleared\n");

    let stored = FileStorage::open(&state);
    assert_eq!(stored.get(HEADING_FONT_KEY), None);
    assert_eq!(stored.get(HEADING_CATEGORY_KEY), None);

    let output = run(Commands::Status, &config, Box::new(FileStorage::open(&state)));
    assert!(output.contains("Heading: Not selected [display]"));
}
