use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use chrono::Local;

use crate::config::{find_project_root, Config};
use crate::entity::Decision;
use crate::error::{BreadcrumbError, Result};
use crate::export::ExportFormat;
use crate::storage::{FileStorage, StoragePort};
use crate::store::DecisionStore;
use crate::warnings::{check_thresholds, format_warning, Warning};

type FileStore = DecisionStore<FileStorage>;

/// Resolve configuration for the current project and load its store.
fn open_store(data_dir: Option<PathBuf>) -> Result<(Config, FileStore)> {
    let cwd = env::current_dir()?;
    let root = find_project_root(&cwd);

    let mut config = Config::load(&root)?;
    if let Some(dir) = data_dir {
        config.data_dir = cwd.join(dir);
    }

    let storage = FileStorage::new(config.data_dir_in(&root));
    let mut store = DecisionStore::with_key(storage, config.storage_key.clone());
    store.load()?;

    Ok((config, store))
}

/// Print queued and threshold warnings to stderr.
fn report_warnings<S: StoragePort>(store: &mut DecisionStore<S>) {
    let mut warnings = store.take_warnings();
    warnings.extend(check_thresholds(store.len()));
    for warning in &warnings {
        eprintln!("{}", format_warning(warning));
    }
}

/// Fail when the last mutation could not be saved.
///
/// The process exits right after the command, so an unsaved change is lost.
/// Any other queued warnings are printed to stderr.
fn ensure_persisted<S: StoragePort>(store: &mut DecisionStore<S>) -> Result<()> {
    let mut failure = None;
    let mut rest = Vec::new();
    for warning in store.take_warnings() {
        match warning {
            Warning::PersistFailed {
                key,
                attempts,
                message,
            } => {
                failure = Some(format!(
                    "could not save '{}' after {} attempts ({}). Nothing was changed.",
                    key, attempts, message
                ));
            }
            other => rest.push(other),
        }
    }

    match failure {
        Some(message) => Err(BreadcrumbError::Storage(message)),
        None => {
            for warning in &rest {
                eprintln!("{}", format_warning(warning));
            }
            Ok(())
        }
    }
}

/// "Oct 17 · 3:04 pm" in local time.
fn format_timestamp(decision: &Decision) -> String {
    decision
        .created_at_utc()
        .with_timezone(&Local)
        .format("%b %-d · %-I:%M %P")
        .to_string()
}

fn print_decisions(decisions: &[Decision]) {
    for d in decisions {
        println!("  {} ({}) {}", format_timestamp(d), d.short_id(), d.decision);
        if !d.context.is_empty() {
            println!("      {}", d.context);
        }
    }
}

pub fn handle_add(
    data_dir: Option<PathBuf>,
    decision: String,
    context: String,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let (_config, mut store) = open_store(data_dir)?;

    let context = if stdin {
        if atty::is(atty::Stream::Stdin) {
            return Err(BreadcrumbError::Config(
                "--stdin expects the context to be piped in".to_string(),
            ));
        }
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        context
    };

    let added = store.add(&decision, &context)?;
    ensure_persisted(&mut store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        println!("Logged decision {} - {}", added.short_id(), added.decision);
    }

    report_warnings(&mut store);
    Ok(())
}

pub fn handle_list(data_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let (_config, mut store) = open_store(data_dir)?;
    let decisions = store.decisions();

    if json {
        println!("{}", serde_json::to_string_pretty(decisions)?);
    } else if decisions.is_empty() {
        println!("No decisions yet.");
    } else {
        println!("Decisions:\n");
        print_decisions(decisions);
    }

    report_warnings(&mut store);
    Ok(())
}

pub fn handle_search(data_dir: Option<PathBuf>, query: String, json: bool) -> Result<()> {
    let (_config, mut store) = open_store(data_dir)?;
    let results = store.search(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No decisions match '{}'.", query);
    } else {
        println!("Search results for '{}':\n", query);
        print_decisions(&results);
    }

    report_warnings(&mut store);
    Ok(())
}

pub fn handle_delete(data_dir: Option<PathBuf>, id: String) -> Result<()> {
    let (_config, mut store) = open_store(data_dir)?;

    let target = match store.resolve_id(&id) {
        Ok(d) => d.clone(),
        Err(BreadcrumbError::DecisionNotFound(_)) => {
            println!("No decision with id '{}'. Nothing deleted.", id);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    store.delete(&target.id)?;
    ensure_persisted(&mut store)?;
    println!("Deleted decision {} - {}", target.short_id(), target.decision);

    report_warnings(&mut store);
    Ok(())
}

pub fn handle_export(data_dir: Option<PathBuf>, format: String, out: Option<PathBuf>) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let (config, mut store) = open_store(data_dir)?;

    if store.is_empty() {
        println!("No decisions to export.");
        return Ok(());
    }

    let export = match format {
        ExportFormat::Json => store.export_json()?,
        ExportFormat::Markdown => store.export_markdown(),
    };
    let dir = out.unwrap_or(config.export_dir);
    let path = export.write_to(&dir)?;

    println!(
        "Exported {} decisions as {} to {}",
        store.len(),
        format,
        path.display()
    );

    report_warnings(&mut store);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_ensure_persisted_after_successful_write() {
        let storage = MemoryStorage::new();
        let mut store = DecisionStore::open(&storage).unwrap();
        store.add("Saved", "").unwrap();

        assert!(ensure_persisted(&mut store).is_ok());
    }

    #[test]
    fn test_ensure_persisted_fails_on_lost_write() {
        let storage = MemoryStorage::new();
        let mut store = DecisionStore::open(&storage).unwrap();
        storage.fail_next_writes(2);
        store.add("Never saved", "").unwrap();

        match ensure_persisted(&mut store) {
            Err(BreadcrumbError::Storage(message)) => {
                assert!(message.contains("breadcrumb-decisions"));
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("Expected storage error, got {:?}", other),
        }
        assert!(store.take_warnings().is_empty());
    }
}
