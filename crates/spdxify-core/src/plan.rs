use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::action::{decide, lookup_license, resolve_at, Action, FileRecord};
use crate::config::Config;
use crate::error::Result;
use crate::search::IdentifierSearch;
use crate::selector::FileSelector;

/// Resolved actions for one run, in selection order
#[derive(Debug, Clone, Default)]
pub struct Plan {
    records: Vec<FileRecord>,
}

impl Plan {
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }

    pub fn count(&self, action: Action) -> usize {
        self.records.iter().filter(|r| r.action() == action).count()
    }

    pub fn added(&self) -> usize {
        self.count(Action::Add)
    }

    pub fn skipped(&self) -> usize {
        self.count(Action::Skip)
    }

    pub fn conflicts(&self) -> usize {
        self.count(Action::Conflict)
    }
}

/// Select, search and resolve every file under `root`
pub fn run(
    config: &Config,
    root: &Path,
    license: Option<&str>,
    searcher: &dyn IdentifierSearch,
) -> Result<Plan> {
    let selected = FileSelector::from_config(config).select(root)?;
    let searched = searcher.search_identifiers(root, &config.skip.dirs)?;
    let records = choose_actions(config, root, &selected, &searched, license)?;

    let plan = Plan { records };
    tracing::info!(
        add = plan.added(),
        skip = plan.skipped(),
        conflict = plan.conflicts(),
        "resolved actions"
    );
    Ok(plan)
}

/// Resolve the action for each selected file.
///
/// `license` applies to every file when given; otherwise the per-file lookup
/// runs, and its failure aborts the whole resolution.
pub fn choose_actions(
    config: &Config,
    root: &Path,
    selected: &[String],
    searched: &BTreeMap<String, String>,
    license: Option<&str>,
) -> Result<Vec<FileRecord>> {
    let license = license.filter(|l| !l.is_empty());
    let mut seen = HashSet::with_capacity(selected.len());
    let mut records = Vec::with_capacity(selected.len());

    for name in selected {
        if !seen.insert(name.as_str()) {
            tracing::warn!(file = %name, "duplicate path in selection; keeping first");
            continue;
        }

        let found_id = searched.get(name).map(String::as_str);
        let want_id = match license {
            Some(l) => l.to_string(),
            None => lookup_license(config, name)?,
        };

        let line = if decide(found_id.unwrap_or_default(), &want_id) == Action::Add {
            insertion_line(config, root, name)?
        } else {
            0
        };

        let record = resolve_at(name, found_id, &want_id, line);
        tracing::debug!(file = %name, action = %record.action(), line = record.line(), "resolved");
        records.push(record);
    }

    Ok(records)
}

/// Zero-based line an identifier should be inserted before: 1 when the file's
/// first line starts with its filetype's skip prefix (a shebang), else 0
pub fn insertion_line(config: &Config, root: &Path, name: &str) -> Result<usize> {
    let prefix = match config.filetype_for(name) {
        Some(ft) if !ft.skip_first_if_prefix.is_empty() => ft.skip_first_if_prefix.as_str(),
        _ => return Ok(0),
    };

    // Compare raw bytes; the first line need not be UTF-8
    let mut first = Vec::new();
    BufReader::new(File::open(root.join(name))?).read_until(b'\n', &mut first)?;
    Ok(usize::from(first.starts_with(prefix.as_bytes())))
}
