pub mod analytics;
pub mod catalog;
pub mod journal;
pub mod models;
pub mod navigation;
pub mod overlap;
pub mod resources;
pub mod settings;
pub mod timer;
pub mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use catalog::catalog;
use journal::ReadingJournal;
use overlap::ComparisonSort;
use settings::SettingsStore;

pub use utils::init_logging;

/// Directory for user settings: `CHOLOCK_DATA_DIR`, else a folder under the temp dir.
pub fn data_dir() -> PathBuf {
    std::env::var_os("CHOLOCK_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("cholock"))
}

/// Open the journal over the bundled catalog and print a comparison report for
/// every choseo written by the first reader.
pub fn run() -> Result<()> {
    init_logging();
    info!("CHO_LOCK starting up...");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(async {
        let settings = SettingsStore::new(data_dir().join("settings.json"))?;
        let journal = ReadingJournal::new(catalog().await?, settings);

        let Some(me) = journal.catalog().readers.first().cloned() else {
            info!("Catalog has no readers; nothing to compare");
            return Ok(());
        };

        let mine: Vec<String> = journal
            .catalog()
            .choseos
            .iter()
            .filter(|choseo| choseo.reader == me)
            .map(|choseo| choseo.id.clone())
            .collect();

        for choseo_id in mine {
            let entries = journal
                .compare(&choseo_id, ComparisonSort::MostSimilar)
                .await?;
            println!("{} ({})", choseo_id, me.nickname);
            for entry in entries {
                println!(
                    "  {:>3}% {:<8} {}: {}",
                    entry.badge.percent,
                    entry.badge.label,
                    entry.comparison.candidate.reader.nickname,
                    entry.comparison.candidate.quote
                );
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}
