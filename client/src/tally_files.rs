use anyhow::{Context, Result};
use common::FsExt;
use log::info;
use samples::{read_samples, sample_files};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tally::{analyze, analyze_by_player, Tally};

/// Resolves the paths given on the command line into the samples files they name.
pub fn resolve_files(paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.relative_to_cwd()?;
        let found = sample_files(&path)
            .with_context(|| format!("Failed to list samples in {:?}", path))?;

        files.extend(found);
    }

    Ok(files)
}

pub fn tally_files(files: &[PathBuf], player: i32) -> Result<Tally> {
    let mut tally = Tally::default();

    for file in files {
        let samples = read_samples(file)
            .with_context(|| format!("Failed to read samples from {:?}", file))?;

        let file_tally = analyze(&samples, player);
        info!(
            "{:?}: {} samples, {} for player {}",
            file,
            samples.len(),
            file_tally.total(),
            player
        );

        tally += file_tally;
    }

    Ok(tally)
}

pub fn tally_files_by_player(files: &[PathBuf]) -> Result<BTreeMap<i32, Tally>> {
    let mut tallies = BTreeMap::<i32, Tally>::new();

    for file in files {
        let samples = read_samples(file)
            .with_context(|| format!("Failed to read samples from {:?}", file))?;

        info!("{:?}: {} samples", file, samples.len());

        for (player, tally) in analyze_by_player(&samples) {
            *tallies.entry(player).or_default() += tally;
        }
    }

    Ok(tallies)
}
