//! Append-only profile history.
//!
//! Every saved calculation is appended as one JSON line to a history
//! file. Writers take an exclusive lock, readers a shared one, so
//! several processes can log to the same file safely.

use crate::metrics::Sex;
use crate::report::BmiReport;
use crate::units::{HeightInput, HeightUnit, WeightUnit};
use crate::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One saved calculation: raw inputs, report fields and save time
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: HeightInput,
    pub height_unit: HeightUnit,
    #[serde(flatten)]
    pub report: BmiReport,
    pub saved_at: DateTime<Utc>,
}

impl ProfileRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        age: u32,
        sex: Sex,
        weight: f64,
        weight_unit: WeightUnit,
        height: HeightInput,
        height_unit: HeightUnit,
        report: &BmiReport,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            sex,
            weight,
            weight_unit,
            height,
            height_unit,
            report: report.clone(),
            saved_at: Utc::now(),
        }
    }
}

/// Destination for saved profiles
pub trait ProfileSink {
    fn append(&mut self, record: &ProfileRecord) -> Result<()>;
}

/// JSONL-based history with file locking
pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl ProfileSink for JsonlHistory {
    fn append(&mut self, record: &ProfileRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended profile {} to {:?}", record.id, self.path);
        Ok(())
    }
}

/// Read every saved profile, oldest first.
///
/// A missing file is an empty history. Lines that fail to parse are
/// logged and skipped.
pub fn read_profiles(path: &Path) -> Result<Vec<ProfileRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut reader = BufReader::new(&file);
    let mut profiles = Vec::new();
    let mut buf = Vec::new();
    let mut line_num = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_num += 1;

        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<ProfileRecord>(&buf) {
            Ok(record) => profiles.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse profile at line {}: {}", line_num, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} profiles from {:?}", profiles.len(), path);
    Ok(profiles)
}

/// The last `limit` profiles, newest first
pub fn recent_profiles(profiles: &[ProfileRecord], limit: usize) -> Vec<&ProfileRecord> {
    profiles.iter().rev().take(limit).collect()
}
