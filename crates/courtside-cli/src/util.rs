use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use courtside_core::{Athlete, Drill, GameRecord, PracticeCategory, TrainingSample};
use courtside_recommender::{Forest, Regimen};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        if let Output::File { path, .. } = &output {
            eprintln!("Saved to {}", path.display());
        }
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads game records and rejects any line with more makes than attempts.
pub fn read_game_records_file<P>(path: P) -> anyhow::Result<Vec<GameRecord>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let records: Vec<GameRecord> = read_json_file("game records", path)?;
    for record in &records {
        record
            .validate()
            .with_context(|| format!("Invalid game record in {}", path.display()))?;
    }
    Ok(records)
}

pub fn read_drills_file<P>(path: P) -> anyhow::Result<Vec<Drill>>
where
    P: AsRef<Path>,
{
    read_json_file("drills", path)
}

pub fn read_athletes_file<P>(path: P) -> anyhow::Result<Vec<Athlete>>
where
    P: AsRef<Path>,
{
    read_json_file("athletes", path)
}

pub fn read_practices_file<P>(path: P) -> anyhow::Result<Vec<PracticeCategory>>
where
    P: AsRef<Path>,
{
    read_json_file("practices", path)
}

/// Reads training samples, rejecting unlabeled samples and out-of-range features.
pub fn read_training_samples_file<P>(path: P) -> anyhow::Result<Vec<TrainingSample>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let samples: Vec<TrainingSample> = read_json_file("training samples", path)?;
    for (i, sample) in samples.iter().enumerate() {
        sample
            .validate()
            .with_context(|| format!("Invalid training sample #{i} in {}", path.display()))?;
    }
    Ok(samples)
}

pub fn read_regimen_file<P>(path: P) -> anyhow::Result<Regimen>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let regimen: Regimen = read_json_file("regimen", path)?;
    regimen
        .validate()
        .with_context(|| format!("Invalid regimen in {}", path.display()))?;
    Ok(regimen)
}

pub fn read_forest_file<P>(path: P) -> anyhow::Result<Forest>
where
    P: AsRef<Path>,
{
    read_json_file("forest", path)
}

/// Seeded generator when `seed` is given, otherwise seeded from the thread RNG.
pub fn make_rng(seed: Option<u64>) -> Pcg64Mcg {
    match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    }
}
