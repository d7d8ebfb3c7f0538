mod config;
pub mod models;

pub use config::*;
use models::*;
use serde::de::DeserializeOwned;
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use zip::{ZipArchive, read::ZipFile};

/// Errors produced while reading a GTFS source.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Required GTFS file is missing: {0}")]
    FileMissing(String),
    #[error("Missing any source to pull data from")]
    MissingSource,
}

#[derive(Default)]
pub enum Source {
    #[default]
    None,
    Zip(ZipArchive<File>),
    Directory(PathBuf),
}

/// A GTFS feed read from either a directory of CSV files or a `.zip` archive
/// of one. Ingestion streams rows through a callback rather than
/// buffering the whole file.
#[derive(Default)]
pub struct Gtfs {
    config: Config,
    storage: Source,
}

impl Gtfs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Result<Self, self::Error> {
        let zip_file = File::open(path)?;
        let archive = ZipArchive::new(zip_file)?;
        self.storage = Source::Zip(archive);
        Ok(self)
    }

    pub fn from_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = Source::Directory(path.as_ref().to_path_buf());
        self
    }

    /// Streams a required file. A missing required file is a hard
    /// [`Error::FileMissing`].
    fn stream_required<T, F>(&mut self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &mut self.storage {
            Source::None => Err(self::Error::MissingSource),
            Source::Zip(archive) => stream_from_zip(archive, file_name, f),
            Source::Directory(path) => stream_from_dir(path, file_name, f),
        }
    }

    /// Streams an optional file (pathways/transfers). A missing file is
    /// simply zero rows, not an error.
    fn stream_optional<T, F>(&mut self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &mut self.storage {
            Source::None => Err(self::Error::MissingSource),
            Source::Zip(archive) => match archive.index_for_name(file_name) {
                Some(_) => stream_from_zip(archive, file_name, f),
                None => Ok(()),
            },
            Source::Directory(path) => {
                if path.join(file_name).exists() {
                    stream_from_dir(path, file_name, f)
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn stream_stops<F>(&mut self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStop)),
    {
        let path = self.config.stops_path.clone();
        self.stream_required(&path, f)
    }

    pub fn stream_stop_times<F>(&mut self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStopTime)),
    {
        let path = self.config.stop_times_path.clone();
        self.stream_required(&path, f)
    }

    pub fn stream_trips<F>(&mut self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsTrip)),
    {
        let path = self.config.trips_path.clone();
        self.stream_required(&path, f)
    }

    pub fn stream_routes<F>(&mut self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsRoute)),
    {
        let path = self.config.routes_path.clone();
        self.stream_required(&path, f)
    }

    pub fn stream_pathways<F>(&mut self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsPathway)),
    {
        let path = self.config.pathways_path.clone();
        self.stream_optional(&path, f)
    }

    pub fn stream_transfers<F>(&mut self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsTransfer)),
    {
        let path = self.config.transfers_path.clone();
        self.stream_optional(&path, f)
    }
}

fn stream_from_zip<T, F>(
    archive: &mut ZipArchive<File>,
    file_name: &str,
    mut f: F,
) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let file = get_file_from_zip(archive, file_name)?;
    let mut reader = csv::Reader::from_reader(file);
    for (i, result) in reader.deserialize().enumerate() {
        let record: T = result?;
        f((i, record));
    }
    Ok(())
}

fn stream_from_dir<T, F>(dir_path: &Path, file_name: &str, mut f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let file_path = dir_path.join(file_name);
    let file = fs::File::open(&file_path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            self::Error::FileMissing(file_name.to_string())
        } else {
            self::Error::Io(err)
        }
    })?;

    // BufReader is critical here for speed
    let reader = io::BufReader::with_capacity(128 * 1024, file);
    let mut csv_reader = csv::Reader::from_reader(reader);

    for (i, result) in csv_reader.deserialize().enumerate() {
        let record: T = result?;
        f((i, record));
    }
    Ok(())
}

fn get_file_from_zip<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or_else(|| self::Error::FileMissing(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
