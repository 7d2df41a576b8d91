use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Lines, Read, Write};
use std::path::{Path, PathBuf};
use tally::TrainingSample;

use super::SampleError;

const CURRENT_PLAYER: &str = "current_player";
const VALUE: &str = "value";

/// Reads training samples from a JSON lines file, one sample per line.
pub struct SampleFileReader {
    lines: Lines<BufReader<Box<dyn Read>>>,
    line: usize,
}

impl SampleFileReader {
    /// Opens a samples file. Files with a `.gz` extension are decompressed while reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let reader: Box<dyn Read> = if is_gz(path) {
            debug!("Opening compressed samples file {:?}", path);
            Box::new(MultiGzDecoder::new(file))
        } else {
            debug!("Opening samples file {:?}", path);
            Box::new(file)
        };

        Ok(Self::from_reader(reader))
    }

    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        let reader: Box<dyn Read> = Box::new(reader);

        Self {
            lines: BufReader::new(reader).lines(),
            line: 0,
        }
    }
}

impl Iterator for SampleFileReader {
    type Item = Result<TrainingSample, SampleError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line += 1;

            let line = match next {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };

            if line.trim().is_empty() {
                continue;
            }

            return Some(parse_sample(&line, self.line));
        }
    }
}

/// Parses a single line of a samples file. `line` is only used to annotate errors.
pub fn parse_sample(text: &str, line: usize) -> Result<TrainingSample, SampleError> {
    let json: Value = serde_json::from_str(text).map_err(|err| SampleError::Malformed {
        line,
        reason: err.to_string(),
    })?;

    let object = json.as_object().ok_or_else(|| SampleError::Malformed {
        line,
        reason: "expected a JSON object".to_string(),
    })?;

    let current_player = object.get(CURRENT_PLAYER).ok_or(SampleError::MissingField {
        line,
        field: CURRENT_PLAYER,
    })?;

    if !current_player
        .as_i64()
        .is_some_and(|p| i32::try_from(p).is_ok())
    {
        return Err(SampleError::TypeMismatch {
            line,
            field: CURRENT_PLAYER,
            expected: "an integer player id",
        });
    }

    let value = object.get(VALUE).ok_or(SampleError::MissingField {
        line,
        field: VALUE,
    })?;

    if !value.is_number() {
        return Err(SampleError::TypeMismatch {
            line,
            field: VALUE,
            expected: "a number",
        });
    }

    serde_json::from_value(json).map_err(|err| SampleError::Malformed {
        line,
        reason: err.to_string(),
    })
}

/// Reads every sample of a file, stopping at the first invalid line.
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<TrainingSample>, SampleError> {
    SampleFileReader::open(path)?.collect()
}

/// Expands a directory into the samples files directly inside it. A file path is returned as is.
pub fn sample_files(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, SampleError> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = fs::read_dir(path)?
        .flatten()
        .filter(|p| p.file_type().is_ok_and(|p| p.is_file()))
        .map(|p| p.path())
        .filter(|p| is_gz(p) || p.extension().is_some_and(|ext| ext == "jsonl"))
        .collect::<Vec<_>>();

    files.sort();

    Ok(files)
}

enum SampleSink {
    Plain(BufWriter<File>),
    Compressed(GzEncoder<BufWriter<File>>),
}

/// Writes training samples as JSON lines in the layout `SampleFileReader` expects.
pub struct SampleFileWriter {
    sink: SampleSink,
}

impl SampleFileWriter {
    /// Creates the file, or appends to it when `append` is set. `.gz` files are compressed.
    pub fn create(path: impl AsRef<Path>, append: bool) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;

        let file = BufWriter::new(file);
        let sink = if is_gz(path) {
            SampleSink::Compressed(GzEncoder::new(file, Compression::default()))
        } else {
            SampleSink::Plain(file)
        };

        debug!("Writing samples to {:?}, append: {}", path, append);

        Ok(Self { sink })
    }

    /// Fails for NaN or infinite values, which JSON can not hold.
    pub fn write(&mut self, sample: &TrainingSample) -> Result<(), SampleError> {
        if !sample.value.is_finite() {
            return Err(SampleError::NonFiniteValue(sample.value));
        }

        let writer: &mut dyn Write = match &mut self.sink {
            SampleSink::Plain(w) => w,
            SampleSink::Compressed(w) => w,
        };

        serde_json::to_writer(&mut *writer, sample).map_err(SampleError::Write)?;
        writer.write_all(b"\n")?;

        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, samples: I) -> Result<(), SampleError>
    where
        I: IntoIterator<Item = &'a TrainingSample>,
    {
        for sample in samples {
            self.write(sample)?;
        }

        Ok(())
    }

    /// Flushes the samples to disk, ending the gzip stream for compressed files.
    pub fn finish(self) -> Result<(), SampleError> {
        match self.sink {
            SampleSink::Plain(mut w) => w.flush()?,
            SampleSink::Compressed(w) => w.finish()?.flush()?,
        }

        Ok(())
    }
}

fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}
