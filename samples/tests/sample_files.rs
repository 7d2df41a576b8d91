use std::fs;

use samples::{read_samples, sample_files, SampleError, SampleFileReader, SampleFileWriter};
use tally::{analyze, analyze_default, Tally, TrainingSample};
use tempfile::tempdir;

fn game() -> Vec<TrainingSample> {
    vec![
        TrainingSample::new(1, 0.5).with_position(
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0]],
            vec![0.1, 0.1, 0.1, 0.1, 0.2, 0.1, 0.1, 0.1, 0.1],
        ),
        TrainingSample::new(-1, -0.45),
        TrainingSample::new(1, 0.0),
        TrainingSample::new(-1, -0.9),
    ]
}

#[test]
fn plain_and_compressed_files_hold_the_same_samples() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("games.jsonl");
    let compressed = dir.path().join("games.jsonl.gz");

    for path in [&plain, &compressed] {
        let mut writer = SampleFileWriter::create(path, false).unwrap();
        writer.write_all(&game()).unwrap();
        writer.finish().unwrap();
    }

    assert_eq!(read_samples(&plain).unwrap(), game());
    assert_eq!(read_samples(&compressed).unwrap(), game());
}

#[test]
fn append_keeps_earlier_samples() {
    let dir = tempdir().unwrap();

    for name in ["games.jsonl", "games.jsonl.gz"] {
        let path = dir.path().join(name);

        for _ in 0..2 {
            let mut writer = SampleFileWriter::create(&path, true).unwrap();
            writer.write_all(&game()).unwrap();
            writer.finish().unwrap();
        }

        let samples = read_samples(&path).unwrap();
        assert_eq!(samples.len(), 8);
        assert_eq!(analyze_default(&samples), Tally::new(0, 4, 0));
        assert_eq!(analyze(&samples, 1), Tally::new(2, 0, 2));
    }
}

#[test]
fn overwrite_replaces_samples() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.jsonl");

    let mut writer = SampleFileWriter::create(&path, false).unwrap();
    writer.write_all(&game()).unwrap();
    writer.finish().unwrap();

    let mut writer = SampleFileWriter::create(&path, false).unwrap();
    writer.write(&TrainingSample::new(-1, 1.0)).unwrap();
    writer.finish().unwrap();

    assert_eq!(read_samples(&path).unwrap(), vec![TrainingSample::new(-1, 1.0)]);
}

#[test]
fn reads_lines_in_the_self_play_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("training_data.jsonl");
    fs::write(
        &path,
        concat!(
            "{\"board\": [[1, 0, 0], [0, 0, 0], [0, 0, 0]], \"policy\": [0.0, 0.5, 0.5], \"value\": 0.720000, \"current_player\": -1}\n",
            "{\"board\": [[1, -1, 0], [0, 0, 0], [0, 0, 0]], \"policy\": [0.0, 0.0, 1.0], \"value\": -0.800000, \"current_player\": 1}\n",
        ),
    )
    .unwrap();

    let samples = read_samples(&path).unwrap();

    assert_eq!(samples[0].board[0], vec![1, 0, 0]);
    assert_eq!(analyze_default(&samples), Tally::new(1, 0, 0));
    assert_eq!(analyze(&samples, 1), Tally::new(0, 1, 0));
}

#[test]
fn invalid_line_aborts_the_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.jsonl");
    fs::write(
        &path,
        "{\"current_player\": -1, \"value\": 0}\n{\"current_player\": -1, \"value\": null}\n",
    )
    .unwrap();

    let err = read_samples(&path).unwrap_err();

    assert!(matches!(
        err,
        SampleError::TypeMismatch {
            line: 2,
            field: "value",
            ..
        }
    ));
    assert_eq!(SampleFileReader::open(&path).unwrap().count(), 2);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();

    let err = read_samples(dir.path().join("missing.jsonl")).unwrap_err();

    assert!(matches!(err, SampleError::Io(_)));
}

#[test]
fn directory_expands_to_sample_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.jsonl"), "").unwrap();
    fs::write(dir.path().join("a.jsonl.gz"), "").unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();
    fs::create_dir(dir.path().join("nested.jsonl")).unwrap();

    let files = sample_files(dir.path()).unwrap();

    assert_eq!(
        files,
        vec![dir.path().join("a.jsonl.gz"), dir.path().join("b.jsonl")]
    );

    let single = dir.path().join("b.jsonl");
    assert_eq!(sample_files(&single).unwrap(), vec![single.clone()]);
}

#[test]
fn non_finite_values_are_refused_by_the_writer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.jsonl");

    let mut writer = SampleFileWriter::create(&path, false).unwrap();
    writer.write(&TrainingSample::new(-1, 0.5)).unwrap();

    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = writer.write(&TrainingSample::new(-1, value)).unwrap_err();

        assert!(matches!(err, SampleError::NonFiniteValue(_)));
    }

    writer.finish().unwrap();

    assert_eq!(read_samples(&path).unwrap(), vec![TrainingSample::new(-1, 0.5)]);
}
