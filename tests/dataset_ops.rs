//! Operation-layer integration tests, mirroring the worked scenarios from
//! the byte-range dataset store's concrete-scenario test corpus.

use sparsebox::ops::{
    self, add, create, find_offset, get_index, list_ranges, set_size, DatasetConfig,
    FindOffsetOutcome, OnConflict, RangeFormat, Source,
};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

fn config_for(data_path: std::path::PathBuf) -> DatasetConfig {
    DatasetConfig {
        data_path,
        index_path: None,
        lockfile_path: None,
    }
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| match (i / 256) % 3 {
            0 => 0xaa,
            1 => 0xbb,
            _ => 0xcc,
        })
        .collect()
}

fn write_source(dir: &std::path::Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::File::create(&path).unwrap().write_all(bytes).unwrap();
    path
}

#[test]
fn incremental_adds_merge_and_encode_per_worked_scenarios() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let config = config_for(data_path);
    create(&config, 0).unwrap();

    let all = pattern(2304);

    let src1 = write_source(dir.path(), "s1", &all[512..640]);
    add(&config, 512, &Source::File(src1), OnConflict::Error).unwrap();
    let mut out = Vec::new();
    get_index(&config, 0, &mut out).unwrap();
    assert_eq!(out, vec![0x80, 0x04, 0x7f]);

    let src2 = write_source(dir.path(), "s2", &all[1024..1152]);
    add(&config, 1024, &Source::File(src2), OnConflict::Error).unwrap();
    out.clear();
    get_index(&config, 0, &mut out).unwrap();
    assert_eq!(out, vec![0x80, 0x04, 0x7f, 0xff, 0x02, 0x7f]);

    let src3 = write_source(dir.path(), "s3", &all[640..1024]);
    add(&config, 640, &Source::File(src3), OnConflict::Error).unwrap();
    out.clear();
    get_index(&config, 0, &mut out).unwrap();
    assert_eq!(out, vec![0x80, 0x04, 0xff, 0x04]);

    let src4 = write_source(dir.path(), "s4", &all[256..1280]);
    add(&config, 256, &Source::File(src4), OnConflict::Error).unwrap();
    out.clear();
    get_index(&config, 0, &mut out).unwrap();
    assert_eq!(out, vec![0x80, 0x02, 0xff, 0x07]);
}

#[test]
fn add_error_policy_leaves_both_files_untouched_on_conflict() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let config = config_for(data_path.clone());
    create(&config, 0).unwrap();

    let src1 = write_source(dir.path(), "s1", b"hello world!");
    add(&config, 0, &Source::File(src1), OnConflict::Error).unwrap();

    let data_before = fs::read(&data_path).unwrap();
    let mut index_before = Vec::new();
    get_index(&config, 0, &mut index_before).unwrap();

    let src2 = write_source(dir.path(), "s2", b"HELLO WORLD!");
    let err = add(&config, 0, &Source::File(src2), OnConflict::Error).unwrap_err();
    assert!(matches!(err, sparsebox::error::Error::DataConflict));

    let data_after = fs::read(&data_path).unwrap();
    let mut index_after = Vec::new();
    get_index(&config, 0, &mut index_after).unwrap();
    assert_eq!(data_before, data_after);
    assert_eq!(index_before, index_after);
}

#[test]
fn add_keep_and_overwrite_policies() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let config = config_for(data_path.clone());
    create(&config, 0).unwrap();

    let src1 = write_source(dir.path(), "s1", b"AAAABBBB");
    add(&config, 0, &Source::File(src1), OnConflict::Error).unwrap();

    let src_keep = write_source(dir.path(), "keep", b"XXXXYYYY");
    add(&config, 0, &Source::File(src_keep), OnConflict::Keep).unwrap();
    assert_eq!(&fs::read(&data_path).unwrap()[0..8], b"AAAABBBB");

    let src_overwrite = write_source(dir.path(), "overwrite", b"ZZZZWWWW");
    add(&config, 0, &Source::File(src_overwrite), OnConflict::Overwrite).unwrap();
    assert_eq!(&fs::read(&data_path).unwrap()[0..8], b"ZZZZWWWW");
}

#[test]
fn find_offset_and_list_ranges_on_a_prebuilt_dataset() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let index_path = dir.path().join("d.bin.idx");
    fs::write(&data_path, vec![0u8; 512 * 1024]).unwrap();
    fs::write(&index_path, [0x81, 0x01, 0x7f, 0x00, 0x7f]).unwrap();
    let config = DatasetConfig {
        data_path,
        index_path: Some(index_path),
        lockfile_path: None,
    };

    assert_eq!(
        find_offset(&config, 0, ops::StopAt::Data).unwrap(),
        FindOffsetOutcome::Found(129)
    );
    assert_eq!(
        find_offset(&config, 257, ops::StopAt::Data).unwrap(),
        FindOffsetOutcome::Found(258)
    );
    assert_eq!(
        find_offset(&config, 386, ops::StopAt::Data).unwrap(),
        FindOffsetOutcome::NoResult
    );
    assert_eq!(
        find_offset(&config, 129, ops::StopAt::NoData).unwrap(),
        FindOffsetOutcome::Found(257)
    );

    let mut out = Vec::new();
    list_ranges(&config, false, RangeFormat::Inclusive, &mut out).unwrap();
    assert_eq!(out, b"129..256\n258..385\n");

    out.clear();
    list_ranges(&config, true, RangeFormat::Inclusive, &mut out).unwrap();
    assert_eq!(out, b"0..128\n257..257\n386..524287\n");
}

#[test]
fn set_size_refuses_destructive_shrink_without_force() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let config = config_for(data_path.clone());
    create(&config, 0).unwrap();
    let src = write_source(dir.path(), "s", &[0x42u8; 256]);
    add(&config, 0, &Source::File(src), OnConflict::Error).unwrap();

    let err = set_size(&config, 0, false).unwrap_err();
    assert!(matches!(err, sparsebox::error::Error::SizeTooSmall));

    set_size(&config, 0, true).unwrap();
    assert_eq!(fs::read(&data_path).unwrap().len(), 0);
    let mut out = Vec::new();
    get_index(&config, 0, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn add_without_a_prior_create_creates_the_pair() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let config = config_for(data_path.clone());

    let all = pattern(2304);
    let src = write_source(dir.path(), "s1", &all[512..640]);
    add(&config, 512, &Source::File(src), OnConflict::Error).unwrap();

    assert_eq!(&fs::read(&data_path).unwrap()[512..640], &all[512..640]);
    let mut out = Vec::new();
    get_index(&config, 0, &mut out).unwrap();
    assert_eq!(out, vec![0x80, 0x04, 0x7f]);
}

#[test]
fn set_size_without_a_prior_create_creates_the_pair() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let config = config_for(data_path.clone());

    set_size(&config, 1024, false).unwrap();
    assert_eq!(fs::read(&data_path).unwrap().len(), 1024);
}

#[test]
fn get_index_filters_without_remerging_neighbors() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("d.bin");
    let index_path = dir.path().join("d.bin.idx");
    let mut bytes = Vec::new();
    for _ in 0..10000 {
        bytes.extend_from_slice(&[0x00, 0xff, 0x01, 0x7f, 0x7f]);
    }
    fs::write(&data_path, vec![0u8; 1]).unwrap();
    fs::write(&index_path, &bytes).unwrap();
    let config = DatasetConfig {
        data_path,
        index_path: Some(index_path),
        lockfile_path: None,
    };

    let mut expected = vec![0x00, 0xff, 0x01];
    for _ in 0..9999 {
        expected.extend_from_slice(&[0x80, 0x02, 0xff, 0x01]);
    }
    let mut out = Vec::new();
    get_index(&config, 256, &mut out).unwrap();
    assert_eq!(out, expected);

    out.clear();
    get_index(&config, 257, &mut out).unwrap();
    assert!(out.is_empty());
}
