//! Integration tests for the embedding cache store.
//!
//! Exercise the store the way the CLI uses it: open a directory, miss,
//! save, hit, and reopen.

use std::collections::HashSet;
use std::fs;

use candle_core::{DType, Device, Tensor};
use tempfile::TempDir;

use embed_store::{key_digest, EmbedStore, StoreError};

fn open_fresh() -> (TempDir, EmbedStore) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = EmbedStore::open(temp.path().join("embeddings")).expect("Failed to open store");
    (temp, store)
}

#[test]
fn test_hello_scenario() {
    let (_temp, store) = open_fresh();

    assert!(store.load("hello").unwrap().is_none());

    let data = Tensor::new(&[[0.1f32, 0.2, 0.3]], &Device::Cpu).unwrap();
    store.save("hello", &data).unwrap();

    let loaded = store.load("hello").unwrap().expect("entry should exist");
    assert_eq!(loaded.dims(), &[1, 3]);
    assert_eq!(loaded.to_vec2::<f32>().unwrap(), vec![vec![0.1f32, 0.2, 0.3]]);
}

#[test]
fn test_distinct_keys_distinct_paths() {
    let (_temp, store) = open_fresh();

    let keys = [
        "hello",
        "Hello",
        "hello ",
        "",
        "the quick brown fox",
        "the quick brown fox.",
        "日本語のテキスト",
    ];
    let paths: HashSet<_> = keys.iter().map(|k| store.key_to_path(k)).collect();
    assert_eq!(paths.len(), keys.len());
}

#[test]
fn test_paths_stable_across_instances() {
    let temp = TempDir::new().unwrap();
    let first = EmbedStore::open(temp.path()).unwrap();
    let second = EmbedStore::open(temp.path()).unwrap();

    for key in ["hello", "a longer sentence to embed", ""] {
        assert_eq!(first.key_to_path(key), first.key_to_path(key));
        assert_eq!(first.key_to_path(key), second.key_to_path(key));
    }
}

#[test]
fn test_entry_visible_after_reopen() {
    let temp = TempDir::new().unwrap();
    let data = Tensor::new(&[[1.5f32, -2.0, 0.25, 4.0]], &Device::Cpu).unwrap();

    {
        let store = EmbedStore::open(temp.path()).unwrap();
        store.save("persisted", &data).unwrap();
    }

    let reopened = EmbedStore::open(temp.path()).unwrap();
    let loaded = reopened.load("persisted").unwrap().unwrap();
    assert_eq!(
        loaded.to_vec2::<f32>().unwrap(),
        data.to_vec2::<f32>().unwrap()
    );
}

#[test]
fn test_one_dimensional_f64_round_trip() {
    let (_temp, store) = open_fresh();
    let data = Tensor::new(&[0.5f64, -1.25, 3.0e-8, 42.0], &Device::Cpu).unwrap();

    store.save("vector", &data).unwrap();
    let loaded = store.load("vector").unwrap().unwrap();

    assert_eq!(loaded.dtype(), DType::F64);
    assert_eq!(loaded.dims(), &[4]);
    assert_eq!(
        loaded.to_vec1::<f64>().unwrap(),
        vec![0.5, -1.25, 3.0e-8, 42.0]
    );
}

#[test]
fn test_second_save_overwrites() {
    let (_temp, store) = open_fresh();
    let first = Tensor::new(&[[1.0f32, 2.0, 3.0]], &Device::Cpu).unwrap();
    let second = Tensor::new(&[[9.0f32, 8.0], [7.0, 6.0]], &Device::Cpu).unwrap();

    store.save("key", &first).unwrap();
    store.save("key", &second).unwrap();

    let loaded = store.load("key").unwrap().unwrap();
    assert_eq!(loaded.dims(), &[2, 2]);
    assert_eq!(
        loaded.to_vec2::<f32>().unwrap(),
        vec![vec![9.0, 8.0], vec![7.0, 6.0]]
    );
}

#[test]
fn test_identical_saves_produce_identical_bytes() {
    let (_temp, store) = open_fresh();
    let data = Tensor::new(&[[0.1f32, 0.2, 0.3]], &Device::Cpu).unwrap();

    store.save("same", &data).unwrap();
    let first = fs::read(store.key_to_path("same")).unwrap();
    store.save("same", &data).unwrap();
    let second = fs::read(store.key_to_path("same")).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with(b"\x93NUMPY"));
}

#[test]
fn test_key_is_not_persisted() {
    let (_temp, store) = open_fresh();
    let key = "secret sentence that should not appear on disk";
    let data = Tensor::new(&[[1.0f32]], &Device::Cpu).unwrap();

    store.save(key, &data).unwrap();

    let path = store.key_to_path(key);
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(name, format!("{}.npy", key_digest(key)));

    let bytes = fs::read(&path).unwrap();
    let needle = key.as_bytes();
    assert!(!bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn test_save_into_removed_directory_fails() {
    let (temp, store) = open_fresh();
    fs::remove_dir_all(temp.path().join("embeddings")).unwrap();

    let data = Tensor::new(&[[1.0f32]], &Device::Cpu).unwrap();
    let result = store.save("orphan", &data);
    assert!(matches!(
        result,
        Err(StoreError::Encode { .. }) | Err(StoreError::Io { .. })
    ));
}
