use gencxx::config::CollisionPolicy;
use gencxx::data::{load_data, DataValue};
use gencxx::error::Error;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test_log::test]
fn test_keys_from_nested_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.json", r#"{"x": 1}"#);
    write(dir.path(), "sub/b.yaml", "- one\n- two\n");

    let ns = load_data(dir.path(), CollisionPolicy::Overwrite).unwrap();

    let mut keys: Vec<&str> = ns.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(
        ns.get("b"),
        Some(&DataValue::Sequence(vec![
            DataValue::String("one".into()),
            DataValue::String("two".into()),
        ]))
    );
    let Some(DataValue::Mapping(a)) = ns.get("a") else {
        panic!("Expected mapping for 'a'");
    };
    assert_eq!(a["x"], DataValue::Integer(1));
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    let ns = load_data(dir.path(), CollisionPolicy::Overwrite).unwrap();
    assert!(ns.is_empty());
}

#[test]
fn test_file_without_extension() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "VERSION", "1.2.3\n");
    let ns = load_data(dir.path(), CollisionPolicy::Overwrite).unwrap();
    assert_eq!(ns.get("VERSION"), Some(&DataValue::String("1.2.3".into())));
}

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let err = load_data(dir.path().join("does-not-exist"), CollisionPolicy::Overwrite)
        .unwrap_err();
    assert!(matches!(err, Error::FilesystemError { .. }));
}

#[test]
fn test_path_is_a_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.yaml", "x: 1\n");
    let err = load_data(dir.path().join("a.yaml"), CollisionPolicy::Overwrite).unwrap_err();
    assert!(matches!(err, Error::FilesystemError { .. }));
}

#[test]
fn test_one_bad_file_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.yaml", "x: 1\n");
    write(dir.path(), "nested/bad.yaml", "x: [1, 2\n");

    let err = load_data(dir.path(), CollisionPolicy::Overwrite).unwrap_err();
    match err {
        Error::DataParseError { path, .. } => assert!(path.ends_with("nested/bad.yaml")),
        other => panic!("Expected DataParseError, got {other:?}"),
    }
}

#[test]
fn test_non_utf8_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00]).unwrap();
    let err = load_data(dir.path(), CollisionPolicy::Overwrite).unwrap_err();
    assert!(matches!(err, Error::DataParseError { .. }));
}

#[test_log::test]
fn test_collision_last_in_name_order_wins() {
    let dir = TempDir::new().unwrap();
    // Walk order: a/, a/types.yaml, types.json, z/, z/types.yml
    write(dir.path(), "a/types.yaml", "from: a\n");
    write(dir.path(), "types.json", r#"{"from": "root"}"#);
    write(dir.path(), "z/types.yml", "from: z\n");

    let ns = load_data(dir.path(), CollisionPolicy::Overwrite).unwrap();
    assert_eq!(ns.len(), 1);
    let Some(DataValue::Mapping(types)) = ns.get("types") else {
        panic!("Expected mapping for 'types'");
    };
    assert_eq!(types["from"], DataValue::String("z".into()));
}

#[test]
fn test_collision_error_policy() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "one/consts.yaml", "a: 1\n");
    write(dir.path(), "two/consts.json", r#"{"a": 2}"#);

    let err = load_data(dir.path(), CollisionPolicy::Error).unwrap_err();
    match err {
        Error::DataKeyCollision { key, first, second } => {
            assert_eq!(key, "consts");
            assert!(first.ends_with("one/consts.yaml"));
            assert!(second.ends_with("two/consts.json"));
        }
        other => panic!("Expected DataKeyCollision, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_follows_directory_symlinks() {
    let data = TempDir::new().unwrap();
    let shared = TempDir::new().unwrap();
    write(shared.path(), "shared.yaml", "name: shared\n");
    std::os::unix::fs::symlink(shared.path(), data.path().join("linked")).unwrap();

    let ns = load_data(data.path(), CollisionPolicy::Overwrite).unwrap();
    assert!(ns.get("shared").is_some());
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_is_reported() {
    let data = TempDir::new().unwrap();
    write(data.path(), "sub/a.yaml", "x: 1\n");
    std::os::unix::fs::symlink(data.path(), data.path().join("sub/loop")).unwrap();

    let err = load_data(data.path(), CollisionPolicy::Overwrite).unwrap_err();
    assert!(matches!(err, Error::FilesystemError { .. }));
}
