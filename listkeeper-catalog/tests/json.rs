use listkeeper_catalog::json::to_json_string;
use listkeeper_catalog::{DataDir, DataError, NameTable, UserRef};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn load_level_with_mixed_references() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "bloodbath.json",
        r#"{
	"id": 10565740,
	"name": "Bloodbath",
	"author": "Riot",
	"creators": [1234567890, "Knobbelboy"],
	"verifier": 1234567890,
	"verification": "https://www.youtube.com/watch?v=abc",
	"records": [
		{"user": "Cursed", "link": "https://youtu.be/xyz", "percent": 100, "hz": 60, "mobile": false},
		{"user": 2345678901, "link": "https://youtu.be/def", "percent": 57}
	]
}"#,
    );

    let data = DataDir::new(tmp.path());
    let level = data.load_level("bloodbath").unwrap();
    assert_eq!(level.name, "Bloodbath");
    assert_eq!(level.id.as_u64(), Some(10565740));
    assert_eq!(level.author, UserRef::Name("Riot".to_string()));
    assert_eq!(level.verifier, UserRef::Id(1234567890));
    assert_eq!(level.creators.len(), 2);
    assert_eq!(level.records[1].hz, None);
    assert_eq!(level.records[1].mobile, None);
    assert_eq!(level.user_refs().count(), 6);
}

#[test]
fn unknown_fields_survive_a_rewrite() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "lvl.json",
        r#"{"id": 1, "name": "A", "author": 1, "creators": [], "verifier": 1,
            "verification": "https://a.b", "records": [], "password": "Free to Copy"}"#,
    );
    let data = DataDir::new(tmp.path());
    let level = data.load_level_doc("lvl").unwrap();
    assert!(data.save_level("lvl", &level).unwrap());

    let written = fs::read_to_string(tmp.path().join("lvl.json")).unwrap();
    assert!(written.contains("\"password\": \"Free to Copy\""));
    assert!(written.contains("\n\t\"id\": 1,"));
}

#[test]
fn integer_attributes_keep_their_form() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "lvl.json",
        r#"{"id": 1, "name": "A", "author": 1, "creators": [], "verifier": 1,
            "verification": "https://a.b",
            "records": [{"user": 5, "link": "https://c.d", "percent": 100, "hz": 144.5}]}"#,
    );
    let data = DataDir::new(tmp.path());
    let level = data.load_level("lvl").unwrap();
    let rendered = to_json_string(&level).unwrap();
    assert!(rendered.contains("\"percent\": 100,"));
    assert!(rendered.contains("\"hz\": 144.5"));
    assert!(!rendered.contains("mobile"));
}

#[test]
fn unchanged_content_is_not_rewritten() {
    let tmp = TempDir::new().unwrap();
    let data = DataDir::new(tmp.path());
    let table: NameTable = [(2000000000, "Bob".to_string())].into_iter().collect();

    assert!(data.save_name_table(&table).unwrap());
    assert!(!data.save_name_table(&table).unwrap());
    assert!(!tmp.path().join("_name_map.json.tmp").exists());
}

#[test]
fn rewrite_keeps_source_key_order() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "lvl.json",
        r#"{"name": "A", "id": 1, "author": "Ann", "percentToQualify": 40, "creators": [],
            "verifier": 1, "verification": "https://a.b",
            "records": [{"link": "https://c.d", "user": 5, "mobile": true}]}"#,
    );
    let data = DataDir::new(tmp.path());
    let mut level = data.load_level_doc("lvl").unwrap();
    level.data.author = UserRef::Id(1000000000);
    assert!(data.save_level("lvl", &level).unwrap());

    let written = fs::read_to_string(tmp.path().join("lvl.json")).unwrap();
    assert_eq!(
        written,
        "{\n\t\"name\": \"A\",\n\t\"id\": 1,\n\t\"author\": 1000000000,\n\t\"percentToQualify\": 40,\n\t\"creators\": [],\n\t\"verifier\": 1,\n\t\"verification\": \"https://a.b\",\n\t\"records\": [\n\t\t{\n\t\t\t\"link\": \"https://c.d\",\n\t\t\t\"user\": 5,\n\t\t\t\"mobile\": true\n\t\t}\n\t]\n}"
    );
}

#[test]
fn failed_rename_removes_the_tmp_file() {
    let tmp = TempDir::new().unwrap();
    // a non-empty directory where the file should go makes the rename fail
    let target = tmp.path().join("lvl.json");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), "").unwrap();

    let err = listkeeper_catalog::write_json(&target, &vec!["a"]).unwrap_err();
    assert!(matches!(err, DataError::Write { .. }), "{err}");
    assert!(!tmp.path().join("lvl.json.tmp").exists());
}

#[test]
fn name_table_is_written_in_ascending_id_order() {
    let tmp = TempDir::new().unwrap();
    let data = DataDir::new(tmp.path());
    let table: NameTable = [
        (9000000000, "Zed".to_string()),
        (1000000001, "Ann".to_string()),
        (5000000000, "Émile".to_string()),
    ]
    .into_iter()
    .collect();
    data.save_name_table(&table).unwrap();

    let written = fs::read_to_string(tmp.path().join("_name_map.json")).unwrap();
    assert_eq!(
        written,
        "{\n\t\"1000000001\": \"Ann\",\n\t\"5000000000\": \"Émile\",\n\t\"9000000000\": \"Zed\"\n}"
    );

    let reloaded = data.load_name_table().unwrap();
    assert_eq!(reloaded, table);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "_list.json", "[\"a\", ");
    let err = DataDir::new(tmp.path()).load_level_list().unwrap_err();
    assert!(matches!(err, DataError::Parse { .. }), "{err}");
}

#[test]
fn wrong_shape_is_a_shape_error() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "_list.json", "[\"a\", 3]");
    let err = DataDir::new(tmp.path()).load_level_list().unwrap_err();
    assert!(matches!(err, DataError::Shape { .. }), "{err}");
}

#[test]
fn name_table_rejects_non_numeric_keys() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "_name_map.json", r#"{"alice": "Alice"}"#);
    assert!(DataDir::new(tmp.path()).load_name_table().is_err());
}

#[test]
fn missing_level_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = DataDir::new(tmp.path()).load_level("ghost").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn packs_and_editors_load() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "_packlist.json",
        r##"[{"name": "Nine Circles", "colour": "#ff0000", "levels": ["ninecircles", "bloodbath"]}]"##,
    );
    write_json(
        tmp.path(),
        "_editors.json",
        r#"[{"role": "owner", "name": 1234567890, "link": "https://example.com/u"},
            {"role": "helper", "name": "Someone", "link": ""}]"#,
    );
    let data = DataDir::new(tmp.path());

    let packs = data.load_pack_list().unwrap();
    assert_eq!(packs[0].levels, vec!["ninecircles", "bloodbath"]);

    let editors = data.load_editors().unwrap();
    assert_eq!(editors[0].name, UserRef::Id(1234567890));
    assert_eq!(editors[1].name, UserRef::Name("Someone".to_string()));
}
