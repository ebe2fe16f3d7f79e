mod common;

use common::MemoryStore;
use figment::{
    Figment,
    providers::{Format, Toml},
};
use mapnotes::backend::{BackendRegistry, BackendSpec};
use mapnotes::config::PoolConfig;
use mapnotes::{ConfigError, NoteError, NoteStore};
use std::collections::HashMap;
use std::sync::Arc;

fn declare(props: &mut HashMap<String, String>, index: usize, id: &str, table: &str, srid: &str) {
    props.insert(format!("note.{index}.id"), id.to_string());
    props.insert(format!("note.{index}.table"), table.to_string());
    props.insert(format!("note.{index}.srid"), srid.to_string());
    props.insert(
        format!("note.{index}.jdbcUrl"),
        "jdbc:postgresql://localhost:5432/georchestra?user=www-data&password=www-data".to_string(),
    );
}

fn memory_registry(props: &HashMap<String, String>) -> Result<(BackendRegistry, usize), ConfigError> {
    let mut created = 0;
    let registry = BackendRegistry::build_with(props, |_spec| {
        created += 1;
        Ok(MemoryStore::new() as Arc<dyn NoteStore>)
    })?;
    Ok((registry, created))
}

#[test]
fn contiguous_declarations_are_all_registered() {
    let mut props = HashMap::new();
    declare(&mut props, 0, "default", "georchestra.notes", "4326");
    declare(&mut props, 1, "lambert", "public.notes_l93", "2154");
    declare(&mut props, 2, "mercator", "notes", "3857");

    let (registry, created) = memory_registry(&props).unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(created, 3);

    let lambert = registry.lookup("lambert").unwrap();
    assert_eq!(lambert.srid(), 2154);
    assert_eq!(lambert.table().as_str(), "public.notes_l93");

    let mut ids: Vec<_> = registry.list().map(|b| b.id().to_string()).collect();
    ids.sort();
    assert_eq!(ids, ["default", "lambert", "mercator"]);
}

#[test]
fn scan_stops_at_first_missing_id() {
    let mut props = HashMap::new();
    declare(&mut props, 0, "a", "notes_a", "4326");
    declare(&mut props, 1, "b", "notes_b", "4326");
    // Index 2 is missing; 3 is well-formed and 4 is malformed, neither is read.
    declare(&mut props, 3, "d", "notes_d", "4326");
    declare(&mut props, 4, "e", "notes_e", "not-a-number");

    let (registry, created) = memory_registry(&props).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(created, 2);
    assert!(matches!(
        registry.lookup("d"),
        Err(NoteError::BackendNotFound(id)) if id == "d"
    ));
}

#[test]
fn empty_source_yields_empty_registry() {
    let (registry, created) = memory_registry(&HashMap::new()).unwrap();
    assert!(registry.is_empty());
    assert_eq!(created, 0);
}

#[test]
fn non_numeric_srid_is_fatal() {
    let mut props = HashMap::new();
    declare(&mut props, 0, "default", "georchestra.notes", "EPSG:4326");

    let err = memory_registry(&props).unwrap_err();
    assert!(
        matches!(&err, ConfigError::InvalidSrid { key, value } if key == "note.0.srid" && value == "EPSG:4326"),
        "unexpected error: {err}"
    );
}

#[test]
fn missing_sub_keys_are_fatal() {
    for field in ["table", "srid", "jdbcUrl"] {
        let mut props = HashMap::new();
        declare(&mut props, 0, "default", "georchestra.notes", "4326");
        props.remove(&format!("note.0.{field}"));

        let err = memory_registry(&props).unwrap_err();
        assert!(
            matches!(&err, ConfigError::MissingKey { key } if *key == format!("note.0.{field}")),
            "unexpected error for {field}: {err}"
        );
    }
}

#[test]
fn unsafe_table_names_are_fatal() {
    let mut props = HashMap::new();
    declare(&mut props, 0, "default", "notes; DROP TABLE users", "4326");

    let err = memory_registry(&props).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTable { .. }));
}

#[test]
fn unusable_connection_url_is_fatal() {
    let mut props = HashMap::new();
    declare(&mut props, 0, "default", "notes", "4326");
    props.insert(
        "note.0.jdbcUrl".to_string(),
        "jdbc:oracle:thin:@localhost:1521:xe".to_string(),
    );

    let err = memory_registry(&props).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConnectionUrl { .. }));
}

#[test]
fn duplicate_id_keeps_the_later_declaration() {
    let mut props = HashMap::new();
    declare(&mut props, 0, "default", "first.notes", "4326");
    declare(&mut props, 1, "default", "second.notes", "2154");

    let (registry, created) = memory_registry(&props).unwrap();
    assert_eq!(created, 2);
    assert_eq!(registry.len(), 1);

    let backend = registry.lookup("default").unwrap();
    assert_eq!(backend.table().as_str(), "second.notes");
    assert_eq!(backend.srid(), 2154);
}

#[test]
fn toml_declarations_are_scanned_through_figment() {
    let figment = Figment::from(Toml::string(
        r#"
[note.0]
id = "default"
table = "georchestra.notes"
srid = 4326
jdbcUrl = "jdbc:postgresql://localhost:5432/georchestra?user=www-data&password=www-data"

[note.1]
id = "lambert"
table = "georchestra.notes_l93"
srid = "2154"
jdbcUrl = "postgres://localhost/georchestra"
"#,
    ));

    let specs = BackendSpec::scan(&figment).unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].id, "default");
    assert_eq!(specs[0].srid, 4326);
    assert_eq!(specs[1].srid, 2154);
    assert_eq!(specs[1].index, 1);
    assert!(!specs[0].connection.redacted().contains("password=www-data"));
}

#[tokio::test]
async fn postgis_registry_opens_no_connection_until_first_store() {
    let mut props = HashMap::new();
    declare(&mut props, 0, "default", "georchestra.notes", "4326");
    // Port 1 is never a PostgreSQL server.
    props.insert(
        "note.0.jdbcUrl".to_string(),
        "jdbc:postgresql://127.0.0.1:1/georchestra".to_string(),
    );

    let pool = PoolConfig {
        acquire_timeout_secs: 1,
        ..Default::default()
    };
    let registry = BackendRegistry::build(&props, &pool).unwrap();
    let backend = registry.lookup("default").unwrap();

    let note = mapnotes::Note::new(false, "Pothole", "ctx1", 45.0, 5.0);
    assert!(backend.store(&note).await.is_err());

    registry.close().await;
}

#[tokio::test]
async fn close_reaches_every_store() {
    let a = MemoryStore::new();
    let b = MemoryStore::new();
    let registry = BackendRegistry::from_backends([
        common::memory_backend("a", "notes_a", 4326, a.clone()),
        common::memory_backend("b", "notes_b", 4326, b.clone()),
    ]);

    registry.close().await;
    assert!(a.is_closed());
    assert!(b.is_closed());
}
