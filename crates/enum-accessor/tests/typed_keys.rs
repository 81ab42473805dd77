use enum_accessor::{
    enum_keys, Configuration, EnumAccessor, EnumDefinition, EnumError, EnumOptions, MemoryTable,
    NoLabels, Record, SymbolicKey, ValidationPolicy,
};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use std::thread;

enum_keys! {
    pub enum Status {
        Planned => "planned",
        InProgress => "in_progress",
        Done => "done",
    }
}

static TASK: Lazy<EnumAccessor> = Lazy::new(|| {
    let mut task = EnumAccessor::new("task").with_config(Configuration::new(1));
    task.declare(
        "status",
        EnumDefinition::from_keys::<Status>(),
        EnumOptions::default(),
    )
    .expect("status definition is valid");
    task.declare(
        "priority",
        EnumDefinition::from_json(r#"{"low": 10, "normal": 20, "high": 30}"#)
            .expect("priority definition parses"),
        EnumOptions::from_json(r#"{"validates": {"allow_nil": true}}"#)
            .expect("priority options parse"),
    )
    .expect("priority definition is valid");
    task
});

#[test]
fn test_typed_keys_drive_accessors() {
    let status = TASK.attribute("status").unwrap();
    let mut record = Record::new();

    status.set(&mut record, Status::InProgress);
    assert_eq!(status.raw(&record), Some(2));
    assert_eq!(status.get_as::<Status>(&record), Some(Status::InProgress));
    assert!(status.is(&record, Status::InProgress));
    assert!(!status.is(&record, Status::Done));

    for key in Status::ALL {
        assert_eq!(status.values().get(key), status.values().get(key.as_str()));
    }
}

#[test]
fn test_human_values_accept_typed_keys() {
    let status = TASK.attribute("status").unwrap();
    let human = status.human_values(&NoLabels);
    assert_eq!(human.get(Status::InProgress), Some("In progress"));
    assert_eq!(human.len(), 3);
}

#[test]
fn test_json_declared_attribute() {
    let priority = TASK.attribute("priority").unwrap();
    assert_eq!(
        priority.values().iter().collect::<Vec<_>>(),
        vec![("low", 10), ("normal", 20), ("high", 30)]
    );
    assert_eq!(priority.validation(), ValidationPolicy::AllowNil);

    let mut record = Record::new();
    TASK.attribute("status").unwrap().set(&mut record, Status::Done);
    assert!(TASK.is_valid(&record));

    priority.set(&mut record, "urgent");
    assert_eq!(priority.raw(&record), None);
    assert!(TASK.is_valid(&record));
}

#[test]
fn test_scope_with_typed_keys() {
    let status = TASK.attribute("status").unwrap();
    let mut table = MemoryTable::new();
    for key in [Status::Planned, Status::Done, Status::Done] {
        let mut record = table.build();
        status.set(&mut record, key);
        table.insert(record);
    }

    assert_eq!(status.where_in(&table, &[Status::Done]).count(), 2);
    assert_eq!(
        status
            .where_in(&table, &[Status::Planned, Status::InProgress])
            .count(),
        1
    );
}

#[test]
fn test_shared_across_threads() {
    let handles: Vec<_> = Status::ALL
        .iter()
        .map(|key| {
            let key = *key;
            thread::spawn(move || {
                let status = TASK.attribute("status").unwrap();
                let mut record = Record::new();
                status.set(&mut record, key);
                status.get_as::<Status>(&record)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        Status::ALL.iter().copied().map(Some).collect::<Vec<_>>()
    );
}

#[test]
fn test_duplicate_json_value_fails_declaration() {
    let mut model = EnumAccessor::new("broken").with_config(Configuration::default());
    let result = model.declare(
        "kind",
        EnumDefinition::from_json(r#"{"a": 1, "b": 1}"#).unwrap(),
        EnumOptions::default(),
    );

    match result {
        Err(EnumError::DuplicateValue { attribute, value }) => {
            assert_eq!(attribute, "kind");
            assert_eq!(value, 1);
        }
        other => panic!("Expected DuplicateValue, got {:?}", other),
    }
    assert!(model.attribute("kind").is_none());
    assert!(model.registry().rules().is_empty());
}

#[test]
fn test_repeated_json_key_fails_declaration() {
    let mut model = EnumAccessor::new("broken").with_config(Configuration::default());
    let result = model.declare(
        "kind",
        EnumDefinition::from_json(r#"{"a": 1, "a": 2}"#).unwrap(),
        EnumOptions::default(),
    );

    match result {
        Err(EnumError::DuplicateKey { attribute, key }) => {
            assert_eq!(attribute, "kind");
            assert_eq!(key, "a");
        }
        other => panic!("Expected DuplicateKey, got {:?}", other),
    }
    assert!(model.attribute("kind").is_none());
    assert!(model.registry().rules().is_empty());
}
