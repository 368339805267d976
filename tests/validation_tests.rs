use std::sync::Arc;

use modelkit::{
    ChoiceSet, FieldDef, MemoryStore, Model, ModelError, ModelSchema, Record, Validator, Value,
};

fn test_schema(name: &str) -> Arc<ModelSchema> {
    ModelSchema::builder(name)
        .field(FieldDef::text("text").max_length(100))
        .build()
        .unwrap()
}

#[test]
fn test_full_clean_on_save() {
    let mut store = MemoryStore::new();
    let mut instance = Model::new(test_schema("TestBaseModel")).with_validation();
    instance.set("text", "hello".repeat(1024)).unwrap();

    let err = instance.save(&mut store).unwrap_err();
    let ModelError::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.fields(), vec!["text"]);
    assert!(instance.pk().is_none());
    assert_eq!(store.row_count("TestBaseModel"), 0);
}

#[test]
fn test_changed_model_full_clean() {
    let mut store = MemoryStore::new();
    let mut instance = Model::new(test_schema("TestChangedModel"))
        .with_change_tracking()
        .with_validation();
    instance.set("text", "hello".repeat(1024)).unwrap();
    assert!(matches!(instance.save(&mut store), Err(ModelError::Validation(_))));
}

#[test]
fn test_plain_record_save_skips_validation() {
    let mut store = MemoryStore::new();
    let mut record = Record::new(test_schema("Plain"));
    record.set("text", "hello".repeat(1024)).unwrap();
    record.save(&mut store).unwrap();
    assert_eq!(store.row_count("Plain"), 1);
}

#[test]
fn test_full_clean_without_validation_capability() {
    let mut instance = Model::new(test_schema("Loose"));
    assert!(instance.full_clean().is_err());
    instance.set("text", "ok").unwrap();
    assert!(instance.full_clean().is_ok());
}

#[test]
fn test_custom_validator_exclusions() {
    let mut store = MemoryStore::new();
    let mut instance =
        Model::new(test_schema("Draft")).with_validator(Validator::excluding(["text"]));
    instance.save(&mut store).unwrap();
    assert!(instance.validator().is_some());
    assert_eq!(store.row_count("Draft"), 1);
}

#[test]
fn test_multiple_choice_errors_surface_through_validation() {
    let schema = ModelSchema::builder("Subscriptions")
        .field(FieldDef::multiple_choice(
            "channels",
            ChoiceSet::from_tokens(["email", "sms"]).unwrap(),
        ))
        .field(
            FieldDef::multiple_choice(
                "topics",
                ChoiceSet::from_tokens(["news", "offers"]).unwrap(),
            )
            .max_length(6),
        )
        .build()
        .unwrap();

    let mut instance = Model::new(schema).with_validation();
    instance.set("topics", ["news", "offers"]).unwrap();

    let mut store = MemoryStore::new();
    let ModelError::Validation(errors) = instance.save(&mut store).unwrap_err() else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.fields(), vec!["channels", "topics"]);

    let blank = errors.for_field("channels").next().unwrap().to_string();
    assert!(blank.contains("cannot be blank"));
    let too_long = errors.for_field("topics").next().unwrap().to_string();
    assert!(too_long.contains("at most 6 characters (it has 11)"));

    instance.set("channels", "sms").unwrap();
    instance.set("topics", "news").unwrap();
    instance.save(&mut store).unwrap();
    assert_eq!(instance.get("channels").unwrap(), &Value::from(["sms"]));
}
