use proptax_core::{
    PageRequest, PropertyDraft, PropertyField, PropertyFilter, PropertyPatch, PropertyRepository,
    PropertyService, RepoError, SeedData, ServiceError, Store, StorePropertyRepository,
};
use rust_decimal::Decimal;

fn draft(roll: &str, value: i64, municipality: &str) -> PropertyDraft {
    PropertyDraft {
        roll_number: roll.to_string(),
        assessment_value: Decimal::from(value),
        municipality_id: municipality.to_string(),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    let created = service
        .create_property(draft("P100", 612_500, "M003"))
        .unwrap();
    let loaded = service.get_property("P100").unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.assessment_value, Decimal::from(612_500));
    assert_eq!(loaded.municipality_id, "M003");
}

#[test]
fn created_property_is_appended_in_insertion_order() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);
    service.create_property(draft("A001", 1_000, "M001")).unwrap();

    let page = service
        .list_properties(&PropertyFilter::default(), &PageRequest::new(2, 10))
        .unwrap();
    let rolls: Vec<_> = page
        .items
        .iter()
        .map(|item| item.property.roll_number.as_str())
        .collect();
    assert_eq!(rolls, vec!["P011", "P012", "A001"]);
}

#[test]
fn create_duplicate_roll_number_is_rejected() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    let err = service
        .create_property(draft("P001", 999_999, "M002"))
        .unwrap_err();
    assert_eq!(err, ServiceError::DuplicateId("P001".to_string()));
    assert_eq!(err.http_status(), 409);

    let untouched = service.get_property("P001").unwrap();
    assert_eq!(untouched.assessment_value, Decimal::from(250_000));
}

#[test]
fn create_reports_all_invalid_fields_at_once() {
    let store = Store::open_in_memory();
    let service = PropertyService::for_store(&store);

    let err = service.create_property(draft("", -1, " ")).unwrap_err();
    assert_eq!(err.http_status(), 400);

    let fields = err.field_errors();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[&PropertyField::RollNumber], "Roll number is required");
    assert_eq!(fields[&PropertyField::AssessmentValue], "Value must be positive");
    assert_eq!(
        fields[&PropertyField::MunicipalityId],
        "Municipality is required"
    );
}

#[test]
fn create_accepts_unknown_municipality() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    service
        .create_property(draft("P200", 100_000, "M999"))
        .unwrap();
    let detail = service.get_property_detail("P200").unwrap();
    assert_eq!(detail.municipality_name, "Unknown");
    assert!(detail.municipality.is_none());
    assert!(detail.tax.total_tax.is_zero());
}

#[test]
fn update_changes_mutable_fields_only() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    let updated = service
        .update_property(
            "P001",
            &PropertyPatch {
                assessment_value: Some(Decimal::from(275_000)),
                municipality_id: Some("M002".to_string()),
            },
        )
        .unwrap();

    assert_eq!(updated.roll_number, "P001");
    assert_eq!(updated.assessment_value, Decimal::from(275_000));
    assert_eq!(updated.municipality_id, "M002");
    assert_eq!(service.get_property("P001").unwrap(), updated);
}

#[test]
fn update_with_empty_patch_keeps_record() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);
    let before = service.get_property("P005").unwrap();

    let after = service
        .update_property("P005", &PropertyPatch::default())
        .unwrap();
    assert_eq!(after, before);
}

#[test]
fn update_missing_property_returns_not_found() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    let err = service
        .update_property("P404", &PropertyPatch::default())
        .unwrap_err();
    assert_eq!(err, ServiceError::PropertyNotFound("P404".to_string()));
    assert_eq!(err.http_status(), 404);
}

#[test]
fn update_validation_failure_leaves_record_untouched() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    let err = service
        .update_property(
            "P002",
            &PropertyPatch {
                assessment_value: Some(Decimal::ZERO),
                municipality_id: Some(String::new()),
            },
        )
        .unwrap_err();
    let fields = err.field_errors();
    assert!(fields.contains_key(&PropertyField::AssessmentValue));
    assert!(fields.contains_key(&PropertyField::MunicipalityId));
    assert!(!fields.contains_key(&PropertyField::RollNumber));

    let unchanged = service.get_property("P002").unwrap();
    assert_eq!(unchanged.assessment_value, Decimal::from(320_000));
    assert_eq!(unchanged.municipality_id, "M001");
}

#[test]
fn delete_then_get_is_not_found() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    service.delete_property("P003").unwrap();
    let err = service.get_property("P003").unwrap_err();
    assert_eq!(err, ServiceError::PropertyNotFound("P003".to_string()));
}

#[test]
fn delete_missing_property_reports_not_found() {
    let store = Store::open_demo().unwrap();
    let service = PropertyService::for_store(&store);

    service.delete_property("P004").unwrap();
    let err = service.delete_property("P004").unwrap_err();
    assert!(matches!(err, ServiceError::PropertyNotFound(ref id) if id == "P004"));
}

#[test]
fn repository_enforces_validation_and_uniqueness() {
    let store = Store::open(SeedData::default()).unwrap();
    let repo = StorePropertyRepository::new(&store);

    let valid = draft("R1", 10, "M1").into_property().unwrap();
    assert_eq!(repo.create_property(&valid).unwrap(), "R1");
    assert_eq!(
        repo.create_property(&valid).unwrap_err(),
        RepoError::DuplicateId("R1".to_string())
    );

    let mut invalid = valid.clone();
    invalid.roll_number = "R2".to_string();
    invalid.assessment_value = Decimal::ZERO;
    assert!(matches!(
        repo.create_property(&invalid),
        Err(RepoError::Validation(_))
    ));
    assert_eq!(repo.list_properties().unwrap(), vec![valid]);
}

#[test]
fn store_is_shared_between_services() {
    let store = Store::open_demo().unwrap();
    let writer = PropertyService::for_store(&store);
    let reader = PropertyService::for_store(&store);

    writer.delete_property("P012").unwrap();
    assert!(reader.get_property("P012").is_err());
    assert_eq!(store.dispose(), 11);
}
