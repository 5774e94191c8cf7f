use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root()
        .join("salesdesk_api/tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_validator() -> jsonschema::Validator {
    let path = workspace_root().join("schema/sales_order.schema.json");
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    let schema: Value = serde_json::from_str(&text).expect("schema is valid JSON");
    jsonschema::draft202012::new(&schema).expect("sales order schema compiles")
}

fn orders_data() -> Value {
    load_fixture("payment_requests.json")["data"].clone()
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures conform to the schema
// ---------------------------------------------------------------------------

#[test]
fn test_payment_requests_fixture_conforms_to_schema() {
    let validator = load_validator();
    if let Err(e) = validator.validate(&orders_data()) {
        panic!("payment requests fixture failed validation: {e}");
    }
}

#[test]
fn test_empty_fixture_conforms_to_schema() {
    let validator = load_validator();
    let data = load_fixture("payment_requests_empty.json")["data"].clone();
    if let Err(e) = validator.validate(&data) {
        panic!("empty fixture failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Negative validation: schema rejects invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_schema_rejects_order_missing_id() {
    let mut data = orders_data();
    data[0]
        .as_object_mut()
        .expect("order is an object")
        .remove("_id");

    assert!(
        load_validator().validate(&data).is_err(),
        "schema should reject order missing _id"
    );
}

#[test]
fn test_schema_rejects_invalid_approval_status() {
    let mut data = orders_data();
    data[0]["paymentRequests"][0]
        .as_object_mut()
        .expect("payment request is an object")
        .insert("approvalStatus".to_string(), Value::String("Maybe".to_string()));

    assert!(
        load_validator().validate(&data).is_err(),
        "schema should reject invalid approvalStatus"
    );
}

#[test]
fn test_schema_rejects_additional_properties() {
    let mut data = orders_data();
    data[1]
        .as_object_mut()
        .expect("order is an object")
        .insert("bogusField".to_string(), Value::Number(1.into()));

    assert!(
        load_validator().validate(&data).is_err(),
        "schema should reject additional properties"
    );
}

#[test]
fn test_schema_rejects_string_amount() {
    let mut data = orders_data();
    data[0]["paymentRequests"][0]
        .as_object_mut()
        .expect("payment request is an object")
        .insert("amount".to_string(), Value::String("50000".to_string()));

    assert!(
        load_validator().validate(&data).is_err(),
        "schema should reject non-numeric amount"
    );
}

#[test]
fn test_schema_accepts_unpopulated_references() {
    let mut data = orders_data();
    data[1]
        .as_object_mut()
        .expect("order is an object")
        .insert("customer".to_string(), Value::String("c_77".to_string()));

    if let Err(e) = load_validator().validate(&data) {
        panic!("bare customer id failed validation: {e}");
    }
}
