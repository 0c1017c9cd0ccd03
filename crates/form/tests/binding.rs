//! End-to-end binding scenarios over dictionary and typed models.

use arbor_data::{Object, Record, Value, accessors};
use arbor_form::{Error, Field, FieldClass, Form, Namespace, Result};
use pretty_assertions::assert_eq;
use serde_json::json;

#[derive(Debug, Default)]
struct Address {
	street: String,
	state: Option<String>,
}

accessors!(Address { street, state });

#[derive(Debug, Default)]
struct User {
	name: String,
	admin: bool,
	signed_up: String,
	nicknames: Vec<String>,
	addresses: Vec<Object>,
}

accessors!(User { name, signed_up, nicknames, addresses } readonly [signed_up]);

#[derive(Debug, Default)]
struct Profile {
	home: Record,
	offices: Vec<Record>,
}

accessors!(Profile { home, offices });

fn street_record(street: &str) -> Record {
	Record::from_iter([("street".to_owned(), Value::string(street))])
}

fn address(street: &str) -> Object {
	Object::new(Address {
		street: street.into(),
		state: None,
	})
}

fn declare_user(form: &Form) -> Result<()> {
	form.field("name")?;
	form.collection("addresses", |address| {
		address.field("street")?;
		Ok(())
	})?;
	Ok(())
}

#[test]
fn test_william_scenario() {
	let model = Object::from_json(json!({
		"name": "William",
		"addresses": [{ "street": "Birch Ave" }, { "street": "Main St" }],
	}))
	.unwrap();
	let form = Form::build("user", model.clone(), declare_user).unwrap();

	assert_eq!(
		serde_json::Value::from(form.serialize().unwrap()),
		json!({
			"name": "William",
			"addresses": [{ "street": "Birch Ave" }, { "street": "Main St" }],
		})
	);

	form.assign(
		&json!({
			"name": "Brad",
			"admin": true,
			"addresses": [{ "street": "Main St", "state": "NY" }],
		})
		.into(),
	)
	.unwrap();

	assert_eq!(
		serde_json::Value::from(form.serialize().unwrap()),
		json!({
			"name": "Brad",
			"addresses": [{ "street": "Main St" }, { "street": "Main St" }],
		})
	);
	assert_eq!(
		serde_json::Value::from(model.snapshot()),
		json!({
			"name": "Brad",
			"addresses": [{ "street": "Main St" }, { "street": "Main St" }],
		}),
		"neither admin nor state reach the model"
	);
}

#[test]
fn test_duplicate_field_scenario() {
	let form = Form::new("user", Object::from_json(json!({})).unwrap());
	form.field("foo").unwrap();
	assert!(matches!(form.field("foo"), Err(Error::DuplicateName { .. })));
}

#[test]
fn test_typed_model_round_trip() {
	let model = Object::new(User {
		name: "William".into(),
		admin: false,
		signed_up: "2024-01-01".into(),
		nicknames: vec!["Bill".into()],
		addresses: vec![address("Birch Ave"), address("Main St")],
	});
	let form = Form::build("user", model.clone(), |form| {
		declare_user(form)?;
		form.field("signed_up")?;
		form.field("nicknames")?;
		Ok(())
	})
	.unwrap();

	let params: Value = json!({
		"name": "Brad",
		"admin": true,
		"signed_up": "1999-12-31",
		"nicknames": ["Brad", "B"],
		"addresses": [{ "street": "Wall St", "state": "NY" }],
	})
	.into();
	let returned = form.assign_params(&params).unwrap().unwrap();
	assert!(returned.ptr_eq(&model));

	model
		.with(|user: &User| {
			assert_eq!(user.name, "Brad");
			assert!(!user.admin);
			assert_eq!(user.signed_up, "2024-01-01");
			assert_eq!(user.nicknames, vec!["Brad".to_owned(), "B".to_owned()]);
		})
		.unwrap();
	let first = model.with(|user: &User| user.addresses[0].clone()).unwrap();
	first
		.with(|address: &Address| {
			assert_eq!(address.street, "Wall St");
			assert_eq!(address.state, None);
		})
		.unwrap();
}

#[test]
fn test_nested_collection_naming() {
	let model = Object::new(User {
		addresses: vec![address("Birch Ave"), address("Main St")],
		..Default::default()
	});
	let form = Form::build("user", model, declare_user).unwrap();
	let collection = form.get("addresses").unwrap();
	let members = collection.as_collection().unwrap().members().unwrap();
	let street = members[1].get("street").unwrap();
	let dom = street.as_field().unwrap().dom();
	assert_eq!(
		dom.to_string(),
		r#"<id="user_addresses_1_street" name="user[addresses][1][street]" value="Main St"/>"#
	);
}

#[test]
fn test_permit_then_assign() {
	let model = Object::from_json(json!({
		"name": "William",
		"admin": false,
		"addresses": [{ "street": "Birch Ave" }],
	}))
	.unwrap();
	let form = Form::build("user", model.clone(), declare_user).unwrap();

	let params: Value = json!({
		"name": "Brad",
		"admin": true,
		"addresses": { "0": { "street": "Wall St", "owner": 1 } },
	})
	.into();
	let permitted = form.permit(&params).unwrap();
	assert_eq!(
		serde_json::Value::from(permitted.clone()),
		json!({ "name": "Brad", "addresses": { "0": { "street": "Wall St" } } })
	);

	form.assign_params(&permitted).unwrap();
	assert_eq!(model.get("name"), Some(Value::string("Brad")));
	assert_eq!(model.get("admin"), Some(Value::Bool(false)));
}

struct Bootstrap;

impl FieldClass for Bootstrap {
	fn name(&self) -> &str {
		"bootstrap"
	}

	fn init(&self, field: &Field) {
		if field.key().as_name() == Some("signed_up") {
			field.readonly(true);
		}
	}
}

#[test]
fn test_field_class_reaches_collection_members() {
	let model = Object::from_json(json!({
		"name": "William",
		"signed_up": "2024-01-01",
		"nicknames": ["Bill"],
		"addresses": [{ "street": "Birch Ave" }],
	}))
	.unwrap();
	let form = Form::builder("user")
		.object(model.clone())
		.field_class(Bootstrap)
		.declare(|form| {
			declare_user(form)?;
			form.field("signed_up")?;
			form.field("nicknames")?;
			Ok(())
		})
		.unwrap();

	let addresses = form.get("addresses").unwrap();
	for member in addresses.as_collection().unwrap().members().unwrap() {
		let street = member.get("street").unwrap();
		assert_eq!(street.as_field().unwrap().class().name(), "bootstrap");
	}
	let nicknames = form.get("nicknames").unwrap();
	for child in nicknames.as_field().unwrap().collection().fields() {
		assert_eq!(child.class().name(), "bootstrap");
	}

	form.assign(&json!({ "signed_up": "1999-12-31" }).into()).unwrap();
	assert_eq!(model.get("signed_up"), Some(Value::string("2024-01-01")));
}

#[test]
fn test_override_inside_builder_is_scoped() {
	let model = Object::from_json(json!({ "address": {}, "name": "" })).unwrap();
	let form = Form::new("user", model);
	let address = form
		.namespace("address", |address: &Namespace| {
			address.use_field_class(Bootstrap);
			address.field("street")?;
			Ok(())
		})
		.unwrap();
	let name = form.field("name").unwrap();

	let street = address.get("street").unwrap();
	assert_eq!(street.as_field().unwrap().class().name(), "bootstrap");
	assert_eq!(name.class().name(), "field");
}

#[test]
fn test_plain_record_attributes_receive_writes() {
	let model = Object::new(Profile {
		home: street_record("Birch Ave"),
		offices: vec![street_record("Main St"), street_record("Elm St")],
	});
	let form = Form::build("profile", model.clone(), |form| {
		form.namespace("home", |home| {
			home.field("street")?;
			Ok(())
		})?;
		form.collection("offices", |office| {
			office.field("street")?;
			Ok(())
		})?;
		Ok(())
	})
	.unwrap();

	form.assign(
		&json!({
			"home": { "street": "Wall St", "owner": "mallory" },
			"offices": [{ "street": "Oak St" }],
		})
		.into(),
	)
	.unwrap();

	model
		.with(|profile: &Profile| {
			assert_eq!(profile.home, street_record("Wall St"));
			assert_eq!(profile.offices, vec![street_record("Oak St"), street_record("Elm St")]);
		})
		.unwrap();
	assert_eq!(
		serde_json::Value::from(form.serialize().unwrap()),
		json!({
			"home": { "street": "Wall St" },
			"offices": [{ "street": "Oak St" }, { "street": "Elm St" }],
		})
	);
}
