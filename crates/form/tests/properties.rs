//! Property tests for naming, round-tripping and undeclared-key isolation.

use std::rc::Rc;

use arbor_data::{Object, Record, Value};
use arbor_form::{Form, Namespace, Result};
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Nothing),
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::Int),
		"[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
	]
}

fn arb_key() -> impl Strategy<Value = String> {
	"[a-z][a-z0-9]{0,5}"
}

fn street(street: Value) -> Value {
	Value::record([("street", street)])
}

fn declare(form: &Form) -> Result<()> {
	form.field("name")?;
	form.field("tags")?;
	form.namespace("address", |address| {
		address.field("street")?;
		Ok(())
	})?;
	form.collection("addresses", |address| {
		address.field("street")?;
		Ok(())
	})?;
	Ok(())
}

fn model(name: Value, tags: Vec<Value>, home: Value, streets: Vec<Value>) -> Object {
	Object::dict(Record::from_iter([
		("name".to_owned(), name),
		("admin".to_owned(), Value::Bool(false)),
		("tags".to_owned(), Value::List(tags)),
		("address".to_owned(), street(home)),
		("addresses".to_owned(), Value::List(streets.into_iter().map(street).collect())),
	]))
}

proptest! {
	/// A chain of nested namespaces names its leaf after every key on the path.
	#[test]
	fn prop_names_follow_key_chain(keys in prop::collection::vec(arb_key(), 1..6)) {
		let root = Namespace::root("root", None);
		let mut chain: Vec<Rc<Namespace>> = vec![Rc::clone(&root)];
		for key in &keys[..keys.len() - 1] {
			let last = Rc::clone(chain.last().unwrap());
			chain.push(last.namespace(key.as_str(), |_| Ok(())).unwrap());
		}
		let leaf_key = keys.last().unwrap().as_str();
		let leaf = chain.last().unwrap().field(leaf_key).unwrap();

		let identifier = std::iter::once("root".to_owned()).chain(keys.iter().cloned()).collect::<Vec<_>>().join("_");
		let parameter_name = keys.iter().fold("root".to_owned(), |name, key| format!("{name}[{key}]"));
		prop_assert_eq!(leaf.identifier(), identifier);
		prop_assert_eq!(leaf.parameter_name(), parameter_name);
	}

	/// Assigning a tree's own serialization back leaves the serialization unchanged.
	#[test]
	fn prop_assign_serialize_is_idempotent(
		name in arb_scalar(),
		tags in prop::collection::vec(arb_scalar(), 0..4),
		home in arb_scalar(),
		streets in prop::collection::vec(arb_scalar(), 0..4),
	) {
		let form = Form::build("user", model(name, tags, home, streets), declare).unwrap();
		let before = form.serialize().unwrap();
		form.assign(&before).unwrap();
		prop_assert_eq!(form.serialize().unwrap(), before);
	}

	/// Input keys the tree does not declare never reach the model.
	#[test]
	fn prop_undeclared_keys_never_written(
		admin in any::<bool>(),
		name in arb_scalar(),
		streets in prop::collection::vec(arb_scalar(), 0..4),
		extra in prop::collection::btree_map("x_[a-z]{1,6}", arb_scalar(), 0..4),
		nested in prop::collection::btree_map("x_[a-z]{1,6}", arb_scalar(), 0..3),
	) {
		let model = model(Value::string("William"), Vec::new(), Value::string("Birch Ave"), vec![Value::string("Main St"), Value::string("Elm St")]);
		let form = Form::build("user", model.clone(), declare).unwrap();

		let with_extras = |mut record: Record| {
			record.insert("admin".to_owned(), Value::Bool(admin));
			record.extend(nested.iter().map(|(k, v)| (k.clone(), v.clone())));
			Value::Record(record)
		};
		let mut input = Record::new();
		input.insert("name".to_owned(), name);
		input.insert("admin".to_owned(), Value::Bool(admin));
		input.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
		input.insert("address".to_owned(), with_extras(Record::new()));
		input.insert(
			"addresses".to_owned(),
			Value::List(
				streets
					.into_iter()
					.map(|street| with_extras(Record::from_iter([("street".to_owned(), street)])))
					.collect(),
			),
		);
		form.assign(&Value::Record(input)).unwrap();

		prop_assert_eq!(model.attribute_names(), vec!["name", "admin", "tags", "address", "addresses"]);
		prop_assert_eq!(model.get("admin"), Some(Value::Bool(false)));
		let mut nested_objects = model.get("addresses").unwrap().into_vec();
		nested_objects.push(model.get("address").unwrap());
		for object in nested_objects {
			let object = object.as_object().unwrap();
			prop_assert_eq!(object.attribute_names(), vec!["street"]);
		}
	}
}
