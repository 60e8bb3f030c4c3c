//! Attribute-style records, through both the container and the free
//! functions.

use sift::{
    filter, ops, AttrAccessor, Attributes, Filter, Number, ObjectContainer, Result, SiftError,
    SortKey, Value,
};

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: Option<i64>,
    money: f64,
    tags: Vec<String>,
}

impl Person {
    fn new(name: &str, age: i64, money: f64, tags: &[&str]) -> Self {
        Person {
            name: name.to_string(),
            age: Some(age),
            money,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Attributes for Person {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(&self.name)),
            "age" => Some(Value::from(self.age)),
            "money" => Some(Value::from(self.money)),
            "tags" => Some(Value::from(self.tags.clone())),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "name" => {
                self.name = String::try_from(value)
                    .map_err(|v| SiftError::invalid_attribute(name, "string", &v))?
            }
            "age" => {
                self.age = match value {
                    Value::Null => None,
                    other => Some(
                        i64::try_from(other)
                            .map_err(|v| SiftError::invalid_attribute(name, "integer", &v))?,
                    ),
                }
            }
            "money" => {
                self.money = f64::try_from(value)
                    .map_err(|v| SiftError::invalid_attribute(name, "number", &v))?
            }
            "tags" => {
                self.tags = Vec::<String>::try_from(value)
                    .map_err(|v| SiftError::invalid_attribute(name, "list of strings", &v))?
            }
            _ => {
                return Err(SiftError::ReadOnlyAttribute {
                    attribute: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn people() -> Vec<Person> {
    vec![
        Person::new("alice", 30, 50.0, &["friendly", "smart"]),
        Person::new("bob", 25, 50.0, &["kind", "smart"]),
        Person::new("charlie", 35, 500.0, &["friendly"]),
    ]
}

fn names<'a>(found: impl IntoIterator<Item = &'a Person>) -> Vec<&'a str> {
    found.into_iter().map(|p| p.name.as_str()).collect()
}

// ============================================================================
// Free functions
// ============================================================================

#[test]
fn first_over_slice_and_iterator() {
    let data = people();
    let found = ops::first(&data, &AttrAccessor, &filter! { age = 25 });
    assert_eq!(found.unwrap().name, "bob");

    let found = ops::first(data.iter().rev(), &AttrAccessor, &Filter::all());
    assert_eq!(found.unwrap().name, "charlie");

    assert!(matches!(
        ops::first(&data, &AttrAccessor, &filter! { name = "eve" }),
        Err(SiftError::NotFound { .. })
    ));
}

#[test]
fn count_without_and_with_args() {
    let data = people();
    assert_eq!(ops::count(&data, &AttrAccessor, &Filter::all()), Ok(3));
    let poor = filter! { money = 50 };
    assert_eq!(ops::count(&data, &AttrAccessor, &poor), Ok(2));
    let poor = filter! { money = 50.0 };
    assert_eq!(ops::count(data.iter(), &AttrAccessor, &poor), Ok(2));
}

#[test]
fn search_list_membership() {
    let data = people();
    let smart = ops::search(&data, &AttrAccessor, &filter! { tags = "smart" })
        .unwrap()
        .try_collect()
        .unwrap();
    assert_eq!(names(smart), vec!["alice", "bob"]);

    let not_friendly = ops::search(&data, &AttrAccessor, &filter! { tags__not = "friendly" })
        .unwrap()
        .try_collect()
        .unwrap();
    assert_eq!(names(not_friendly), vec!["bob"]);
}

#[test]
fn search_list_expected_is_one_candidate() {
    let data = people();
    // A list is looked up as a single element, never as a subset.
    let both = filter! { tags = vec!["friendly", "smart"] };
    assert_eq!(ops::count(&data, &AttrAccessor, &both), Ok(0));
    let nested = filter! { tags__not = vec!["friendly"] };
    assert_eq!(ops::count(&data, &AttrAccessor, &nested), Ok(3));
}

#[test]
fn search_not_in_alternatives() {
    let data = people();
    let found = ops::search(
        &data,
        &AttrAccessor,
        &filter! { name__not = vec!["alice", "charlie"] },
    )
    .unwrap()
    .try_collect()
    .unwrap();
    assert_eq!(names(found), vec!["bob"]);

    // Equality against a list never holds for a scalar field.
    assert_eq!(
        ops::count(&data, &AttrAccessor, &filter! { name = vec!["alice"] }),
        Ok(0)
    );
}

#[test]
fn search_stops_at_missing_attribute() {
    let data = people();
    let tall = filter! { height = 180 };
    let mut stream = ops::search(&data, &AttrAccessor, &tall).unwrap();
    assert_eq!(
        stream.next(),
        Some(Err(SiftError::MissingAttribute {
            attribute: "height".to_string()
        }))
    );
    assert!(stream.next().is_none());
}

#[test]
fn max_and_min() {
    let data = people();
    let oldest = ops::max(&data, &AttrAccessor, "age").unwrap();
    assert_eq!((oldest.name.as_str(), oldest.age), ("charlie", Some(35)));
    assert_eq!(ops::min(&data, &AttrAccessor, "age").unwrap().name, "bob");

    // alice is the first of the two poorest
    let poorest = ops::min(&data, &AttrAccessor, "money").unwrap();
    assert_eq!(poorest.name, "alice");
}

#[test]
fn max_rejects_mixed_types() {
    let data = people();
    assert!(matches!(
        ops::max(&data, &AttrAccessor, "name").map(|p| p.name.as_str()),
        Ok("charlie")
    ));
    let mixed = [Value::from(1), Value::from("one")];
    let docs: Vec<sift::Document> = mixed
        .iter()
        .map(|v| [("v".to_string(), v.clone())].into())
        .collect();
    assert!(matches!(
        ops::max(&docs, &sift::KeyAccessor, "v"),
        Err(SiftError::Unorderable { .. })
    ));
}

#[test]
fn sum_floats() {
    let data = people();
    assert_eq!(
        ops::sum(&data, &AttrAccessor, "money", &Filter::all()),
        Ok(Number::F64(600.0))
    );
    assert_eq!(
        ops::sum(&data, &AttrAccessor, "money", &filter! { tags = "smart" }),
        Ok(Number::F64(100.0))
    );
}

#[test]
fn distinct_over_objects() {
    let data = vec![
        Person::new("alice", 30, 1.0, &["friendly", "smart"]),
        Person::new("bob", 25, 1.0, &["kind", "smart"]),
        Person::new("charlie", 30, 1.0, &["friendly"]),
    ];
    assert_eq!(
        ops::distinct(&data, &AttrAccessor, "name"),
        Ok(vec![
            Value::from("alice"),
            Value::from("bob"),
            Value::from("charlie"),
        ])
    );
    assert_eq!(
        ops::distinct(&data, &AttrAccessor, "age"),
        Ok(vec![Value::from(30), Value::from(25)])
    );
}

#[test]
fn sort_slice_in_place() {
    let mut data = people();
    let by_age = SortKey::from("age");
    ops::sort(&mut data, &AttrAccessor, &by_age, true).unwrap();
    assert_eq!(names(&data), vec!["charlie", "alice", "bob"]);

    let key = SortKey::from(["money", "name"]);
    ops::sort(&mut data, &AttrAccessor, &key, false).unwrap();
    assert_eq!(names(&data), vec!["alice", "bob", "charlie"]);
}

#[test]
fn missing_age_sorts_last() {
    let mut data = people();
    data[0].age = None;
    let by_age = SortKey::from("age");
    ops::sort(&mut data, &AttrAccessor, &by_age, false).unwrap();
    assert_eq!(names(&data), vec!["bob", "charlie", "alice"]);
}

// ============================================================================
// Container
// ============================================================================

#[test]
fn groupby_age() {
    let data = ObjectContainer::new(vec![
        Person::new("Alice", 30, 0.0, &["friendly", "smart"]),
        Person::new("Bob", 25, 0.0, &["kind", "smart"]),
        Person::new("Charlie", 35, 0.0, &["friendly"]),
        Person::new("John", 25, 0.0, &["smart"]),
    ]);
    let groups = data.groupby("age").unwrap();
    assert_eq!(groups.len(), 3);

    let by_age: Vec<(Value, Vec<&str>)> = groups
        .into_iter()
        .map(|(age, members)| (age, names(members)))
        .collect();
    assert_eq!(
        by_age,
        vec![
            (Value::from(30), vec!["Alice"]),
            (Value::from(25), vec!["Bob", "John"]),
            (Value::from(35), vec!["Charlie"]),
        ]
    );
}

#[test]
fn groupby_list_field_keys_on_whole_list() {
    let data = ObjectContainer::new(people());
    let groups = data.count_values("tags").unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups.get(vec!["friendly"]), Some(&1));
}

#[test]
fn update_writes_typed_fields() {
    let mut data = ObjectContainer::new(people());
    let n = data
        .update(&filter! { tags = "smart" }, [("money", Value::from(0.5))])
        .unwrap();
    assert_eq!(n, 2);
    assert_eq!(data.sum("money", &Filter::all()), Ok(Number::F64(501.0)));

    data.update_first(&filter! { name = "charlie" }, [("tags", vec!["grumpy"])])
        .unwrap();
    assert_eq!(data[2].tags, vec!["grumpy".to_string()]);
}

#[test]
fn update_rejects_bad_writes() {
    let mut data = ObjectContainer::new(people());
    assert_eq!(
        data.update(&filter! { name = "bob" }, [("age", "old")]),
        Err(SiftError::InvalidAttribute {
            attribute: "age".to_string(),
            expected: "integer",
            found: "string",
        })
    );
    assert_eq!(
        data.update(&filter! { name = "bob" }, [("height", 180)]),
        Err(SiftError::MissingAttribute {
            attribute: "height".to_string()
        })
    );
    let bob = data.first(&filter! { name = "bob" }).unwrap();
    assert_eq!(bob.age, Some(25));
}

#[test]
fn failed_update_keeps_earlier_writes() {
    let mut data = ObjectContainer::new(people());
    let changes = [("money", Value::from(1.0)), ("height", Value::from(180))];
    assert_eq!(
        data.update(&filter! { tags = "smart" }, changes),
        Err(SiftError::MissingAttribute {
            attribute: "height".to_string()
        })
    );
    // alice's money was written before the unknown field stopped the update
    let money: Vec<f64> = data.iter().map(|p| p.money).collect();
    assert_eq!(money, vec![1.0, 50.0, 500.0]);
}

#[test]
fn update_to_null() {
    let mut data = ObjectContainer::new(people());
    data.update(&filter! { name = "alice" }, [("age", Value::Null)])
        .unwrap();
    assert_eq!(data[0].age, None);
    assert_eq!(data.count(&filter! { age = Value::Null }), Ok(1));
}

#[test]
fn delete_and_extend() {
    let mut data = ObjectContainer::new(people());
    assert_eq!(data.delete(&filter! { tags__not = "smart" }), Ok(1));
    assert_eq!(names(&data), vec!["alice", "bob"]);

    let removed = data.delete_first(&filter! { name = "alice" }).unwrap();
    assert_eq!(removed.name, "alice");

    data.extend(vec![removed]);
    assert_eq!(names(&data), vec!["bob", "alice"]);
}

#[test]
fn unique_objects() {
    let mut records = people();
    records.push(records[0].clone());
    let data = ObjectContainer::new(records);
    let unique = data.unique();
    assert_eq!(unique, ObjectContainer::new(people()));
    assert_eq!(data.len(), 4);
}

#[test]
fn max_on_empty_container() {
    let data: ObjectContainer<Person> = ObjectContainer::default();
    assert!(matches!(data.max("age"), Err(SiftError::NotFound { .. })));
    assert!(matches!(data.min("age"), Err(SiftError::NotFound { .. })));
}
