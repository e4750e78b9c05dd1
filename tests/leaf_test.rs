use serde_json::{json, Value};
use verdict::{Container, InvalidArgument, JsonType, Rule, Validator};

fn single_message(validator: &dyn Validator, input: &Value) -> String {
    let failures: Vec<_> = validator.validate(input).collect();
    assert_eq!(failures.len(), 1, "expected exactly one failure");
    assert!(failures[0].instance_path.is_root());
    failures[0].message.clone()
}

// ====== type Tests ======

#[test]
fn test_type_leaves() {
    let cases: Vec<(Box<dyn Validator>, Value, Value)> = vec![
        (Box::new(Rule::string()), json!("s"), json!(1)),
        (Box::new(Rule::number()), json!(1.5), json!("1.5")),
        (Box::new(Rule::integer()), json!(-4), json!(4.5)),
        (Box::new(Rule::boolean()), json!(false), json!(0)),
        (Box::new(Rule::null()), json!(null), json!(false)),
        (Box::new(Rule::array()), json!([]), json!({})),
        (Box::new(Rule::object()), json!({}), json!([])),
    ];

    for (validator, accepted, rejected) in cases {
        assert!(validator.is(&accepted), "{} should accept {}", validator, accepted);
        assert!(!validator.is(&rejected), "{} should reject {}", validator, rejected);
        assert_eq!(validator.validate(&rejected).count(), 1);
    }
}

#[test]
fn test_type_messages() {
    assert_eq!(
        single_message(&Rule::string(), &json!(0)),
        "should be string, but 0"
    );
    assert_eq!(
        single_message(&Rule::number(), &json!([1])),
        "should be number, but array"
    );
    assert_eq!(
        single_message(&Rule::type_of(JsonType::Boolean), &json!("true")),
        "should be boolean, but \"true\""
    );
}

#[test]
fn test_instance_of() {
    let array = Rule::instance_of(Container::Array);
    assert!(array.is(&json!([1])));
    assert_eq!(array.to_string(), "instance of Array");
    assert_eq!(
        single_message(&array, &json!({"0": 1})),
        "should be instance of Array, but object"
    );
}

// ====== value Tests ======

#[test]
fn test_equality() {
    let zero = Rule::eq(0);
    assert!(zero.is(&json!(0)));
    assert_eq!(single_message(&zero, &json!(1)), "should be 0, but 1");

    let not_empty = Rule::ne("");
    assert!(not_empty.is(&json!("x")));
    assert_eq!(single_message(&not_empty, &json!("")), "should be not \"\", but \"\"");
}

#[test]
fn test_enumeration() {
    let role = Rule::enumeration(["admin", "user"]);
    assert!(role.is(&json!("user")));
    assert_eq!(
        single_message(&role, &json!("root")),
        "should be \"admin\" or \"user\", but \"root\""
    );
}

// ====== ordering Tests ======

#[test]
fn test_comparisons() {
    assert!(Rule::gt(1).is(&json!(2)));
    assert!(!Rule::gt(1).is(&json!(1)));
    assert!(Rule::gte(1).is(&json!(1)));
    assert!(Rule::lt(1.5).is(&json!(1)));
    assert!(Rule::lte(1).is(&json!(1.0)));

    // Strings compare lexically; kinds never mix
    assert!(Rule::lt("b").is(&json!("a")));
    assert!(!Rule::lt("b").is(&json!(1)));
    assert!(!Rule::gt(0).is(&json!("1")));
}

#[test]
fn test_between_inclusive() {
    let byte = Rule::between(-127, 128).unwrap();
    assert!(byte.is(&json!(-127)));
    assert!(byte.is(&json!(0)));
    assert!(byte.is(&json!(128)));
    assert!(!byte.is(&json!(129)));
    assert_eq!(
        single_message(&byte, &json!(200)),
        "should be between -127 and 128, but 200"
    );
}

#[test]
fn test_between_construction_guard() {
    assert!(matches!(
        Rule::between(10, 10),
        Err(InvalidArgument::Range { .. })
    ));
    assert!(matches!(
        Rule::between(10, 1),
        Err(InvalidArgument::Range { .. })
    ));
    assert!(matches!(
        Rule::between(f64::NAN, 1.0),
        Err(InvalidArgument::Range { .. })
    ));
    assert!(matches!(
        Rule::between(1, "z"),
        Err(InvalidArgument::MixedBounds { .. })
    ));
    assert!(Rule::between("a", "m").unwrap().is(&json!("hello")));
}

// ====== pattern Tests ======

#[test]
fn test_pattern() {
    let slug = Rule::pattern("^[a-z-]+$").unwrap();
    assert!(slug.is(&json!("hello-world")));
    assert!(!slug.is(&json!("Hello")));
    assert!(!slug.is(&json!(7)));

    let err = Rule::pattern("(").unwrap_err();
    assert!(err.to_string().starts_with("invalid pattern"));
}

// ====== count Tests ======

#[test]
fn test_count_templates() {
    assert_eq!(
        single_message(&Rule::max_count(1), &json!({"a": 1, "b": 2})),
        "item count should be less than or equal to 1, but 2"
    );
    assert_eq!(
        single_message(&Rule::min_count(3), &json!("ab")),
        "item count should be greater than or equal to 3, but 2"
    );
}
