use dynrepo_core::{render, ParamEnv, RenderError, Value};

fn env_of(entries: Vec<(&str, Value)>) -> ParamEnv {
    entries.into_iter().collect()
}

#[test]
fn template_without_placeholders_renders_to_itself() {
    let template = "SELECT * FROM sys_config";
    let empty = render(template, &ParamEnv::new()).unwrap();
    assert_eq!(empty.as_str(), template);

    let populated = render(template, &env_of(vec![("id", Value::from(1))])).unwrap();
    assert_eq!(populated.as_str(), template);
}

#[test]
fn scalar_substitution_renders_unquoted_literal() {
    let env = env_of(vec![("id", Value::from(42))]);
    let query = render("SELECT * FROM t WHERE id = :id", &env).unwrap();
    assert_eq!(query.as_str(), "SELECT * FROM t WHERE id = 42");
}

#[test]
fn real_and_bool_render_unquoted() {
    let env = env_of(vec![("ratio", Value::from(0.5)), ("active", Value::from(true))]);
    let query = render(
        "SELECT * FROM t WHERE ratio > :ratio AND active = :active",
        &env,
    )
    .unwrap();
    assert_eq!(
        query.as_str(),
        "SELECT * FROM t WHERE ratio > 0.5 AND active = true"
    );
}

#[test]
fn text_substitution_renders_quoted_literal() {
    let env = env_of(vec![("name", Value::from("Ann"))]);
    let query = render("SELECT * FROM t WHERE name = :name", &env).unwrap();
    assert_eq!(query.as_str(), "SELECT * FROM t WHERE name = 'Ann'");
}

#[test]
fn text_with_embedded_quote_is_escaped_not_stripped() {
    let env = env_of(vec![("name", Value::from("O'Hara"))]);
    let query = render("SELECT * FROM t WHERE name = :name", &env).unwrap();
    assert_eq!(query.as_str(), "SELECT * FROM t WHERE name = 'O''Hara'");
}

#[test]
fn sequence_expands_to_sql_value_list() {
    let env = env_of(vec![(
        "ids",
        Value::Sequence(vec![Value::from(1), Value::from(2), Value::from(3)]),
    )]);
    let query = render("SELECT * FROM t WHERE id IN :ids", &env).unwrap();
    assert_eq!(query.as_str(), "SELECT * FROM t WHERE id IN (1,2,3)");
}

#[test]
fn text_sequence_elements_are_quoted() {
    let env = env_of(vec![(
        "names",
        Value::Sequence(vec![Value::from("Ann"), Value::from("Bo")]),
    )]);
    let query = render("SELECT * FROM t WHERE name IN :names", &env).unwrap();
    assert_eq!(query.as_str(), "SELECT * FROM t WHERE name IN ('Ann','Bo')");
}

#[test]
fn nested_property_renders_field_literal() {
    let env = env_of(vec![(
        "user",
        Value::object(vec![("id", Value::from(7)), ("name", Value::from("Bo"))]),
    )]);

    let by_id = render("SELECT * FROM t WHERE uid = :user.id", &env).unwrap();
    assert_eq!(by_id.as_str(), "SELECT * FROM t WHERE uid = 7");

    let by_name = render("SELECT * FROM t WHERE name = :user.name", &env).unwrap();
    assert_eq!(by_name.as_str(), "SELECT * FROM t WHERE name = 'Bo'");
}

#[test]
fn insert_object_expands_to_positional_field_list() {
    let env = env_of(vec![(
        "user",
        Value::object(vec![("name", Value::from("Bob")), ("age", Value::from(30))]),
    )]);
    let query = render("INSERT INTO users (name, age) VALUES (:user)", &env).unwrap();
    assert_eq!(
        query.as_str(),
        "INSERT INTO users (name, age) VALUES ('Bob',30)"
    );
}

#[test]
fn insert_object_renders_null_fields_as_null_literal() {
    let env = env_of(vec![(
        "user",
        Value::object(vec![
            ("name", Value::from("Bob")),
            ("nickname", Value::Null),
        ]),
    )]);
    let query = render("INSERT INTO users (name, nickname) VALUES (:user)", &env).unwrap();
    assert_eq!(
        query.as_str(),
        "INSERT INTO users (name, nickname) VALUES ('Bob',null)"
    );
}

#[test]
fn object_expansion_outside_insert_is_malformed() {
    let env = env_of(vec![("user", Value::object(vec![("id", Value::from(1))]))]);
    let err = render("SELECT * FROM t WHERE u = :user", &env).unwrap_err();
    assert!(matches!(err, RenderError::MalformedTemplate(_)));
}

#[test]
fn missing_parameter_fails_without_partial_output() {
    let err = render("SELECT * FROM t WHERE id = :id", &ParamEnv::new()).unwrap_err();
    assert!(matches!(err, RenderError::ParameterNotFound(name) if name == "id"));
}

#[test]
fn missing_property_reports_property_not_found() {
    let env = env_of(vec![("user", Value::object(vec![("id", Value::from(1))]))]);
    let err = render("SELECT * FROM t WHERE x = :user.missing", &env).unwrap_err();
    assert!(matches!(
        err,
        RenderError::PropertyNotFound { parameter, property }
            if parameter == "user" && property == "missing"
    ));
}

#[test]
fn property_access_on_scalar_reports_property_not_found() {
    let env = env_of(vec![("id", Value::from(1))]);
    let err = render("SELECT * FROM t WHERE x = :id.value", &env).unwrap_err();
    assert!(matches!(err, RenderError::PropertyNotFound { .. }));
}

#[test]
fn insert_field_of_sequence_kind_is_unsupported() {
    let env = env_of(vec![(
        "user",
        Value::object(vec![
            ("name", Value::from("Bob")),
            ("tags", Value::Sequence(vec![Value::from("a")])),
        ]),
    )]);
    let err = render("INSERT INTO users (name, tags) VALUES (:user)", &env).unwrap_err();
    assert!(matches!(
        err,
        RenderError::UnsupportedPropertyType { kind: "sequence", .. }
    ));
}

#[test]
fn malformed_token_grammar_is_rejected() {
    let env = env_of(vec![("a", Value::from(1))]);
    let err = render("SELECT :a.b.c FROM t", &env).unwrap_err();
    assert!(matches!(err, RenderError::MalformedTemplate(_)));
}
