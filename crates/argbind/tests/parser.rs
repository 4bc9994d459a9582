use argbind::{ArgType, Args, ParseError, Shape, Value};

#[derive(Debug, PartialEq, Args)]
struct Basic {
    #[arg(short = "a")]
    about: String,
    #[arg(default = "B")]
    b: String,
}

#[derive(Debug, PartialEq, Args)]
struct Multivalue {
    #[arg(default)]
    file: Vec<String>,
}

#[derive(Debug, PartialEq, Args)]
struct Typed {
    #[arg(short = "i", default = 0)]
    int: i64,
    #[arg(default = "hello")]
    string: String,
    #[arg(default = 3.5)]
    float: f64,
    #[arg(default)]
    array: Vec<String>,
    #[arg(default)]
    doit: bool,
}

impl Default for Typed {
    fn default() -> Self {
        Self {
            int: 0,
            string: "hello".to_string(),
            float: 3.5,
            array: Vec::new(),
            doit: false,
        }
    }
}

#[derive(Debug, PartialEq, Args)]
struct ABoolean {
    #[arg(short = "f", default = false)]
    flag: bool,
}

#[derive(Debug, PartialEq, Args)]
struct Missing {
    required: String,
}

#[derive(Debug, PartialEq, Args)]
#[args(post_load = "calculate")]
struct Callback {
    a: i64,
    b: i64,
    #[arg(skip)]
    sum: i64,
}

impl Callback {
    fn calculate(&mut self) {
        self.sum = self.a + self.b;
    }
}

#[derive(Debug, Args)]
#[args(post_load = "first", post_load = "second")]
#[args(post_load = "third")]
struct Hooks {
    #[arg(long = "--name", short = "-n")]
    label: String,
    #[arg(skip)]
    log: Vec<String>,
}

impl Hooks {
    fn first(&mut self) {
        self.log.push(format!("first:{}", self.label));
    }

    fn second(&mut self) {
        self.log.push("second".to_string());
    }

    fn third(&mut self) {
        self.log.push("third".to_string());
    }
}

mod all_skipped {
    #![deny(unused_variables, unused_mut)]

    use argbind::Args;

    #[derive(Debug, Default, PartialEq, Args)]
    pub struct Nothing {
        #[arg(skip)]
        pub count: i64,
        #[arg(skip)]
        pub names: Vec<String>,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn basic_long_name() {
    let got = Basic::parse_from(["prog", "--about=A"]).unwrap();
    assert_eq!(
        got,
        Basic {
            about: "A".to_string(),
            b: "B".to_string(),
        }
    );
}

#[test]
fn basic_short_name() {
    let got = Basic::parse_from(["prog", "-a=A"]).unwrap();
    assert_eq!(got.about, "A");
    assert_eq!(got.b, "B");
}

#[test]
fn multi_value_long_parameter() {
    let got = Multivalue::parse_from(["prog", "--file=A", "--file=B"]).unwrap();
    assert_eq!(got.file, strings(&["A", "B"]));

    let got = Multivalue::parse_from(["prog", "--file=A", "--file=B", "--file=C"]).unwrap();
    assert_eq!(got.file, strings(&["A", "B", "C"]));
}

#[test]
fn typed_with_single_array_value() {
    let got = Typed::parse_from([
        "prog",
        "--int=5",
        "--string=world",
        "--float=2.7",
        "--array=val",
        "--doit",
    ])
    .unwrap();
    assert_eq!(
        got,
        Typed {
            int: 5,
            string: "world".to_string(),
            float: 2.7,
            array: strings(&["val"]),
            doit: true,
        }
    );
}

#[test]
fn typed_with_multiple_array_values() {
    let got = Typed::parse_from([
        "prog",
        "--int=5",
        "--string=world",
        "--float=2.7",
        "--array=beep",
        "--array=boop",
    ])
    .unwrap();
    assert_eq!(got.array, strings(&["beep", "boop"]));
    assert!(!got.doit);
}

#[test]
fn integer_form_is_accepted_for_float() {
    let got = Typed::parse_from(["prog", "--int=5", "--float=2", "--array=val"]).unwrap();
    assert_eq!(got.float, 2.0);
}

#[test]
fn numeric_text_stays_a_string() {
    let got = Typed::parse_from(["prog", "--string=3.14", "--float=2"]).unwrap();
    assert_eq!(got.string, "3.14");
}

#[test]
fn integer_accepts_zero_fraction() {
    let got = Typed::parse_from(["prog", "--int=5.0"]).unwrap();
    assert_eq!(got.int, 5);
}

#[test]
fn defaults_are_used() {
    let got = Typed::parse_from(["prog"]).unwrap();
    assert_eq!(got, Typed::default());
}

#[test]
fn callbacks_are_called() {
    let got = Callback::parse_from(["prog", "--a=3", "--b=4"]).unwrap();
    assert_eq!(got, Callback { a: 3, b: 4, sum: 7 });
}

#[test]
fn hooks_run_in_declaration_order_after_population() {
    let got = Hooks::parse_from(["prog", "-n=x"]).unwrap();
    assert_eq!(got.label, "x");
    assert_eq!(got.log, strings(&["first:x", "second", "third"]));

    let def = Hooks::definition().unwrap();
    assert_eq!(def.post_load(), strings(&["first", "second", "third"]));
    assert_eq!(def.args().len(), 1);
    assert_eq!(def.args()[0].name(), "label");
    assert_eq!(def.args()[0].long(), "name");
    assert_eq!(def.args()[0].short(), Some("n"));
}

#[test]
fn extraneous_values_are_ignored() {
    let got = Multivalue::parse_from(["prog", "someCommand", "--file=A", "--file=B"]).unwrap();
    assert_eq!(got.file, strings(&["A", "B"]));
}

#[test]
fn truthy_values_are_true() {
    for val in ["1", "true", "yes", "on", "TRUE", "On"] {
        let long = ABoolean::parse_from(["prog".to_string(), format!("--flag={val}")]).unwrap();
        assert!(long.flag, "--flag={val} should be true");
        let short = ABoolean::parse_from(["prog".to_string(), format!("-f={val}")]).unwrap();
        assert!(short.flag, "-f={val} should be true");
    }
}

#[test]
fn other_values_are_false() {
    for val in ["0", "false", "no", "off", "nope", "narf"] {
        let long = ABoolean::parse_from(["prog".to_string(), format!("--flag={val}")]).unwrap();
        assert!(!long.flag, "--flag={val} should be false");
        let short = ABoolean::parse_from(["prog".to_string(), format!("-f={val}")]).unwrap();
        assert!(!short.flag, "-f={val} should be false");
    }
}

#[test]
fn bare_flag_is_true() {
    assert!(ABoolean::parse_from(["prog", "--flag"]).unwrap().flag);
    assert!(ABoolean::parse_from(["prog", "-f"]).unwrap().flag);
    assert!(!ABoolean::parse_from(["prog"]).unwrap().flag);
}

#[test]
fn unknown_argument_is_rejected() {
    let err = Basic::parse_from(["prog", "--about=A", "--C"]).unwrap_err();
    match err {
        ParseError::UnknownArguments { names } => assert_eq!(names, strings(&["C"])),
        other => panic!("expected UnknownArguments, got: {other:?}"),
    }
}

#[test]
fn float_into_int_is_rejected() {
    let err = Typed::parse_from(["prog", "--int=5.5", "--float=2.7"]).unwrap_err();
    assert_eq!(
        err,
        ParseError::TypeMismatch {
            name: "int".to_string(),
            expected: ArgType::Integer,
            actual: Shape::Value("5.5".to_string()),
        }
    );
}

#[test]
fn array_into_int_is_rejected() {
    let err = Typed::parse_from(["prog", "--int=5", "--int=7"]).unwrap_err();
    match err {
        ParseError::TypeMismatch { name, actual, .. } => {
            assert_eq!(name, "int");
            assert_eq!(actual, Shape::Values(2));
        }
        other => panic!("expected TypeMismatch, got: {other:?}"),
    }
}

#[test]
fn long_and_short_together_are_rejected() {
    let err = Typed::parse_from(["prog", "-i=5", "--int=7"]).unwrap_err();
    match err {
        ParseError::ConflictingAlias { long, short } => {
            assert_eq!(long, "int");
            assert_eq!(short, "i");
        }
        other => panic!("expected ConflictingAlias, got: {other:?}"),
    }
}

#[test]
fn missing_required_argument() {
    let err = Missing::parse_from(["prog"]).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingArgument {
            long: "required".to_string(),
            short: None,
        }
    );
    assert_eq!(err.to_string(), "required argument --required not found");

    let err = Basic::parse_from(["prog"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "required argument --about (or short name -a) not found"
    );
}

#[test]
fn derived_definition_records_types_and_defaults() {
    let def = Typed::definition().unwrap();
    let summary: Vec<(&str, ArgType, Option<&Value>)> = def
        .args()
        .iter()
        .map(|a| (a.long(), a.ty(), a.default_value()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("int", ArgType::Integer, Some(&Value::Integer(0))),
            ("string", ArgType::String, Some(&Value::String("hello".to_string()))),
            ("float", ArgType::Float, Some(&Value::Float(3.5))),
            ("array", ArgType::StringList, Some(&Value::StringList(Vec::new()))),
            ("doit", ArgType::Boolean, Some(&Value::Boolean(false))),
        ]
    );
}

#[test]
fn parse_helper_matches_trait_method() {
    let argv = ["prog", "--int=5", "--array=a", "--array=b"];
    let a: Typed = argbind::parse(&argv).unwrap();
    let b = Typed::parse_from(argv).unwrap();
    assert_eq!(a, b);
}

#[test]
fn struct_without_arguments_binds_nothing() {
    use all_skipped::Nothing;

    assert_eq!(Nothing::parse_from(["prog"]).unwrap(), Nothing::default());
    assert!(Nothing::definition().unwrap().args().is_empty());

    let err = Nothing::parse_from(["prog", "--count=3"]).unwrap_err();
    match err {
        ParseError::UnknownArguments { names } => assert_eq!(names, strings(&["count"])),
        other => panic!("expected UnknownArguments, got: {other:?}"),
    }
}

#[test]
fn free_parse_from_matches_trait_method() {
    let argv = vec!["prog".to_string(), "-a=A".to_string()];
    let a: Basic = argbind::parse_from(argv.iter()).unwrap();
    let b = Basic::parse_from(argv).unwrap();
    assert_eq!(a, b);
}
