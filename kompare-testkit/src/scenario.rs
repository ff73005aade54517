//! Test scenario definitions.

use std::fmt;
use std::path::{Path, PathBuf};

use fs_err as fs;
use kompare_core::helpers::convert::check_yaml_keys;
use kompare_core::{MismatchKind, Value, TOP_LEVEL};
use serde::Deserialize;

/// A comparison scenario for conformance testing.
///
/// Defines two values and the divergences comparing them must produce.
/// An empty expectation list means the two values must compare equal.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,

    /// Description of what this scenario tests.
    pub description: String,

    /// The actual value.
    pub actual: Value,

    /// The expected value.
    pub expected: Value,

    /// Divergences the comparison must produce, in any order.
    pub expect: Vec<ExpectedDivergence>,
}

/// A scenario document as written on disk. `V` is the document format's own
/// value type, so each format converts its values the way its parser does.
#[derive(Deserialize)]
struct ScenarioDocument<V> {
    name: String,
    #[serde(default)]
    description: String,
    actual: V,
    expected: V,
    #[serde(default)]
    expect: Vec<ExpectedDivergence>,
}

impl<V: Into<Value>> ScenarioDocument<V> {
    fn into_scenario(self) -> Scenario {
        Scenario {
            name: self.name,
            description: self.description,
            actual: self.actual.into(),
            expected: self.expected.into(),
            expect: self.expect,
        }
    }
}

/// One divergence a scenario expects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpectedDivergence {
    /// Rendered path. Empty (or `TOP LEVEL`) for the root.
    #[serde(default)]
    pub path: String,

    /// Expected mismatch kind.
    pub kind: MismatchKind,
}

impl ExpectedDivergence {
    /// Create an expectation.
    pub fn new(path: &str, kind: MismatchKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }

    /// The path as the comparator renders it.
    pub fn rendered_path(&self) -> &str {
        if self.path == TOP_LEVEL {
            ""
        } else {
            &self.path
        }
    }
}

/// Scenario file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
    Toml,
}

impl ScenarioFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(ScenarioFormat::Yaml),
            "json" => Some(ScenarioFormat::Json),
            "toml" => Some(ScenarioFormat::Toml),
            _ => None,
        }
    }
}

impl Scenario {
    /// Create a new scenario builder.
    pub fn builder(name: &str) -> ScenarioBuilder {
        ScenarioBuilder::new(name)
    }

    /// Load a scenario from a YAML, JSON or TOML file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let format = ScenarioFormat::from_path(path).ok_or_else(|| ScenarioError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
        let text = fs::read_to_string(path)?;
        let scenario = Self::parse(&text, format).map_err(|message| ScenarioError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        log::debug!("Loaded scenario '{}' from {}", scenario.name, path.display());
        Ok(scenario)
    }

    /// Parse a scenario document.
    pub fn parse(text: &str, format: ScenarioFormat) -> Result<Self, String> {
        match format {
            ScenarioFormat::Yaml => {
                let doc: ScenarioDocument<serde_yaml::Value> =
                    serde_yaml::from_str(text).map_err(|e| e.to_string())?;
                check_yaml_keys(&doc.actual)
                    .and_then(|()| check_yaml_keys(&doc.expected))
                    .map_err(|e| e.to_string())?;
                Ok(doc.into_scenario())
            }
            ScenarioFormat::Json => serde_json::from_str::<ScenarioDocument<serde_json::Value>>(text)
                .map(ScenarioDocument::into_scenario)
                .map_err(|e| e.to_string()),
            ScenarioFormat::Toml => toml::from_str::<ScenarioDocument<toml::Value>>(text)
                .map(ScenarioDocument::into_scenario)
                .map_err(|e| e.to_string()),
        }
    }

    /// Whether the two sides are expected to compare equal.
    pub fn expects_equal(&self) -> bool {
        self.expect.is_empty()
    }
}

/// Builder for creating scenarios.
pub struct ScenarioBuilder {
    name: String,
    description: String,
    actual: Value,
    expected: Value,
    expect: Vec<ExpectedDivergence>,
}

impl ScenarioBuilder {
    /// Create a new builder. Both sides start as `Null`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            actual: Value::Null,
            expected: Value::Null,
            expect: Vec::new(),
        }
    }

    /// Set the description.
    pub fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Set the actual value.
    pub fn actual(mut self, value: impl Into<Value>) -> Self {
        self.actual = value.into();
        self
    }

    /// Set the expected value.
    pub fn expected(mut self, value: impl Into<Value>) -> Self {
        self.expected = value.into();
        self
    }

    /// Expect a divergence at a rendered path.
    pub fn expect(mut self, path: &str, kind: MismatchKind) -> Self {
        self.expect.push(ExpectedDivergence::new(path, kind));
        self
    }

    /// Build the scenario.
    pub fn build(self) -> Scenario {
        Scenario {
            name: self.name,
            description: self.description,
            actual: self.actual,
            expected: self.expected,
            expect: self.expect,
        }
    }
}

/// Error type for scenario loading and checking.
#[derive(Debug)]
pub enum ScenarioError {
    /// I/O error.
    Io(std::io::Error),
    /// The file extension is not a known scenario format.
    UnknownFormat { path: PathBuf },
    /// The file could not be parsed as a scenario.
    Parse { path: PathBuf, message: String },
    /// One or more scenarios did not produce their expected divergences.
    Failed { report: String },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "I/O error: {}", e),
            ScenarioError::UnknownFormat { path } => {
                write!(f, "unknown scenario format: {}", path.display())
            }
            ScenarioError::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            ScenarioError::Failed { report } => write!(f, "scenarios failed:\n{}", report),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<std::io::Error> for ScenarioError {
    fn from(e: std::io::Error) -> Self {
        ScenarioError::Io(e)
    }
}

/// Standard scenarios covering the comparison policy.
pub mod standard {
    use super::*;
    use kompare_core::Record;

    fn nested(z: Value, extra: Option<(&str, Value)>, a: Value) -> Value {
        let mut inner = vec![("z", z), ("a", a)];
        if let Some(entry) = extra {
            inner.push(entry);
        }
        Value::map(vec![("x", Value::from(1)), ("y", Value::map(inner))])
    }

    /// Identical text.
    pub fn scalar_equal() -> Scenario {
        Scenario::builder("scalar_equal")
            .description("Identical text compares equal")
            .actual("someval")
            .expected("someval")
            .build()
    }

    /// Different text at the root.
    pub fn scalar_mismatch() -> Scenario {
        Scenario::builder("scalar_mismatch")
            .description("Different text is one value mismatch at the root")
            .actual("someval")
            .expected("someotherval")
            .expect("", MismatchKind::ValueMismatch)
            .build()
    }

    /// Null against null.
    pub fn null_equal() -> Scenario {
        Scenario::builder("null_equal")
            .description("Null compares equal to null")
            .build()
    }

    /// One leaf differs inside nested maps.
    pub fn nested_value_mismatch() -> Scenario {
        Scenario::builder("nested_value_mismatch")
            .description("A nested leaf difference is reported at its full path")
            .actual(nested("blah".into(), None, "blah".into()))
            .expected(nested("bloop".into(), None, "blah".into()))
            .expect("y.z", MismatchKind::ValueMismatch)
            .build()
    }

    /// Key sets differ; nothing below is compared.
    pub fn keys_differ() -> Scenario {
        Scenario::builder("keys_differ")
            .description("Different key sets stop recursion into that mapping")
            .actual(nested("blah".into(), None, "blah".into()))
            .expected(nested("bloop".into(), Some(("q", "blah".into())), 1.into()))
            .expect("y", MismatchKind::KeysDiffer)
            .build()
    }

    /// Sequence lengths differ.
    pub fn length_mismatch() -> Scenario {
        Scenario::builder("length_mismatch")
            .description("Different sequence lengths stop recursion into that sequence")
            .actual(Value::map(vec![
                ("x", Value::from(1)),
                ("y", Value::list(vec!["z", "a"])),
            ]))
            .expected(Value::map(vec![
                ("x", Value::from(1)),
                ("y", Value::list(vec!["z", "q", "a"])),
            ]))
            .expect("y", MismatchKind::LengthMismatch)
            .build()
    }

    /// Runtime types differ.
    pub fn type_mismatch() -> Scenario {
        Scenario::builder("type_mismatch")
            .description("A list against a map is a type mismatch, not compared further")
            .actual(Value::map(vec![("x", Value::list(vec![1]))]))
            .expected(Value::map(vec![("x", Value::map(vec![("a", 1)]))]))
            .expect("x", MismatchKind::TypeMismatch)
            .build()
    }

    /// Independent divergences in sibling subtrees.
    pub fn sibling_divergences() -> Scenario {
        Scenario::builder("sibling_divergences")
            .description("Every independent divergence is reported in one comparison")
            .actual(Value::map(vec![
                ("a", Value::from(1)),
                ("b", Value::list(vec![1, 2])),
                ("c", Value::list(vec![Value::map(vec![("d", "x")])])),
            ]))
            .expected(Value::map(vec![
                ("a", Value::from(2)),
                ("b", Value::list(vec![1])),
                ("c", Value::list(vec![Value::map(vec![("d", "y")])])),
            ]))
            .expect("a", MismatchKind::ValueMismatch)
            .expect("b", MismatchKind::LengthMismatch)
            .expect("c[0].d", MismatchKind::ValueMismatch)
            .build()
    }

    /// Records compared field by field.
    pub fn record_fields() -> Scenario {
        Scenario::builder("record_fields")
            .description("Records are unwrapped into mappings of their fields")
            .actual(Record::new("Point").field("x", 1).field("y", 2))
            .expected(Record::new("Point").field("x", 1).field("y", 3))
            .expect("y", MismatchKind::ValueMismatch)
            .build()
    }

    /// Empty containers on both sides.
    pub fn empty_containers() -> Scenario {
        Scenario::builder("empty_containers")
            .description("Empty mappings and sequences compare equal")
            .actual(Value::map(vec![
                ("m", Value::map(Vec::<(&str, Value)>::new())),
                ("l", Value::list(Vec::<Value>::new())),
            ]))
            .expected(Value::map(vec![
                ("m", Value::map(Vec::<(&str, Value)>::new())),
                ("l", Value::list(Vec::<Value>::new())),
            ]))
            .build()
    }

    /// All standard scenarios.
    pub fn all() -> Vec<Scenario> {
        vec![
            scalar_equal(),
            scalar_mismatch(),
            null_equal(),
            nested_value_mismatch(),
            keys_differ(),
            length_mismatch(),
            type_mismatch(),
            sibling_divergences(),
            record_fields(),
            empty_containers(),
        ]
    }
}
