use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder that stands in for a template or timestamp in a template string
pub const PLACEHOLDER: &str = "%v";

/// One statement of a stress script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// Native query accepted verbatim by the external grammar
    Passthrough(PassthroughStatement),
    /// Point generator: `INSERT cpu,host=[...] value=[...] 100 10s`
    Insert(InsertStatement),
    /// Templated query: `QUERY q1 select ... DO 100`
    Query(QueryStatement),
    /// Run another script: `EXEC name`
    Exec(ExecStatement),
    /// Assign a variable: `SET name value`
    Set(SetStatement),
    /// Barrier for outstanding `GO` statements
    Wait(WaitStatement),
    /// Run the wrapped statement without blocking: `GO <stmt>`
    Go(GoStatement),
}

impl Statement {
    /// Short upper-case name of the variant
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Passthrough(_) => "PASSTHROUGH",
            Statement::Insert(_) => "INSERT",
            Statement::Query(_) => "QUERY",
            Statement::Exec(_) => "EXEC",
            Statement::Set(_) => "SET",
            Statement::Wait(_) => "WAIT",
            Statement::Go(_) => "GO",
        }
    }
}

/// Chunk text handed through to the native query language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassthroughStatement {
    /// Raw chunk text, unmodified
    pub raw_text: String,
}

/// Point-generating statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertStatement {
    /// Measurement name
    pub name: String,
    /// Line protocol with one `%v` per template and a final one for the timestamp
    pub template_string: String,
    /// Bracketed templates, in source order
    pub templates: Vec<Template>,
    /// Trailing time step
    pub timestamp: Option<Timestamp>,
}

impl InsertStatement {
    /// Number of `%v` placeholders the template string carries
    pub fn placeholder_count(&self) -> usize {
        self.template_string.matches(PLACEHOLDER).count()
    }
}

/// Bracketed `[...]` clause of an INSERT
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Plain identifiers listed in the brackets
    pub tags: Vec<String>,
    /// Value generators listed in the brackets
    pub functions: Vec<Function>,
}

/// Value generator: `TYPE name(argument) count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Type of the generated values
    pub value_type: ValueType,
    /// Generator name
    pub name: String,
    /// Numeric argument, as written
    pub argument: String,
    /// Number of distinct values, as written
    pub count: String,
}

/// Value type of a generator function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// `STR`
    Str,
    /// `INT`
    Int,
    /// `FLOAT`
    Float,
}

/// Trailing `count duration` of an INSERT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Number of points, as written
    pub count: String,
    /// Step between points. After an explicit count this is the whole
    /// duration lexeme (`10000 10s` gives `10s`); a lone duration supplies
    /// the count itself and only its unit is kept (`10s` gives `s`).
    pub duration: String,
    /// Randomize point times; no syntax sets it yet
    pub jitter: bool,
}

/// Templated query statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStatement {
    /// Query name
    pub name: String,
    /// Query text with a `%v` for each template variable
    pub template_string: String,
    /// Template variables (`%s`, `%d`, ...) in source order
    pub args: Vec<String>,
    /// How many times to run the query, as written
    pub count: String,
}

impl QueryStatement {
    /// Number of `%v` placeholders the template string carries
    pub fn placeholder_count(&self) -> usize {
        self.template_string.matches(PLACEHOLDER).count()
    }
}

/// `EXEC script`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecStatement {
    /// Script to run
    pub script_name: String,
}

/// `SET variable value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStatement {
    /// Variable being set
    pub variable_name: String,
    /// New value, as written
    pub value: String,
}

/// `WAIT`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitStatement {}

/// `GO <stmt>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoStatement {
    /// Statement to run asynchronously. `None` when `GO` is followed by
    /// anything other than INSERT, QUERY or EXEC.
    pub inner: Option<Box<GoTarget>>,
}

/// Statements that may follow `GO`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoTarget {
    /// `GO INSERT ...`
    Insert(InsertStatement),
    /// `GO QUERY ...`
    Query(QueryStatement),
    /// `GO EXEC ...`
    Exec(ExecStatement),
}

impl From<GoTarget> for Statement {
    fn from(target: GoTarget) -> Self {
        match target {
            GoTarget::Insert(s) => Statement::Insert(s),
            GoTarget::Query(s) => Statement::Query(s),
            GoTarget::Exec(s) => Statement::Exec(s),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueType::Str => write!(f, "STR"),
            ValueType::Int => write!(f, "INT"),
            ValueType::Float => write!(f, "FLOAT"),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}({}) {}",
            self.value_type, self.name, self.argument, self.count
        )
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.count, self.duration)
    }
}
