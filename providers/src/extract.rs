use axiom_bench::{ExtractionError, SignalExtractor};
use axiom_types::{AxiomSignals, DEFAULT_STEP, DEFAULT_TIME};
use serde_json::{Map, Value};

/// Reads signals from the first JSON object embedded in a model response.
///
/// The object may sit inside prose or a fenced code block. `impulses`,
/// `elements`, `pressure`, `subjectivity` and `purpose` are required numbers;
/// `time` defaults to 1.0 and `n` to 1. Range checks are left to the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSignalExtractor;

impl JsonSignalExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignalExtractor for JsonSignalExtractor {
    fn extract(&self, _prompt: &str, response: &str) -> Result<AxiomSignals, ExtractionError> {
        let object = first_json_object(response).ok_or_else(|| {
            ExtractionError::Malformed("no JSON object found in response".to_string())
        })?;

        let signals = AxiomSignals {
            impulses: required(&object, "impulses")?,
            elements: required(&object, "elements")?,
            pressure: required(&object, "pressure")?,
            subjectivity: required(&object, "subjectivity")?,
            purpose: required(&object, "purpose")?,
            time: optional(&object, "time")?.unwrap_or(DEFAULT_TIME),
            n: step(&object)?,
        };
        tracing::trace!(?signals, "extracted signals");
        Ok(signals)
    }
}

fn first_json_object(text: &str) -> Option<Map<String, Value>> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(map))) => Some(map),
            _ => None,
        }
    })
}

fn optional(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<f64>, ExtractionError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            ExtractionError::Malformed(format!("`{field}` is not a number: {value}"))
        }),
    }
}

fn required(object: &Map<String, Value>, field: &'static str) -> Result<f64, ExtractionError> {
    optional(object, field)?.ok_or(ExtractionError::MissingField(field))
}

/// Integral `n`; a float is truncated and saturates at the `i64` range.
fn step(object: &Map<String, Value>) -> Result<i64, ExtractionError> {
    match object.get("n") {
        None | Some(Value::Null) => Ok(DEFAULT_STEP),
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .ok_or_else(|| ExtractionError::Malformed(format!("`n` is not a number: {value}"))),
    }
}
