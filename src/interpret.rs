use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::labels;
use crate::models::PredictionResult;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct MalformedResponseError(String);

impl MalformedResponseError {
    fn new(msg: impl ToString) -> Self {
        Self(msg.to_string())
    }
}

/// The two layouts the serving endpoint is known to answer with.
#[derive(Debug)]
enum ResponseShape {
    /// `{"predictions": [[p0, p1, ...]]}`
    Flat(Value),
    /// `{"prediction": {"predictions": [[p0, p1, ...]]}}`
    Nested(Value),
}

impl ResponseShape {
    fn detect(mut body: Map<String, Value>) -> Result<Self, MalformedResponseError> {
        if let Some(predictions) = body.remove("predictions") {
            return Ok(Self::Flat(predictions));
        }

        if let Some(Value::Object(mut inner)) = body.remove("prediction") {
            if let Some(predictions) = inner.remove("predictions") {
                return Ok(Self::Nested(predictions));
            }
        }

        Err(MalformedResponseError::new("Predictions not found in the response."))
    }

    /// First row of the batch.
    fn probabilities(self) -> Result<Vec<f64>, MalformedResponseError> {
        let (Self::Flat(predictions) | Self::Nested(predictions)) = self;
        let first = match predictions {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            Value::Array(_) => return Err(MalformedResponseError::new("predictions is empty")),
            other => {
                return Err(MalformedResponseError::new(format!(
                    "predictions is not a list: {other}"
                )))
            }
        };

        Vec::<f64>::deserialize(first).map_err(MalformedResponseError::new)
    }
}

/// Index of the largest value; the first one wins on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, max)) if v <= max => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

pub fn format_confidence(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn interpret(body: &[u8]) -> Result<PredictionResult, MalformedResponseError> {
    let body = match serde_json::from_slice(body).map_err(MalformedResponseError::new)? {
        Value::Object(map) => map,
        other => {
            return Err(MalformedResponseError::new(format!(
                "expected a JSON object, got {other}"
            )))
        }
    };

    let probabilities = ResponseShape::detect(body)?.probabilities()?;
    let index = argmax(&probabilities)
        .ok_or_else(|| MalformedResponseError::new("probability vector is empty"))?;
    let label = labels::lookup(index).map_err(MalformedResponseError::new)?;

    Ok(PredictionResult {
        predicted_class: label.to_string(),
        confidence: format_confidence(probabilities[index]),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn interpret_json(value: Value) -> Result<PredictionResult, MalformedResponseError> {
        interpret(&serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn flat_shape() {
        let result = interpret_json(json!({ "predictions": [[0.1, 0.7, 0.2]] })).unwrap();
        assert_eq!(result.predicted_class, "American_Goldfinch");
        assert_eq!(result.confidence, "70.00%");
    }

    #[test]
    fn both_shapes_agree() {
        let flat = interpret_json(json!({ "predictions": [[0.1, 0.7, 0.2]] })).unwrap();
        let nested =
            interpret_json(json!({ "prediction": { "predictions": [[0.1, 0.7, 0.2]] } })).unwrap();
        assert_eq!(flat, nested);
    }

    #[test]
    fn flat_shape_takes_precedence() {
        let result = interpret_json(json!({
            "predictions": [[0.9, 0.1]],
            "prediction": { "predictions": [[0.1, 0.9]] },
        }))
        .unwrap();
        assert_eq!(result.predicted_class, "American_Crow");
    }

    #[test]
    fn missing_predictions() {
        let err = interpret_json(json!({ "outputs": [[0.1]] })).unwrap_err();
        assert_eq!(err.to_string(), "Predictions not found in the response.");

        let err = interpret_json(json!({ "prediction": { "scores": [[0.1]] } })).unwrap_err();
        assert_eq!(err.to_string(), "Predictions not found in the response.");
    }

    #[test]
    fn confidence_has_two_decimals() {
        assert_eq!(format_confidence(0.8734), "87.34%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
    }

    #[test]
    fn ties_pick_lowest_index() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4, 0.0]), Some(1));
        assert_eq!(argmax(&[0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn index_beyond_label_table() {
        let mut probabilities = vec![0.0; 201];
        probabilities[200] = 1.0;
        let err = interpret_json(json!({ "predictions": [probabilities] })).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert!(interpret(b"not json").is_err());
        assert!(interpret_json(json!([[0.1, 0.9]])).is_err());
        assert!(interpret_json(json!({ "predictions": [] })).is_err());
        assert!(interpret_json(json!({ "predictions": [[]] })).is_err());
        assert!(interpret_json(json!({ "predictions": [["a", "b"]] })).is_err());
        assert!(interpret_json(json!({ "predictions": "nope" })).is_err());
    }
}
