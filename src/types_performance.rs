use serde::{Deserialize, Serialize};

pub const MAX_ITERATION_ID_LEN: usize = 200;
pub const MAX_STATUS_LEN: usize = 100;

/// Which training iteration a performance row describes. Closed set: serde
/// rejects anything outside it on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IterationName {
    New,
    Previous,
    Demo,
}

/// Per-iteration training metrics, reported verbatim (mAP is not computed
/// here). Metric fields default to 0.0 when omitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IterationPerformance {
    pub iteration_name: IterationName,
    pub iteration_id: String,
    pub status: String,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default, rename = "mAP")]
    pub m_ap: f64,
}

impl IterationPerformance {
    pub fn validate(&self) -> Result<(), String> {
        if self.iteration_id.chars().count() > MAX_ITERATION_ID_LEN {
            return Err(format!(
                "iteration_id longer than {MAX_ITERATION_ID_LEN} characters"
            ));
        }
        if self.status.chars().count() > MAX_STATUS_LEN {
            return Err(format!("status longer than {MAX_STATUS_LEN} characters"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectPerformance {
    pub iterations: Vec<IterationPerformance>,
}

impl ProjectPerformance {
    pub fn validate(&self) -> Result<(), String> {
        for it in &self.iterations {
            it.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_iteration_name_rejects_unknown_choice() {
        let v = json!({
            "iteration_name": "latest",
            "iteration_id": "iter-1",
            "status": "ok"
        });
        assert!(serde_json::from_value::<IterationPerformance>(v).is_err());
    }

    #[test]
    fn test_metrics_default_to_zero_when_omitted() {
        let v = json!({
            "iteration_name": "new",
            "iteration_id": "iter-1",
            "status": "ok"
        });
        let it: IterationPerformance = serde_json::from_value(v).unwrap();
        assert_eq!(it.precision, 0.0);
        assert_eq!(it.recall, 0.0);
        assert_eq!(it.m_ap, 0.0);
    }

    #[test]
    fn test_map_keeps_capitalization_on_the_wire() {
        let it = IterationPerformance {
            iteration_name: IterationName::Demo,
            iteration_id: "demo".to_string(),
            status: "ok".to_string(),
            precision: 0.5,
            recall: 0.25,
            m_ap: 0.75,
        };
        let v = serde_json::to_value(&it).unwrap();
        assert_eq!(v["iteration_name"], "demo");
        assert_eq!(v["mAP"], 0.75);
        assert!(v.get("m_ap").is_none());
    }

    #[test]
    fn test_report_wraps_iterations_field() {
        let report = ProjectPerformance {
            iterations: vec![IterationPerformance {
                iteration_name: IterationName::Previous,
                iteration_id: String::new(),
                status: "untrained".to_string(),
                precision: 0.0,
                recall: 0.0,
                m_ap: 0.0,
            }],
        };
        let v = serde_json::to_value(&report).unwrap();
        assert!(v["iterations"].is_array());
        assert_eq!(v["iterations"][0]["status"], "untrained");
    }

    #[test]
    fn test_validate_enforces_length_caps() {
        let mut it = IterationPerformance {
            iteration_name: IterationName::New,
            iteration_id: "x".repeat(MAX_ITERATION_ID_LEN),
            status: "y".repeat(MAX_STATUS_LEN),
            precision: 0.0,
            recall: 0.0,
            m_ap: 0.0,
        };
        assert!(it.validate().is_ok());

        it.iteration_id.push('x');
        assert!(it.validate().is_err());

        it.iteration_id.pop();
        it.status.push('y');
        assert!(it.validate().is_err());
    }
}
