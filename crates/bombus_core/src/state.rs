use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An ordered mapping from variable name to a real-valued scalar: the
/// set of simulated quantities at one instant.
///
/// The variable set is fixed for the duration of a run; only the
/// integrator mutates the values, once per step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl StateVector {
    /// Builds a state vector from `(name, seed value)` pairs.
    /// Duplicate names are rejected.
    pub fn new(entries: &[(&str, f64)]) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Config(
                "state vector must track at least one variable".to_string(),
            ));
        }
        let mut names = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            if names.iter().any(|n| n == name) {
                return Err(Error::Config(format!(
                    "duplicate variable name `{name}` in state vector"
                )));
            }
            names.push(name.to_string());
            values.push(*value);
        }
        Ok(Self { names, values })
    }

    /// Single-variable convenience constructor.
    pub fn scalar(name: &str, value: f64) -> Self {
        Self {
            names: vec![name.to_string()],
            values: vec![value],
        }
    }

    pub(crate) fn from_parts(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|i| self.values[i])
    }
}

#[cfg(test)]
mod tests {
    use super::StateVector;
    use crate::test_util::assert_err_contains;

    #[test]
    fn lookup_by_name_preserves_order() {
        let state = StateVector::new(&[("nectar", 6.0), ("workers", 5.0), ("totalBees", 10.0)])
            .expect("state should build");
        assert_eq!(state.len(), 3);
        assert_eq!(state.names()[1], "workers");
        assert_eq!(state.get("totalBees"), Some(10.0));
        assert_eq!(state.index_of("nectar"), Some(0));
        assert_eq!(state.get("drones"), None);
    }

    #[test]
    fn rejects_duplicate_names() {
        assert_err_contains(
            StateVector::new(&[("workers", 5.0), ("workers", 6.0)]),
            "duplicate variable name",
        );
    }

    #[test]
    fn rejects_empty_variable_set() {
        assert_err_contains(StateVector::new(&[]), "at least one variable");
    }
}
