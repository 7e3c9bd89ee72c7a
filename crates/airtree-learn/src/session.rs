use std::fmt;

use tracing::{debug, info};

use crate::{
    Dataset, LearnError, MinMaxScaler, Prediction, TrainConfig, TrainedModel, TrainingReport,
};

/// Coarse state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    DataLoaded,
    Trained,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Empty => f.write_str("empty"),
            Phase::DataLoaded => f.write_str("holding data"),
            Phase::Trained => f.write_str("trained"),
        }
    }
}

#[derive(Debug, Clone)]
struct LoadedData {
    raw: Dataset,
    normalized: Dataset,
    scaler: MinMaxScaler,
}

#[derive(Debug, Clone)]
enum State {
    Empty,
    DataLoaded(LoadedData),
    Trained {
        data: Option<LoadedData>,
        model: TrainedModel,
    },
}

/// Explicit state owned by one caller: loaded data, the fitted scaler and the trained model.
///
/// Loading new data discards any model trained on earlier data.
#[derive(Debug, Clone)]
pub struct Session {
    state: State,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session { state: State::Empty }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Empty => Phase::Empty,
            State::DataLoaded(_) => Phase::DataLoaded,
            State::Trained { .. } => Phase::Trained,
        }
    }

    /// Fit a scaler on `raw` and keep both the raw and normalized data.
    pub fn load_data(&mut self, raw: Dataset) -> Result<&Dataset, LearnError> {
        let scaler = MinMaxScaler::fit(&raw)?;
        let normalized = scaler.transform(&raw)?;
        info!(rows = raw.len(), "session data loaded");
        self.state = State::DataLoaded(LoadedData {
            raw,
            normalized,
            scaler,
        });
        self.normalized_data()
    }

    fn data(&self, operation: &'static str) -> Result<&LoadedData, LearnError> {
        match &self.state {
            State::DataLoaded(data)
            | State::Trained {
                data: Some(data), ..
            } => Ok(data),
            _ => Err(self.refuse(operation)),
        }
    }

    pub fn raw_data(&self) -> Result<&Dataset, LearnError> {
        Ok(&self.data("read raw data")?.raw)
    }

    pub fn normalized_data(&self) -> Result<&Dataset, LearnError> {
        Ok(&self.data("read normalized data")?.normalized)
    }

    pub fn scaler(&self) -> Result<&MinMaxScaler, LearnError> {
        match &self.state {
            State::Trained { model, .. } => Ok(model.scaler()),
            _ => Ok(&self.data("read the scaler")?.scaler),
        }
    }

    /// Train on the loaded data, replacing any earlier model.
    pub fn train(&mut self, config: &TrainConfig) -> Result<TrainingReport, LearnError> {
        let data = self.data("train")?;
        let (model, report) = TrainedModel::fit(&data.normalized, data.scaler.clone(), config)?;

        let data = match std::mem::replace(&mut self.state, State::Empty) {
            State::DataLoaded(data) => Some(data),
            State::Trained { data, .. } => data,
            State::Empty => None,
        };
        self.state = State::Trained { data, model };
        Ok(report)
    }

    /// Install a model trained elsewhere, keeping any loaded data.
    pub fn attach_model(&mut self, model: TrainedModel) {
        let data = match std::mem::replace(&mut self.state, State::Empty) {
            State::DataLoaded(data) => Some(data),
            State::Trained { data, .. } => data,
            State::Empty => None,
        };
        debug!(has_data = data.is_some(), "model attached to session");
        self.state = State::Trained { data, model };
    }

    pub fn model(&self) -> Result<&TrainedModel, LearnError> {
        match &self.state {
            State::Trained { model, .. } => Ok(model),
            _ => Err(self.refuse("use the model")),
        }
    }

    /// Classify one raw sample with the trained model.
    pub fn predict(&self, raw: &[f64]) -> Result<Prediction, LearnError> {
        match &self.state {
            State::Trained { model, .. } => model.predict(raw),
            _ => Err(self.refuse("predict")),
        }
    }

    /// Drop all data and any model.
    pub fn reset(&mut self) {
        self.state = State::Empty;
        debug!("session reset");
    }

    fn refuse(&self, operation: &'static str) -> LearnError {
        LearnError::Session {
            operation,
            phase: self.phase(),
        }
    }
}
